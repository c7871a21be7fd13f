//! Scanner module tests
