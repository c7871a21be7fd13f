//! Camera module tests
