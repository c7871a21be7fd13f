//! Validation module tests

mod coordinator_tests;

pub(crate) mod fixtures;
