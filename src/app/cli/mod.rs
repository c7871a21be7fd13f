//! Command line interface

pub mod args;
pub mod config;
pub mod display;
