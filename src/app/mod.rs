//! Application module

pub mod cli;
pub mod console;
pub mod startup;
