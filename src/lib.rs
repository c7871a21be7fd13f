pub mod app;
pub mod camera;
pub mod core;
pub mod history;
pub mod payload;
pub mod scanner;
pub mod validation;

include!(concat!(env!("OUT_DIR"), "/version.rs"));
