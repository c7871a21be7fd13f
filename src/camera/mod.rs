//! Camera Device Component
//!
//! Camera permission acquisition, device enumeration and default device
//! selection for the scanning console. The physical device layer is injected
//! through the `CameraBackend` trait so sessions can run against real
//! hardware, a terminal-backed stand-in, or scripted test doubles.
//!
//! ## Core Features
//!
//! - **CameraDeviceManager**: probe-stream permission requests with immediate release
//! - **Failure Classification**: permission / device / platform failure reasons
//! - **Default Selection**: prefers rear-facing devices for ticket scanning

pub mod error;
pub mod manager;
pub mod traits;
pub mod types;

pub mod api;

#[cfg(test)]
pub(crate) mod tests;
