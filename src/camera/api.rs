//! Camera API
//!
//! Public API for the camera device layer, consolidating external exports.
//! This follows the same pattern as the scanner and validation api modules.

pub use crate::camera::error::{CameraError, CameraResult};
pub use crate::camera::manager::CameraDeviceManager;
pub use crate::camera::traits::{CameraBackend, MediaTrack};
pub use crate::camera::types::{
    CameraDevice, CameraStream, Facing, PermissionOutcome, StreamConstraints,
};
