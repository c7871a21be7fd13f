//! Camera Error Types

use std::fmt;

/// Classified camera acquisition failures
///
/// The classification mirrors what device layers can actually report:
/// permission problems, missing or busy hardware, and platforms where camera
/// capture is unavailable altogether.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// The operator (or platform policy) refused camera access
    PermissionDenied { message: String },
    /// No camera device matched the request
    DeviceNotFound { message: String },
    /// The device exists but is held by another consumer
    DeviceBusy { message: String },
    /// Capture requires a secure context and none is available
    InsecureContext,
    /// The platform has no camera capture support
    Unsupported { message: String },
    /// The acquisition was aborted before completion
    Aborted { message: String },
    /// Backend-specific failure that fits no other class
    Backend { message: String },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied { message } => {
                write!(f, "Camera permission denied: {}", message)
            }
            CameraError::DeviceNotFound { message } => {
                write!(f, "Camera device not found: {}", message)
            }
            CameraError::DeviceBusy { message } => write!(f, "Camera device busy: {}", message),
            CameraError::InsecureContext => {
                write!(f, "Camera capture requires a secure context")
            }
            CameraError::Unsupported { message } => {
                write!(f, "Camera capture unsupported: {}", message)
            }
            CameraError::Aborted { message } => {
                write!(f, "Camera acquisition aborted: {}", message)
            }
            CameraError::Backend { message } => write!(f, "Camera backend error: {}", message),
        }
    }
}

impl std::error::Error for CameraError {}

impl crate::core::error_handling::ContextualError for CameraError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CameraError::PermissionDenied { .. } => true, // Operator can grant access
            CameraError::DeviceBusy { .. } => true,       // Operator can free the device
            CameraError::DeviceNotFound { .. } => false,
            CameraError::InsecureContext => false,
            CameraError::Unsupported { .. } => false,
            CameraError::Aborted { .. } => false,
            CameraError::Backend { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CameraError::PermissionDenied { message } => Some(message),
            CameraError::DeviceBusy { message } => Some(message),
            _ => None,
        }
    }
}

pub type CameraResult<T> = Result<T, CameraError>;
