//! Scanner Error Types
//!
//! Engine failures with platform-aware remediation hints. The engine never
//! retries on its own; hints tell the operator what to fix before retrying.

use std::fmt;

use crate::camera::error::CameraError;
use crate::scanner::types::{FailureKind, Platform, SessionState};

/// Scanner engine error types
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Camera acquisition failed; classification carried by the inner error
    Camera(CameraError),
    /// The stream was acquired but could not be bound for decoding
    Bind { message: String },
    /// A device switch was requested while another was in flight
    SwitchInFlight,
    /// The requested operation is not an edge of the state machine
    InvalidTransition {
        from: SessionState,
        request: &'static str,
    },
    /// The frame decoder failed
    Decode { message: String },
}

impl EngineError {
    /// Remediation hint for the operator, worded per platform
    pub fn remediation_hint(&self, platform: Platform) -> Option<&'static str> {
        match self {
            EngineError::Camera(err) => Some(remediation_hint(FailureKind::from(err), platform)),
            EngineError::Bind { .. } => Some(remediation_hint(FailureKind::Bind, platform)),
            _ => None,
        }
    }
}

/// Operator-facing remediation wording for a classified failure
pub fn remediation_hint(kind: FailureKind, platform: Platform) -> &'static str {
    use FailureKind::*;
    use Platform::*;
    match (kind, platform) {
        (PermissionDenied, Mobile) => {
            "Camera access is blocked. Allow camera access for this app in your phone's settings, then retry."
        }
        (PermissionDenied, Desktop) => {
            "Camera access is blocked. Allow camera access in your browser or system privacy settings, then retry."
        }
        (DeviceNotFound, Mobile) => "No camera was found on this device.",
        (DeviceNotFound, Desktop) => "No camera was found. Connect a webcam and retry.",
        (DeviceBusy, Mobile) => "The camera is in use by another app. Close it and retry.",
        (DeviceBusy, Desktop) => {
            "The camera is in use by another application. Close it and retry."
        }
        (InsecureContext, _) => "Scanning requires a secure (HTTPS) context.",
        (Unsupported, Mobile) => "This device does not support camera capture.",
        (Unsupported, Desktop) => "This platform does not support camera capture.",
        (Aborted, _) => "The camera request was interrupted. Retry the scan.",
        (Bind, Mobile) => "The camera could not be started. Close other camera apps and retry.",
        (Bind, Desktop) => {
            "The camera could not be started. Check that no other application holds the camera and retry."
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Camera(err) => write!(f, "Camera error: {}", err),
            EngineError::Bind { message } => write!(f, "Stream bind failed: {}", message),
            EngineError::SwitchInFlight => {
                write!(f, "A device switch is already in flight")
            }
            EngineError::InvalidTransition { from, request } => {
                write!(f, "Cannot {} from state {}", request, from)
            }
            EngineError::Decode { message } => write!(f, "Decode failed: {}", message),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<CameraError> for EngineError {
    fn from(err: CameraError) -> Self {
        EngineError::Camera(err)
    }
}

impl crate::core::error_handling::ContextualError for EngineError {
    fn is_user_actionable(&self) -> bool {
        match self {
            EngineError::Camera(err) => {
                crate::core::error_handling::ContextualError::is_user_actionable(err)
            }
            EngineError::SwitchInFlight => true, // Operator can wait and retry
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            EngineError::Camera(err) => {
                crate::core::error_handling::ContextualError::user_message(err)
            }
            EngineError::SwitchInFlight => Some("A device switch is already in progress"),
            _ => None,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
