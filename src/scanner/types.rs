//! Scanner Types and Enums
//!
//! Shared types and enums used throughout the scanner module.

use chrono::{DateTime, Utc};

use crate::camera::error::CameraError;

/// Scanning session states
///
/// Transitions only occur along the edges the engine defines; any other
/// request is rejected without a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Idle,
    RequestingPermission,
    Ready,
    Starting,
    Scanning,
    Stopping,
    Error(FailureKind),
}

/// Classified reason the engine entered `SessionState::Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FailureKind {
    PermissionDenied,
    InsecureContext,
    Unsupported,
    DeviceNotFound,
    DeviceBusy,
    Aborted,
    Bind,
}

impl From<&CameraError> for FailureKind {
    fn from(err: &CameraError) -> Self {
        match err {
            CameraError::PermissionDenied { .. } => FailureKind::PermissionDenied,
            CameraError::InsecureContext => FailureKind::InsecureContext,
            CameraError::Unsupported { .. } => FailureKind::Unsupported,
            CameraError::DeviceNotFound { .. } => FailureKind::DeviceNotFound,
            CameraError::DeviceBusy { .. } => FailureKind::DeviceBusy,
            CameraError::Aborted { .. } => FailureKind::Aborted,
            CameraError::Backend { .. } => FailureKind::Bind,
        }
    }
}

/// Platform the console runs on; only affects remediation wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Mobile,
    #[default]
    Desktop,
}

/// Read-only snapshot of a scanning session
#[derive(Debug, Clone)]
pub struct ScanSession {
    pub state: SessionState,
    pub active_device_id: Option<String>,
    pub attempt_count: u32,
}

/// One decoded camera frame as produced by a `FrameDecoder`
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub text: String,
    /// Barcode symbology, e.g. "QR_CODE"
    pub format: String,
}

/// A successful decode, emitted at most once per scanning session
#[derive(Debug, Clone)]
pub struct DecodeEvent {
    pub text: String,
    pub format: String,
    pub device_id: Option<String>,
    pub at: DateTime<Utc>,
}

/// Events emitted on the session channel
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// First successful decode of the session; the engine has already
    /// auto-stopped and released the camera when this arrives.
    Decoded(DecodeEvent),
    /// The decode loop halted without a decode (frame source closed or
    /// failed); the camera has been released.
    Ended { message: Option<String> },
}
