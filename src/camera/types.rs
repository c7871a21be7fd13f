//! Camera Types
//!
//! Shared types for device enumeration and stream handling.

use std::sync::Arc;

use crate::camera::error::CameraError;
use crate::camera::traits::MediaTrack;

/// Which way a camera points
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[derive(strum_macros::Display)]
pub enum Facing {
    Front,
    Back,
    Unknown,
}

/// An enumerable camera device
///
/// Enumerated per permission grant; never persisted.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraDevice {
    pub id: String,
    pub label: String,
    pub facing: Facing,
}

/// Constraints passed to `CameraBackend::open_stream`
#[derive(Debug, Clone, Default)]
pub struct StreamConstraints {
    /// Exact device to bind, when known
    pub device_id: Option<String>,
    /// Facing preference applied when no device id is given
    pub prefer_facing: Option<Facing>,
}

impl StreamConstraints {
    /// Probe constraints used for permission requests: no fixed device,
    /// rear-facing preferred.
    pub fn probe() -> Self {
        Self {
            device_id: None,
            prefer_facing: Some(Facing::Back),
        }
    }

    /// Constraints binding a specific device
    pub fn for_device<S: Into<String>>(device_id: S) -> Self {
        Self {
            device_id: Some(device_id.into()),
            prefer_facing: None,
        }
    }
}

/// A bound camera stream and its track handles
///
/// Tracks are shared handles: halting them here halts them everywhere,
/// which is what the release fallback path relies on.
#[derive(Clone)]
pub struct CameraStream {
    pub device_id: Option<String>,
    tracks: Vec<Arc<dyn MediaTrack>>,
}

impl CameraStream {
    pub fn new(device_id: Option<String>, tracks: Vec<Arc<dyn MediaTrack>>) -> Self {
        Self { device_id, tracks }
    }

    pub fn tracks(&self) -> &[Arc<dyn MediaTrack>] {
        &self.tracks
    }

    /// Halt every track directly, bypassing the backend stop API
    pub fn halt_all(&self) {
        for track in &self.tracks {
            if track.is_live() {
                log::trace!("Halting {} track directly", track.kind());
                track.halt();
            }
        }
    }

    pub fn has_live_tracks(&self) -> bool {
        self.tracks.iter().any(|t| t.is_live())
    }
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream")
            .field("device_id", &self.device_id)
            .field("tracks", &self.tracks.len())
            .field("live", &self.has_live_tracks())
            .finish()
    }
}

/// Result of a permission request
#[derive(Debug, Clone)]
pub enum PermissionOutcome {
    /// Access granted; devices enumerated after the probe stream was released
    Granted(Vec<CameraDevice>),
    /// Access refused by the operator or the platform
    Denied(CameraError),
    /// The request failed for a reason other than refusal
    Failed(CameraError),
}
