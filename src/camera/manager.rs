//! Camera Device Manager
//!
//! Permission acquisition and default device selection. Pure with respect to
//! external state: no caching, no retries, one probe per request.

use std::sync::Arc;

use crate::camera::error::CameraError;
use crate::camera::traits::CameraBackend;
use crate::camera::types::{CameraDevice, Facing, PermissionOutcome, StreamConstraints};

/// Label substrings that identify a rear-facing camera on platforms that only
/// expose free-text labels.
const REAR_LABEL_MARKERS: &[&str] = &["back", "rear", "environment"];

pub struct CameraDeviceManager {
    backend: Arc<dyn CameraBackend>,
}

impl CameraDeviceManager {
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        Self { backend }
    }

    /// Request camera permission and enumerate devices
    ///
    /// Briefly opens a probe stream (rear-facing preferred) to trigger the
    /// platform permission prompt, releases it immediately, then enumerates.
    /// The probe is released on every path before this returns.
    pub async fn request_permission(&self) -> PermissionOutcome {
        let probe = match self.backend.open_stream(&StreamConstraints::probe()).await {
            Ok(stream) => stream,
            Err(err) => return Self::classify_refusal(err),
        };

        // Release the probe before enumerating; primary stop first, direct
        // track halt as fallback.
        if let Err(err) = self.backend.stop_stream(&probe).await {
            log::debug!("Probe stream stop failed ({}), halting tracks directly", err);
            probe.halt_all();
        }
        debug_assert!(!probe.has_live_tracks());

        match self.backend.enumerate_devices().await {
            Ok(devices) => {
                log::debug!("Camera permission granted, {} device(s)", devices.len());
                PermissionOutcome::Granted(devices)
            }
            Err(err) => PermissionOutcome::Failed(err),
        }
    }

    /// Pick a sensible default device: rear-facing metadata or label match
    /// first, otherwise the first enumerated device.
    pub fn select_default(devices: &[CameraDevice]) -> Option<String> {
        let rear = devices.iter().find(|d| {
            d.facing == Facing::Back || {
                let label = d.label.to_lowercase();
                REAR_LABEL_MARKERS.iter().any(|m| label.contains(m))
            }
        });
        rear.or_else(|| devices.first()).map(|d| d.id.clone())
    }

    fn classify_refusal(err: CameraError) -> PermissionOutcome {
        match err {
            CameraError::PermissionDenied { .. }
            | CameraError::InsecureContext
            | CameraError::Unsupported { .. } => PermissionOutcome::Denied(err),
            other => PermissionOutcome::Failed(other),
        }
    }
}
