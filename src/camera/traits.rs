//! Traits for the camera device layer

use async_trait::async_trait;

use crate::camera::error::CameraResult;
use crate::camera::types::{CameraDevice, CameraStream, StreamConstraints};

/// A single media track of a bound stream
///
/// Implementations must make `halt` idempotent: halting an already-halted
/// track is a no-op.
pub trait MediaTrack: Send + Sync {
    /// Whether the track is still delivering frames
    fn is_live(&self) -> bool;

    /// Halt the track immediately
    fn halt(&self);

    /// Track kind for diagnostics ("video", "terminal", ...)
    fn kind(&self) -> &str;
}

/// Injected camera device layer
///
/// Every session constructs its engine with a backend instance; there is no
/// implicit global device state.
#[async_trait]
pub trait CameraBackend: Send + Sync {
    /// Open a stream satisfying the constraints
    ///
    /// Failures are classified per `CameraError`; the backend performs no
    /// retries of its own.
    async fn open_stream(&self, constraints: &StreamConstraints) -> CameraResult<CameraStream>;

    /// Enumerate available devices
    ///
    /// Device labels are typically only populated after a permission grant.
    async fn enumerate_devices(&self) -> CameraResult<Vec<CameraDevice>>;

    /// Primary stream release API
    ///
    /// May fail; callers fall back to halting the stream's tracks directly.
    async fn stop_stream(&self, stream: &CameraStream) -> CameraResult<()>;
}
