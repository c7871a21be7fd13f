//! Camera Resource Guard
//!
//! Single owner of the bound camera stream. All four release triggers
//! (explicit stop, teardown, error transition, device switch) funnel through
//! `release`, which tries the backend's stop API first and falls back to
//! halting the stream's tracks directly. Overlapping releases serialize on
//! the slot lock, so no caller returns while a track is still live.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::camera::traits::CameraBackend;
use crate::camera::types::CameraStream;

pub struct ResourceGuard {
    backend: Arc<dyn CameraBackend>,
    slot: Mutex<Option<CameraStream>>,
}

impl ResourceGuard {
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        Self {
            backend,
            slot: Mutex::new(None),
        }
    }

    /// Take ownership of a freshly bound stream
    ///
    /// At most one camera resource is bound per session; a stream already in
    /// the slot is released before the new one is stored.
    pub async fn bind(&self, stream: CameraStream) {
        let mut slot = self.slot.lock().await;
        if let Some(prev) = slot.take() {
            log::warn!("Binding over an existing stream, releasing the old one");
            self.release_stream(&prev).await;
        }
        *slot = Some(stream);
    }

    /// Release the bound stream, if any
    ///
    /// Overlapping calls serialize on the slot lock: a second caller waits
    /// for the in-flight release to finish, then sees the empty slot and
    /// no-ops without a second backend stop. No track is live once any
    /// `release` call returns.
    pub async fn release(&self) {
        let mut slot = self.slot.lock().await;
        if let Some(stream) = slot.take() {
            self.release_stream(&stream).await;
            if stream.has_live_tracks() {
                // release_stream halts as a fallback, so this should not be
                // reachable; halt once more rather than leak.
                log::warn!("Stream still live after release, forcing halt");
                stream.halt_all();
            }
        }
    }

    async fn release_stream(&self, stream: &CameraStream) {
        match self.backend.stop_stream(stream).await {
            Ok(()) => {}
            Err(err) => {
                log::debug!("Primary stop failed ({}), halting tracks directly", err);
                stream.halt_all();
            }
        }
        // The primary stop may succeed without halting every track
        if stream.has_live_tracks() {
            stream.halt_all();
        }
    }

    pub async fn is_bound(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    pub async fn has_live_resource(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .map(|s| s.has_live_tracks())
            .unwrap_or(false)
    }
}
