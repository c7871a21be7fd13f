//! Scanner Engine
//!
//! The per-session scanning state machine. Constructed with an injected
//! camera backend and frame decoder so every console session (and every test)
//! gets an independent instance.
//!
//! All state transitions happen under one async mutex, which also makes
//! `start()` idempotent while a start is in flight: a concurrent caller
//! blocks until the first start settles, then observes `Scanning` and
//! no-ops. Device switches are additionally guarded by an atomic flag so a
//! second switch is rejected outright instead of queueing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, Mutex};

use crate::camera::manager::CameraDeviceManager;
use crate::camera::traits::CameraBackend;
use crate::camera::types::{CameraDevice, CameraStream, PermissionOutcome, StreamConstraints};
use crate::scanner::error::{EngineError, EngineResult};
use crate::scanner::guard::ResourceGuard;
use crate::scanner::traits::FrameDecoder;
use crate::scanner::types::{
    DecodeEvent, FailureKind, Platform, ScanEvent, ScanSession, SessionState,
};

/// Pause between decode attempts when a frame held no code
const FRAME_INTERVAL: Duration = Duration::from_millis(25);

/// Session event channel depth; one decode per session means this never fills
const EVENT_CHANNEL_SIZE: usize = 16;

struct EngineInner {
    state: SessionState,
    devices: Vec<CameraDevice>,
    active_device_id: Option<String>,
    attempt_count: u32,
    /// Incremented whenever a scanning session ends; decode results carrying
    /// a stale epoch are suppressed.
    scan_epoch: u64,
}

pub struct ScannerEngine {
    backend: Arc<dyn CameraBackend>,
    decoder: Arc<dyn FrameDecoder>,
    platform: Platform,
    guard: Arc<ResourceGuard>,
    inner: Arc<Mutex<EngineInner>>,
    events_tx: mpsc::Sender<ScanEvent>,
    events_rx: std::sync::Mutex<Option<mpsc::Receiver<ScanEvent>>>,
    switch_in_flight: AtomicBool,
}

impl ScannerEngine {
    pub fn new(
        backend: Arc<dyn CameraBackend>,
        decoder: Arc<dyn FrameDecoder>,
        platform: Platform,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        Self {
            guard: Arc::new(ResourceGuard::new(backend.clone())),
            backend,
            decoder,
            platform,
            inner: Arc::new(Mutex::new(EngineInner {
                state: SessionState::Idle,
                devices: Vec::new(),
                active_device_id: None,
                attempt_count: 0,
                scan_epoch: 0,
            })),
            events_tx,
            events_rx: std::sync::Mutex::new(Some(events_rx)),
            switch_in_flight: AtomicBool::new(false),
        }
    }

    /// Take the session event receiver
    ///
    /// One receiver per engine; returns `None` once taken.
    pub fn subscribe(&self) -> Option<mpsc::Receiver<ScanEvent>> {
        self.events_rx.lock().unwrap().take()
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// Read-only session snapshot for the presentation boundary
    pub async fn session(&self) -> ScanSession {
        let inner = self.inner.lock().await;
        ScanSession {
            state: inner.state,
            active_device_id: inner.active_device_id.clone(),
            attempt_count: inner.attempt_count,
        }
    }

    /// Remediation hint for the current error state, if any
    pub async fn failure_hint(&self) -> Option<&'static str> {
        match self.inner.lock().await.state {
            SessionState::Error(kind) => {
                Some(crate::scanner::error::remediation_hint(kind, self.platform))
            }
            _ => None,
        }
    }

    /// The guard owning the bound stream; exposed for surface teardown
    pub fn guard(&self) -> Arc<ResourceGuard> {
        self.guard.clone()
    }

    /// Start scanning
    ///
    /// From `Idle` with no known devices this requests permission first; from
    /// `Idle`/`Ready` with devices known it binds directly. No-op while
    /// `Starting` or `Scanning`. Never retries on failure.
    pub async fn start(&self) -> EngineResult<()> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            SessionState::Starting | SessionState::Scanning => {
                log::trace!("start() while {}, ignoring", inner.state);
                return Ok(());
            }
            SessionState::Idle | SessionState::Ready => {}
            other => {
                return Err(EngineError::InvalidTransition {
                    from: other,
                    request: "start",
                });
            }
        }

        if inner.devices.is_empty() {
            inner.state = SessionState::RequestingPermission;
            let manager = CameraDeviceManager::new(self.backend.clone());
            match manager.request_permission().await {
                PermissionOutcome::Granted(devices) => {
                    if inner.active_device_id.is_none() {
                        inner.active_device_id = CameraDeviceManager::select_default(&devices);
                    }
                    inner.devices = devices;
                    inner.state = SessionState::Ready;
                }
                PermissionOutcome::Denied(err) | PermissionOutcome::Failed(err) => {
                    inner.state = SessionState::Error(FailureKind::from(&err));
                    self.guard.release().await;
                    return Err(EngineError::Camera(err));
                }
            }
        }

        self.bind_and_scan(&mut inner).await
    }

    /// Stop scanning and release the camera
    ///
    /// Once this returns, no camera track is live. No-op from `Idle`/`Ready`.
    pub async fn stop(&self) -> EngineResult<()> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            SessionState::Scanning => {
                inner.state = SessionState::Stopping;
                inner.scan_epoch += 1; // decode results from here on are stale
                self.guard.release().await;
                inner.state = SessionState::Ready;
                Ok(())
            }
            SessionState::Stopping => {
                // A stop is already running; wait until its release finishes
                self.guard.release().await;
                Ok(())
            }
            SessionState::Idle | SessionState::Ready => Ok(()),
            other => Err(EngineError::InvalidTransition {
                from: other,
                request: "stop",
            }),
        }
    }

    /// Switch to another camera device
    ///
    /// Valid from `Ready` or `Scanning`; sequences stop-then-start and ends
    /// in `Scanning` bound to the new device. A switch while another is in
    /// flight is rejected.
    pub async fn switch_device(&self, device_id: &str) -> EngineResult<()> {
        if self.switch_in_flight.swap(true, Ordering::SeqCst) {
            return Err(EngineError::SwitchInFlight);
        }
        let result = self.switch_device_locked(device_id).await;
        self.switch_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn switch_device_locked(&self, device_id: &str) -> EngineResult<()> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            SessionState::Ready | SessionState::Scanning => {}
            other => {
                return Err(EngineError::InvalidTransition {
                    from: other,
                    request: "switch_device",
                });
            }
        }

        if inner.state == SessionState::Scanning {
            inner.state = SessionState::Stopping;
            inner.scan_epoch += 1;
            self.guard.release().await;
            inner.state = SessionState::Ready;
        }
        inner.active_device_id = Some(device_id.to_string());
        self.bind_and_scan(&mut inner).await
    }

    /// Tear the session down from any state
    ///
    /// Guaranteed camera release; the session resets to `Idle`.
    pub async fn teardown(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.scan_epoch += 1;
            inner.state = SessionState::Stopping;
        }
        self.guard.release().await;

        let mut inner = self.inner.lock().await;
        inner.state = SessionState::Idle;
        inner.active_device_id = None;
        inner.attempt_count = 0;
        log::debug!("Session torn down");
    }

    /// Operator-initiated retry out of the `Error` state
    pub async fn retry(&self) -> EngineResult<()> {
        {
            let mut inner = self.inner.lock().await;
            match inner.state {
                SessionState::Error(_) => {
                    // Re-enter via permission request or direct start,
                    // depending on whether devices are already known
                    inner.state = if inner.devices.is_empty() {
                        SessionState::Idle
                    } else {
                        SessionState::Ready
                    };
                }
                other => {
                    return Err(EngineError::InvalidTransition {
                        from: other,
                        request: "retry",
                    });
                }
            }
        }
        self.start().await
    }

    /// Bind a stream for the active (or default) device and enter `Scanning`
    async fn bind_and_scan(&self, inner: &mut EngineInner) -> EngineResult<()> {
        inner.state = SessionState::Starting;
        inner.attempt_count += 1;

        let device_id = inner
            .active_device_id
            .clone()
            .or_else(|| CameraDeviceManager::select_default(&inner.devices));
        let constraints = match &device_id {
            Some(id) => StreamConstraints::for_device(id.clone()),
            None => StreamConstraints::probe(),
        };

        let stream = match self.backend.open_stream(&constraints).await {
            Ok(stream) => stream,
            Err(err) => {
                inner.state = SessionState::Error(FailureKind::from(&err));
                self.guard.release().await;
                return Err(EngineError::Camera(err));
            }
        };

        let bound_device = stream.device_id.clone().or(device_id);
        inner.active_device_id = bound_device.clone();
        self.guard.bind(stream.clone()).await;
        inner.scan_epoch += 1;
        inner.state = SessionState::Scanning;
        log::debug!(
            "Scanning on {:?} (attempt {})",
            bound_device,
            inner.attempt_count
        );

        self.spawn_decode_loop(stream, bound_device, inner.scan_epoch);
        Ok(())
    }

    fn spawn_decode_loop(&self, stream: CameraStream, device_id: Option<String>, epoch: u64) {
        let decoder = self.decoder.clone();
        let guard = self.guard.clone();
        let inner = self.inner.clone();
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            loop {
                {
                    let state = inner.lock().await;
                    if state.scan_epoch != epoch || state.state != SessionState::Scanning {
                        return; // session ended elsewhere
                    }
                }

                match decoder.decode_next(&stream).await {
                    Ok(Some(frame)) => {
                        // First decode wins; auto-stop before emitting so a
                        // late frame can never start a second validation.
                        let accepted = {
                            let mut state = inner.lock().await;
                            if state.scan_epoch == epoch
                                && state.state == SessionState::Scanning
                            {
                                state.state = SessionState::Stopping;
                                state.scan_epoch += 1;
                                true
                            } else {
                                false
                            }
                        };
                        if !accepted {
                            log::trace!("Suppressing decode after session end");
                            return;
                        }

                        guard.release().await;
                        {
                            let mut state = inner.lock().await;
                            if state.state == SessionState::Stopping {
                                state.state = SessionState::Ready;
                            }
                        }

                        let event = DecodeEvent {
                            text: frame.text,
                            format: frame.format,
                            device_id: device_id.clone(),
                            at: Utc::now(),
                        };
                        if events_tx.send(ScanEvent::Decoded(event)).await.is_err() {
                            log::trace!("Decode event dropped, no subscriber");
                        }
                        return;
                    }
                    Ok(None) => {
                        tokio::time::sleep(FRAME_INTERVAL).await;
                    }
                    Err(err) => {
                        log::warn!("Decode loop halted: {}", err);
                        let was_scanning = {
                            let mut state = inner.lock().await;
                            if state.scan_epoch == epoch
                                && state.state == SessionState::Scanning
                            {
                                state.state = SessionState::Stopping;
                                state.scan_epoch += 1;
                                true
                            } else {
                                false
                            }
                        };
                        if was_scanning {
                            guard.release().await;
                            let mut state = inner.lock().await;
                            if state.state == SessionState::Stopping {
                                state.state = SessionState::Ready;
                            }
                            drop(state);
                            let _ = events_tx
                                .send(ScanEvent::Ended {
                                    message: Some(err.to_string()),
                                })
                                .await;
                        }
                        return;
                    }
                }
            }
        });
    }
}
