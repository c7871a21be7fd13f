//! Scanner Component
//!
//! The QR scanning engine: a per-session state machine that binds a camera
//! stream through an injected backend, runs the decode loop, and emits the
//! first successful decode of each scanning session. Resource release is
//! centralised in a guard so no exit path can leak a live camera track.
//!
//! ## Core Features
//!
//! - **ScannerEngine**: explicit session object with injected camera backend
//!   and frame decoder; never a global singleton
//! - **State Machine**: Idle / RequestingPermission / Ready / Starting /
//!   Scanning / Stopping / Error with operator-initiated retry only
//! - **Single-Flight Decode**: the engine auto-stops on the first decode and
//!   suppresses later frames for that session
//! - **ResourceGuard**: primary stop with direct track-halt fallback across
//!   stop, teardown, error and device-switch paths

pub mod engine;
pub mod error;
pub mod guard;
pub mod traits;
pub mod types;

pub mod api;

#[cfg(test)]
mod tests;
