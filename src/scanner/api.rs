//! Scanner API
//!
//! Public API for the scanner system, consolidating all external exports and
//! providing a controlled interface for accessing scanner functionality.
//!
//! This follows the same pattern as the camera::api and validation::api
//! modules to maintain consistent architecture across the application.

pub use crate::scanner::engine::ScannerEngine;
pub use crate::scanner::error::{remediation_hint, EngineError, EngineResult};
pub use crate::scanner::guard::ResourceGuard;
pub use crate::scanner::traits::FrameDecoder;
pub use crate::scanner::types::{
    DecodeEvent, DecodedFrame, FailureKind, Platform, ScanEvent, ScanSession, SessionState,
};
