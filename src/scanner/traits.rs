//! Traits for the scanner engine

use async_trait::async_trait;

use crate::camera::types::CameraStream;
use crate::scanner::error::EngineResult;
use crate::scanner::types::DecodedFrame;

/// Frame-by-frame QR decoder over a bound stream
///
/// The engine calls `decode_next` repeatedly while `Scanning`. `Ok(None)`
/// means the frame held no decodable code; an error ends the session's decode
/// loop (the camera is still released).
#[async_trait]
pub trait FrameDecoder: Send + Sync {
    async fn decode_next(&self, stream: &CameraStream) -> EngineResult<Option<DecodedFrame>>;
}
