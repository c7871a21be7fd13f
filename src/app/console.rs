//! Terminal camera stand-in
//!
//! Lets the console binary drive the full scanning pipeline without camera
//! hardware: one synthetic device whose "frames" are lines typed (or piped)
//! into stdin. Injected through the same seams as any real backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::camera::error::CameraResult;
use crate::camera::traits::{CameraBackend, MediaTrack};
use crate::camera::types::{CameraDevice, CameraStream, Facing, StreamConstraints};
use crate::scanner::error::{EngineError, EngineResult};
use crate::scanner::traits::FrameDecoder;
use crate::scanner::types::DecodedFrame;

const DEVICE_ID: &str = "terminal-0";

struct TerminalTrack {
    live: AtomicBool,
}

impl MediaTrack for TerminalTrack {
    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn halt(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn kind(&self) -> &str {
        "terminal"
    }
}

pub struct TerminalCamera {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalCamera {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        })
    }
}

#[async_trait]
impl CameraBackend for TerminalCamera {
    async fn open_stream(&self, _constraints: &StreamConstraints) -> CameraResult<CameraStream> {
        Ok(CameraStream::new(
            Some(DEVICE_ID.to_string()),
            vec![Arc::new(TerminalTrack {
                live: AtomicBool::new(true),
            })],
        ))
    }

    async fn enumerate_devices(&self) -> CameraResult<Vec<CameraDevice>> {
        Ok(vec![CameraDevice {
            id: DEVICE_ID.to_string(),
            label: "Terminal input (manual entry)".to_string(),
            facing: Facing::Unknown,
        }])
    }

    async fn stop_stream(&self, stream: &CameraStream) -> CameraResult<()> {
        stream.halt_all();
        Ok(())
    }
}

#[async_trait]
impl FrameDecoder for TerminalCamera {
    async fn decode_next(&self, _stream: &CameraStream) -> EngineResult<Option<DecodedFrame>> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(DecodedFrame {
                        text: line.to_string(),
                        format: "KEYBOARD".to_string(),
                    }))
                }
            }
            Ok(None) => Err(EngineError::Decode {
                message: "input closed".to_string(),
            }),
            Err(err) => Err(EngineError::Decode {
                message: err.to_string(),
            }),
        }
    }
}
