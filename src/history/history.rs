//! Bounded scan history

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Fixed history depth; the oldest entry is silently evicted
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScanHistoryEntry {
    pub payload_text: String,
    pub timestamp: DateTime<Utc>,
    /// Barcode symbology, e.g. "QR_CODE"
    pub format: String,
}

impl ScanHistoryEntry {
    pub fn new(payload_text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            payload_text: payload_text.into(),
            timestamp: Utc::now(),
            format: format.into(),
        }
    }
}

/// Most-recent-first scan log, capacity-bounded
///
/// `record` is atomic: prepend and truncate happen under one lock, so
/// concurrent validations can share one history without interleaving.
#[derive(Default)]
pub struct ScanHistory {
    entries: Mutex<VecDeque<ScanHistoryEntry>>,
}

impl ScanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: ScanHistoryEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push_front(entry);
        entries.truncate(HISTORY_CAPACITY);
    }

    /// Read-only copy, newest first
    pub fn snapshot(&self) -> Vec<ScanHistoryEntry> {
        self.entries.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
