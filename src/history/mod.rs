//! Scan History Component
//!
//! Bounded, most-recent-first log of past scans for operator review. Scoped
//! to the session lifetime; never persisted.

pub mod history;

pub use history::{ScanHistory, ScanHistoryEntry, HISTORY_CAPACITY};
