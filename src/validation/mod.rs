//! Ticket Validation Component
//!
//! Resolves a scanned ticket identity against the two-tier validation
//! backend: the primary ("regular") endpoint first, then the secondary
//! ("cash") endpoint only when the primary definitively reports not-found.
//! The differently-shaped responses are normalised into one outcome type.
//!
//! ## Core Features
//!
//! - **Sequential Fallback**: primary, then secondary on 404; never both
//!   concurrently, never the secondary after a definitive primary answer
//! - **Total Outcomes**: every code path yields a `ValidationOutcome`;
//!   nothing escapes the coordinator boundary
//! - **Server Authority**: the client never marks anything scanned locally,
//!   so repeat validation of the same identity is always safe

pub mod coordinator;
pub mod error;
pub mod traits;
pub mod transport;
pub mod types;

pub mod api;

#[cfg(test)]
mod tests;
