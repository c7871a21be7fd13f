//! Payload Classification Component
//!
//! Classifies decoded QR text as a structured (URL-shaped) or opaque payload
//! and extracts a ticket identity when the required query fields are present.
//! A payload without a ticket identity is a classification outcome, not an
//! error: the text is still shown to the operator and recorded in history.

pub mod parser;
pub mod types;

pub use parser::{extract_ticket_identity, parse};
pub use types::{DecodedPayload, PayloadKind, TicketIdentity};
