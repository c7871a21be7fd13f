//! Validation API
//!
//! Public API for the validation system, consolidating all external exports.

pub use crate::validation::coordinator::ValidationCoordinator;
pub use crate::validation::error::{TransportError, TransportResult};
pub use crate::validation::traits::{EndpointTier, ValidationTransport, WireReply};
pub use crate::validation::transport::{EndpointConfig, HttpTransport, DEFAULT_TIMEOUT};
pub use crate::validation::types::{
    Attendee, EventSummary, TicketType, ValidationOutcome, ValidationStatus,
};
