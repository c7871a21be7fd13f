//! Validation Coordinator
//!
//! One `validate()` pass per scanned ticket: primary endpoint first, the
//! secondary only on a definitive primary 404. No internal retries, strictly
//! sequential, and every path resolves to a `ValidationOutcome`.
//!
//! The "already scanned" detection relies on a free-text server message with
//! an optional trailing ISO-8601 timestamp. That contract is fragile but
//! fixed server-side; both halves of it are isolated in the two helpers at
//! the bottom so a structured status can replace them in one place.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::payload::types::TicketIdentity;
use crate::validation::traits::{EndpointTier, ValidationTransport, WireReply};
use crate::validation::types::{
    CashBody, RegularBody, TicketType, ValidationOutcome, ValidationStatus, WireMessage,
};

/// Trailing ISO-8601 timestamp at the end of a server message
static TRAILING_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{1,9})?(?:Z|[+-]\d{2}:\d{2})?)\s*$")
        .expect("trailing timestamp pattern is valid")
});

pub struct ValidationCoordinator {
    transport: Arc<dyn ValidationTransport>,
}

impl ValidationCoordinator {
    pub fn new(transport: Arc<dyn ValidationTransport>) -> Self {
        Self { transport }
    }

    /// Resolve one ticket identity to an outcome
    ///
    /// Safe to call repeatedly with the same identity: the server is the
    /// sole authority on scan-state.
    pub async fn validate(&self, identity: &TicketIdentity) -> ValidationOutcome {
        let reply = match self.transport.check(EndpointTier::Primary, identity).await {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Primary validation check failed: {}", err);
                return ValidationOutcome::error(TicketType::Regular, err.to_string());
            }
        };

        match reply.status {
            200 => self.regular_valid(reply),
            400 => self.regular_rejected(reply),
            404 => {
                log::debug!(
                    "Enrollment {} not found under regular scheme, trying cash",
                    identity.enrollment_id
                );
                self.validate_cash(identity).await
            }
            other => ValidationOutcome::error(
                TicketType::Regular,
                format!("Unexpected response ({}): {}", other, reply.body),
            ),
        }
    }

    fn regular_valid(&self, reply: WireReply) -> ValidationOutcome {
        let body: RegularBody = match serde_json::from_str(&reply.body) {
            Ok(body) => body,
            Err(err) => {
                return ValidationOutcome::error(
                    TicketType::Regular,
                    format!("Malformed response body: {}", err),
                );
            }
        };
        ValidationOutcome {
            ticket_type: TicketType::Regular,
            status: ValidationStatus::Valid,
            attendee: body.user.and_then(|u| u.into_attendee()),
            event: body.event.and_then(|e| e.into_summary()),
            scanned_at: None,
            voucher: None,
            message: body.message,
        }
    }

    fn regular_rejected(&self, reply: WireReply) -> ValidationOutcome {
        let message = serde_json::from_str::<WireMessage>(&reply.body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| reply.body.clone());

        if !is_already_scanned_message(&message) {
            return ValidationOutcome::error(TicketType::Regular, message);
        }

        ValidationOutcome {
            ticket_type: TicketType::Regular,
            status: ValidationStatus::AlreadyScanned,
            attendee: None,
            event: None,
            scanned_at: trailing_timestamp(&message),
            voucher: None,
            message: Some(message),
        }
    }

    async fn validate_cash(&self, identity: &TicketIdentity) -> ValidationOutcome {
        let reply = match self.transport.check(EndpointTier::Secondary, identity).await {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Secondary validation check failed: {}", err);
                return ValidationOutcome::error(TicketType::Cash, err.to_string());
            }
        };

        if !(200..300).contains(&reply.status) {
            return ValidationOutcome::error(
                TicketType::Cash,
                format!("Unexpected response ({}): {}", reply.status, reply.body),
            );
        }

        let body: CashBody = match serde_json::from_str(&reply.body) {
            Ok(body) => body,
            Err(err) => {
                return ValidationOutcome::error(
                    TicketType::Cash,
                    format!("Malformed response body: {}", err),
                );
            }
        };

        // The cash endpoint's own flags are authoritative; no reinterpretation
        let status = if body.is_already_scanned {
            ValidationStatus::AlreadyScanned
        } else if body.is_valid {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };

        ValidationOutcome {
            ticket_type: TicketType::Cash,
            status,
            attendee: body.user.and_then(|u| u.into_attendee()),
            event: body.event.and_then(|e| e.into_summary()),
            scanned_at: body.scanned_at,
            voucher: body.voucher,
            message: body.message,
        }
    }
}

/// Case-insensitive already-scanned marker in a free-text server message
fn is_already_scanned_message(message: &str) -> bool {
    message.to_lowercase().contains("already scanned")
        || message.to_lowercase().contains("already been scanned")
}

/// Best-effort extraction of a trailing ISO-8601 timestamp; never fabricated
fn trailing_timestamp(message: &str) -> Option<String> {
    TRAILING_TIMESTAMP
        .captures(message)
        .map(|caps| caps[1].to_string())
}
