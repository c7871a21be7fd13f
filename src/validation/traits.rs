//! Traits for the validation layer

use async_trait::async_trait;

use crate::payload::types::TicketIdentity;
use crate::validation::error::TransportResult;

/// The two validation schemes, queried strictly in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EndpointTier {
    Primary,
    Secondary,
}

/// Raw reply from a validation endpoint
#[derive(Debug, Clone)]
pub struct WireReply {
    pub status: u16,
    pub body: String,
}

impl WireReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Injected HTTP layer for endpoint checks
///
/// The coordinator only sees status codes and bodies; auth headers, base
/// URLs and the rest of the transport plumbing live behind this seam.
#[async_trait]
pub trait ValidationTransport: Send + Sync {
    async fn check(&self, tier: EndpointTier, identity: &TicketIdentity)
        -> TransportResult<WireReply>;
}
