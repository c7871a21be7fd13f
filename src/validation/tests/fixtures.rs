//! Validation test doubles

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::payload::types::TicketIdentity;
use crate::validation::error::{TransportError, TransportResult};
use crate::validation::traits::{EndpointTier, ValidationTransport, WireReply};

/// Scripted transport recording every call it receives
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<TransportResult<WireReply>>>,
    pub calls: Mutex<Vec<EndpointTier>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(WireReply::new(status, body)));
    }

    pub fn push_failure(&self, err: TransportError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<EndpointTier> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValidationTransport for ScriptedTransport {
    async fn check(
        &self,
        tier: EndpointTier,
        _identity: &TicketIdentity,
    ) -> TransportResult<WireReply> {
        self.calls.lock().unwrap().push(tier);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    message: "script exhausted".to_string(),
                })
            })
    }
}

pub fn sample_identity() -> TicketIdentity {
    TicketIdentity {
        enrollment_id: "E1".to_string(),
        event_id: "EV1".to_string(),
        phone: "999".to_string(),
        user_id: None,
    }
}
