//! HTTP Validation Transport
//!
//! Production `ValidationTransport` over reqwest with a bounded timeout.
//! Query parameters follow the endpoint contract:
//! `{enrollmentId, eventId, phone, userId?}`.

use std::time::Duration;

use async_trait::async_trait;

use crate::payload::types::TicketIdentity;
use crate::validation::error::{TransportError, TransportResult};
use crate::validation::traits::{EndpointTier, ValidationTransport, WireReply};

/// Default bound on each endpoint call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint URLs and the per-request timeout
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub primary_url: String,
    pub secondary_url: String,
    pub timeout: Duration,
}

impl EndpointConfig {
    pub fn new(primary_url: impl Into<String>, secondary_url: impl Into<String>) -> Self {
        Self {
            primary_url: primary_url.into(),
            secondary_url: secondary_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    config: EndpointConfig,
}

impl HttpTransport {
    pub fn new(config: EndpointConfig) -> TransportResult<Self> {
        for url in [&config.primary_url, &config.secondary_url] {
            reqwest::Url::parse(url).map_err(|err| TransportError::Configuration {
                message: format!("Invalid endpoint URL '{}': {}", url, err),
            })?;
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::Network {
                message: err.to_string(),
            })?;
        Ok(Self { client, config })
    }

    fn url_for(&self, tier: EndpointTier) -> &str {
        match tier {
            EndpointTier::Primary => &self.config.primary_url,
            EndpointTier::Secondary => &self.config.secondary_url,
        }
    }
}

#[async_trait]
impl ValidationTransport for HttpTransport {
    async fn check(
        &self,
        tier: EndpointTier,
        identity: &TicketIdentity,
    ) -> TransportResult<WireReply> {
        let mut query: Vec<(&str, &str)> = vec![
            ("enrollmentId", identity.enrollment_id.as_str()),
            ("eventId", identity.event_id.as_str()),
            ("phone", identity.phone.as_str()),
        ];
        if let Some(user_id) = &identity.user_id {
            query.push(("userId", user_id.as_str()));
        }

        log::debug!("Checking {} endpoint for enrollment {}", tier, identity.enrollment_id);
        let response = self
            .client
            .get(self.url_for(tier))
            .query(&query)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_reqwest_error)?;
        Ok(WireReply { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_url_is_rejected_at_construction() {
        let config = EndpointConfig::new("not a url", "https://api.example.test/cash");
        match HttpTransport::new(config) {
            Err(TransportError::Configuration { message }) => {
                assert!(message.contains("not a url"));
            }
            other => panic!("expected configuration error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_timeout_is_configurable() {
        let config = EndpointConfig::new(
            "https://api.example.test/enrollments/validate",
            "https://api.example.test/cash-tickets/validate",
        )
        .with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(HttpTransport::new(config).is_ok());
    }
}
