//! ValidationCoordinator protocol tests

use std::sync::Arc;

use crate::validation::coordinator::ValidationCoordinator;
use crate::validation::error::TransportError;
use crate::validation::tests::fixtures::{sample_identity, ScriptedTransport};
use crate::validation::traits::EndpointTier;
use crate::validation::types::{TicketType, ValidationStatus};

fn coordinator(transport: Arc<ScriptedTransport>) -> ValidationCoordinator {
    ValidationCoordinator::new(transport)
}

#[tokio::test]
async fn test_primary_200_is_a_valid_regular_ticket() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(
        200,
        r#"{"user":{"name":"Dana","phone":"999"},"event":{"name":"Expo","startDate":"2024-05-01","endDate":"2024-05-02"}}"#,
    );
    let outcome = coordinator(transport.clone())
        .validate(&sample_identity())
        .await;

    assert_eq!(outcome.status, ValidationStatus::Valid);
    assert_eq!(outcome.ticket_type, TicketType::Regular);
    assert_eq!(outcome.attendee.unwrap().name, "Dana");
    let event = outcome.event.unwrap();
    assert_eq!(event.name, "Expo");
    assert_eq!(event.start_date.as_deref(), Some("2024-05-01"));
    // Definitive primary answer: the secondary was never queried
    assert_eq!(transport.calls(), vec![EndpointTier::Primary]);
}

#[tokio::test]
async fn test_primary_400_already_scanned_extracts_trailing_timestamp() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(
        400,
        r#"{"message":"This ticket has already been scanned at 2024-01-01T10:00:00.000Z"}"#,
    );
    let outcome = coordinator(transport.clone())
        .validate(&sample_identity())
        .await;

    assert_eq!(outcome.status, ValidationStatus::AlreadyScanned);
    assert_eq!(outcome.ticket_type, TicketType::Regular);
    assert_eq!(outcome.scanned_at.as_deref(), Some("2024-01-01T10:00:00.000Z"));
    assert_eq!(transport.calls(), vec![EndpointTier::Primary]);
}

#[tokio::test]
async fn test_already_scanned_marker_is_case_insensitive() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(400, r#"{"message":"ALREADY SCANNED"}"#);
    let outcome = coordinator(transport).validate(&sample_identity()).await;

    assert_eq!(outcome.status, ValidationStatus::AlreadyScanned);
    // No timestamp in the message, none fabricated
    assert_eq!(outcome.scanned_at, None);
}

#[tokio::test]
async fn test_400_without_marker_is_an_error_with_message_passthrough() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(400, r#"{"message":"Ticket was refunded"}"#);
    let outcome = coordinator(transport).validate(&sample_identity()).await;

    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(outcome.message.as_deref(), Some("Ticket was refunded"));
}

#[tokio::test]
async fn test_primary_404_falls_back_to_secondary_exactly_once() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(404, "");
    transport.push_reply(
        200,
        r#"{"isValid":true,"isAlreadyScanned":false,"user":{"name":"Robin","phone":"111"},"voucher":"V-42"}"#,
    );
    let outcome = coordinator(transport.clone())
        .validate(&sample_identity())
        .await;

    assert_eq!(outcome.status, ValidationStatus::Valid);
    assert_eq!(outcome.ticket_type, TicketType::Cash);
    assert_eq!(outcome.voucher.as_deref(), Some("V-42"));
    assert_eq!(
        transport.calls(),
        vec![EndpointTier::Primary, EndpointTier::Secondary]
    );
}

#[tokio::test]
async fn test_secondary_flags_are_authoritative() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(404, "");
    transport.push_reply(
        200,
        r#"{"isValid":false,"isAlreadyScanned":true,"scannedAt":"2024-02-02T08:30:00Z"}"#,
    );
    let outcome = coordinator(transport).validate(&sample_identity()).await;

    assert_eq!(outcome.status, ValidationStatus::AlreadyScanned);
    assert_eq!(outcome.ticket_type, TicketType::Cash);
    assert_eq!(outcome.scanned_at.as_deref(), Some("2024-02-02T08:30:00Z"));
}

#[tokio::test]
async fn test_secondary_invalid_when_both_flags_false() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(404, "");
    transport.push_reply(200, r#"{"isValid":false,"isAlreadyScanned":false}"#);
    let outcome = coordinator(transport).validate(&sample_identity()).await;

    assert_eq!(outcome.status, ValidationStatus::Invalid);
    assert_eq!(outcome.ticket_type, TicketType::Cash);
}

#[tokio::test]
async fn test_primary_transport_failure_is_an_error_outcome() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_failure(TransportError::Timeout);
    let outcome = coordinator(transport.clone())
        .validate(&sample_identity())
        .await;

    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(outcome.ticket_type, TicketType::Regular);
    assert!(outcome.message.unwrap().contains("timed out"));
    // A transport failure is not a 404; no fallback happens
    assert_eq!(transport.calls(), vec![EndpointTier::Primary]);
}

#[tokio::test]
async fn test_primary_5xx_is_an_error_without_fallback() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(503, "service unavailable");
    let outcome = coordinator(transport.clone())
        .validate(&sample_identity())
        .await;

    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(transport.calls(), vec![EndpointTier::Primary]);
}

#[tokio::test]
async fn test_malformed_primary_body_is_an_error_outcome() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(200, "not json at all");
    let outcome = coordinator(transport).validate(&sample_identity()).await;

    assert_eq!(outcome.status, ValidationStatus::Error);
    assert!(outcome.message.unwrap().contains("Malformed"));
}

#[tokio::test]
async fn test_malformed_secondary_body_is_a_cash_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(404, "");
    transport.push_reply(200, "<html>oops</html>");
    let outcome = coordinator(transport).validate(&sample_identity()).await;

    assert_eq!(outcome.status, ValidationStatus::Error);
    assert_eq!(outcome.ticket_type, TicketType::Cash);
}

#[tokio::test]
async fn test_repeat_validation_queries_the_server_again() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_reply(200, r#"{"user":{"name":"Dana","phone":"999"}}"#);
    transport.push_reply(
        400,
        r#"{"message":"has already been scanned at 2024-01-01T10:00:00.000Z"}"#,
    );
    let coordinator = coordinator(transport.clone());
    let identity = sample_identity();

    let first = coordinator.validate(&identity).await;
    let second = coordinator.validate(&identity).await;

    // The client holds no local scan-state; the server decides each time
    assert_eq!(first.status, ValidationStatus::Valid);
    assert_eq!(second.status, ValidationStatus::AlreadyScanned);
    assert_eq!(
        transport.calls(),
        vec![EndpointTier::Primary, EndpointTier::Primary]
    );
}
