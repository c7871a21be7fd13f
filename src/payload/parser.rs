//! Payload Parser
//!
//! Untrusted scanned text comes in, a classified payload comes out. URL
//! parsing is the only structure we recognise; everything else is opaque.

use reqwest::Url;

use crate::payload::types::{DecodedPayload, PayloadKind, TicketIdentity};

/// Classify decoded text
///
/// Text that parses as a URL is `Structured` with its query parameters in
/// insertion order; anything else is `Opaque` with no fields.
pub fn parse(text: &str) -> DecodedPayload {
    match Url::parse(text) {
        Ok(url) => {
            let fields = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            DecodedPayload {
                raw_text: text.to_string(),
                kind: PayloadKind::Structured,
                fields,
                host: url.host_str().map(|h| h.to_string()),
                path: Some(url.path().to_string()),
            }
        }
        Err(err) => {
            log::trace!("Payload is not URL-shaped ({}), treating as opaque", err);
            DecodedPayload {
                raw_text: text.to_string(),
                kind: PayloadKind::Opaque,
                fields: Vec::new(),
                host: None,
                path: None,
            }
        }
    }
}

/// Extract a ticket identity from a structured payload
///
/// `enrollmentId` falls back to `id` (first non-empty wins); `eventId` and
/// `phone` are required; `userId` is optional. Returns `None` when any
/// required field is missing, which classifies the payload as non-ticket.
pub fn extract_ticket_identity(payload: &DecodedPayload) -> Option<TicketIdentity> {
    if payload.kind != PayloadKind::Structured {
        return None;
    }

    let enrollment_id = payload
        .field("enrollmentId")
        .or_else(|| payload.field("id"))?;
    let event_id = payload.field("eventId")?;
    let phone = payload.field("phone")?;

    Some(TicketIdentity {
        enrollment_id: enrollment_id.to_string(),
        event_id: event_id.to_string(),
        phone: phone.to_string(),
        user_id: payload.field("userId").map(|v| v.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_url_text_is_opaque() {
        let payload = parse("hello-world");
        assert_eq!(payload.kind, PayloadKind::Opaque);
        assert!(payload.fields.is_empty());
        assert_eq!(payload.raw_text, "hello-world");
    }

    #[test]
    fn test_url_text_is_structured_with_ordered_fields() {
        let payload = parse("https://x.test/t?b=2&a=1&c=3");
        assert_eq!(payload.kind, PayloadKind::Structured);
        assert_eq!(
            payload.fields,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(payload.host.as_deref(), Some("x.test"));
        assert_eq!(payload.path.as_deref(), Some("/t"));
    }

    #[test]
    fn test_full_ticket_identity_extraction() {
        let payload = parse("https://x.test/t?enrollmentId=E1&eventId=EV1&phone=999");
        let identity = extract_ticket_identity(&payload).unwrap();
        assert_eq!(identity.enrollment_id, "E1");
        assert_eq!(identity.event_id, "EV1");
        assert_eq!(identity.phone, "999");
        assert_eq!(identity.user_id, None);
    }

    #[test]
    fn test_id_alias_used_when_enrollment_id_absent() {
        let payload = parse("https://x.test/t?id=E2&eventId=EV1&phone=999&userId=U7");
        let identity = extract_ticket_identity(&payload).unwrap();
        assert_eq!(identity.enrollment_id, "E2");
        assert_eq!(identity.user_id.as_deref(), Some("U7"));
    }

    #[test]
    fn test_empty_enrollment_id_falls_through_to_alias() {
        let payload = parse("https://x.test/t?enrollmentId=&id=E3&eventId=EV1&phone=999");
        let identity = extract_ticket_identity(&payload).unwrap();
        assert_eq!(identity.enrollment_id, "E3");
    }

    #[test]
    fn test_missing_required_field_yields_none() {
        // no phone
        let payload = parse("https://x.test/t?enrollmentId=E1&eventId=EV1");
        assert!(extract_ticket_identity(&payload).is_none());
        // no eventId
        let payload = parse("https://x.test/t?enrollmentId=E1&phone=999");
        assert!(extract_ticket_identity(&payload).is_none());
        // neither id alias
        let payload = parse("https://x.test/t?eventId=EV1&phone=999");
        assert!(extract_ticket_identity(&payload).is_none());
    }

    #[test]
    fn test_opaque_payload_never_yields_identity() {
        let payload = parse("enrollmentId=E1&eventId=EV1&phone=999");
        assert_eq!(payload.kind, PayloadKind::Opaque);
        assert!(extract_ticket_identity(&payload).is_none());
    }
}
