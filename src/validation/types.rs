//! Validation Types
//!
//! The normalised outcome type plus the wire shapes of the two endpoints.
//! `status` is a single exclusive tag; it determines which optional fields
//! are meaningful (`scanned_at` only under `AlreadyScanned`).

/// Which validation scheme resolved the ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum_macros::Display)]
pub enum TicketType {
    Regular,
    Cash,
}

/// Exclusive outcome tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum_macros::Display)]
pub enum ValidationStatus {
    Valid,
    AlreadyScanned,
    Invalid,
    Error,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Attendee {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EventSummary {
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Normalised result of one `validate()` pass
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationOutcome {
    pub ticket_type: TicketType,
    pub status: ValidationStatus,
    pub attendee: Option<Attendee>,
    pub event: Option<EventSummary>,
    /// When the ticket was first admitted; only present under `AlreadyScanned`
    /// and only when the server message carried a timestamp
    pub scanned_at: Option<String>,
    pub voucher: Option<String>,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn error(ticket_type: TicketType, message: impl Into<String>) -> Self {
        Self {
            ticket_type,
            status: ValidationStatus::Error,
            attendee: None,
            event: None,
            scanned_at: None,
            voucher: None,
            message: Some(message.into()),
        }
    }
}

/// 200 body of the primary ("regular") endpoint
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegularBody {
    pub user: Option<WireUser>,
    pub event: Option<WireEvent>,
    pub message: Option<String>,
}

/// Error body of the primary endpoint (free-text message)
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct WireMessage {
    pub message: Option<String>,
}

/// Body of the secondary ("cash") endpoint; its own flags are authoritative
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CashBody {
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub is_already_scanned: bool,
    pub user: Option<WireUser>,
    pub event: Option<WireEvent>,
    pub scanned_at: Option<String>,
    pub voucher: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireUser {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEvent {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl WireUser {
    pub(crate) fn into_attendee(self) -> Option<Attendee> {
        self.name.map(|name| Attendee {
            name,
            phone: self.phone.unwrap_or_default(),
        })
    }
}

impl WireEvent {
    pub(crate) fn into_summary(self) -> Option<EventSummary> {
        self.name.map(|name| EventSummary {
            name,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}
