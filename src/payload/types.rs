//! Payload Types

/// How a decoded payload classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PayloadKind {
    /// URL-shaped text; query parameters are the data surface
    Structured,
    /// Anything else; accepted and displayed, never validated
    Opaque,
}

/// A decoded payload, discarded once an outcome or history entry is produced
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    pub raw_text: String,
    pub kind: PayloadKind,
    /// Query parameters in insertion order
    pub fields: Vec<(String, String)>,
    /// Host and path retained for diagnostics only
    pub host: Option<String>,
    pub path: Option<String>,
}

impl DecodedPayload {
    /// First non-empty value for a field name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal field tuple needed to look up an admission record server-side
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TicketIdentity {
    pub enrollment_id: String,
    pub event_id: String,
    pub phone: String,
    pub user_id: Option<String>,
}
