//! Validation Transport Error Types

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network failure: {message}")]
    Network { message: String },

    #[error("Invalid endpoint configuration: {message}")]
    Configuration { message: String },
}

impl crate::core::error_handling::ContextualError for TransportError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, TransportError::Configuration { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            TransportError::Configuration { message } => Some(message),
            _ => None,
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;
