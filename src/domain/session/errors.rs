//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Errors raised by session lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Role, ownership, or live-state gate failed. Never silently downgraded.
    Forbidden(String),
    /// Data-integrity defect: a persisted session without a room id.
    MissingRoomId,
    /// The external room provider failed to issue a join URL.
    Provisioning(String),
    /// Validation failed.
    ValidationFailed { message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        SessionError::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::Forbidden(msg) => msg.clone(),
            SessionError::MissingRoomId => {
                "No room is assigned to this session, please contact admin".to_string()
            }
            SessionError::Provisioning(msg) => format!("Room provisioning failed: {}", msg),
            SessionError::ValidationFailed { message } => {
                format!("Validation failed: {}", message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => SessionError::Forbidden(err.message),
            ErrorCode::MissingRoomId => SessionError::MissingRoomId,
            ErrorCode::ProvisioningError => SessionError::Provisioning(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                SessionError::ValidationFailed {
                    message: err.message,
                }
            }
            _ => SessionError::Infrastructure(err.message),
        }
    }
}
