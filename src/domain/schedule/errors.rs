//! Schedule-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ScheduleId};

/// Errors raised by schedule operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Schedule was not found.
    NotFound(ScheduleId),
    /// Caller's role or ownership does not permit the operation.
    Forbidden(String),
    /// Invalid state for the requested transition.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ScheduleError {
    pub fn not_found(id: ScheduleId) -> Self {
        ScheduleError::NotFound(id)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ScheduleError::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ScheduleError::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ScheduleError::NotFound(id) => format!("Schedule not found: {}", id),
            ScheduleError::Forbidden(msg) => msg.clone(),
            ScheduleError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ScheduleError::ValidationFailed { message } => {
                format!("Validation failed: {}", message)
            }
            ScheduleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScheduleError {}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ScheduleError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => ScheduleError::InvalidState(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                ScheduleError::ValidationFailed {
                    message: err.message,
                }
            }
            _ => ScheduleError::Infrastructure(err.message),
        }
    }
}
