//! Contact-message error types.

use crate::domain::foundation::{DomainError, ErrorCode, MessageId, ValidationError};

/// Contact-message errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Message was not found.
    NotFound(MessageId),
    /// Invalid status transition.
    InvalidState(String),
    /// Caller lacks the administrator role.
    Forbidden(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The reply was stored but the email to the visitor was not sent.
    ReplySavedEmailFailed { message_id: MessageId, reason: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ContactError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ContactError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContactError::NotFound(_) => ErrorCode::MessageNotFound,
            ContactError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ContactError::Forbidden(_) => ErrorCode::Forbidden,
            ContactError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ContactError::ReplySavedEmailFailed { .. } => ErrorCode::MailDeliveryFailed,
            ContactError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ContactError::NotFound(id) => format!("Message not found: {}", id),
            ContactError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ContactError::Forbidden(msg) => format!("Forbidden: {}", msg),
            ContactError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ContactError::ReplySavedEmailFailed { message_id, reason } => format!(
                "Reply to message {} was saved but the email failed: {}",
                message_id, reason
            ),
            ContactError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ContactError {}

impl From<ValidationError> for ContactError {
    fn from(err: ValidationError) -> Self {
        ContactError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ContactError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ContactError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => ContactError::InvalidState(err.message),
            ErrorCode::ValidationFailed => ContactError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => ContactError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ContactError> for DomainError {
    fn from(err: ContactError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
