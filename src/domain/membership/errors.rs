//! Membership-specific error types.
//!
//! Errors related to accounts, packages, purchases and the ledger.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AccountNotFound / PackageNotFound / PurchaseNotFound | 404 |
//! | ValidationFailed | 400 |
//! | Forbidden | 403 |
//! | InvalidState / AccountBlacklisted / PackageInactive | 409 |
//! | ConcurrentModification | 409 |
//! | PurchaseNotActive / ZeroLengthWindow | 422 |
//! | MailDeliveryFailed | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, PackageId, PurchaseId, ValidationError,
};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// No account with this id.
    AccountNotFound(AccountId),

    /// No package with this id.
    PackageNotFound(PackageId),

    /// No purchase with this id.
    PurchaseNotFound(PurchaseId),

    /// Package exists but is not offered for sale.
    PackageInactive(PackageId),

    /// Operation refused because the account is blacklisted.
    AccountBlacklisted(AccountId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Purchase window has no length; no daily rate can be computed.
    ZeroLengthWindow(PurchaseId),

    /// Refund requested for a purchase that is not the paid, unexpired one.
    PurchaseNotActive(PurchaseId),

    /// The account row changed between read and write.
    ConcurrentModification(String),

    /// Caller lacks the role for this operation.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// The mail relay could not deliver.
    MailDeliveryFailed(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::AccountNotFound(_) => ErrorCode::AccountNotFound,
            MembershipError::PackageNotFound(_) => ErrorCode::PackageNotFound,
            MembershipError::PurchaseNotFound(_) => ErrorCode::PurchaseNotFound,
            MembershipError::PackageInactive(_) => ErrorCode::PackageInactive,
            MembershipError::AccountBlacklisted(_) => ErrorCode::AccountBlacklisted,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::ZeroLengthWindow(_) => ErrorCode::ZeroLengthWindow,
            MembershipError::PurchaseNotActive(_) => ErrorCode::PurchaseNotActive,
            MembershipError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            MembershipError::Forbidden(_) => ErrorCode::Forbidden,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::MailDeliveryFailed(_) => ErrorCode::MailDeliveryFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::AccountNotFound(id) => format!("Account not found: {}", id),
            MembershipError::PackageNotFound(id) => format!("Package not found: {}", id),
            MembershipError::PurchaseNotFound(id) => format!("Purchase not found: {}", id),
            MembershipError::PackageInactive(id) => {
                format!("Package {} is not available for purchase", id)
            }
            MembershipError::AccountBlacklisted(id) => format!("Account {} is blacklisted", id),
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} account in {} state", attempted, current)
            }
            MembershipError::ZeroLengthWindow(id) => {
                format!("Purchase {} has a zero-length billing window", id)
            }
            MembershipError::PurchaseNotActive(id) => {
                format!("Purchase {} is not the active, paid plan", id)
            }
            MembershipError::ConcurrentModification(msg) => {
                format!("Concurrent modification: {}", msg)
            }
            MembershipError::Forbidden(msg) => format!("Forbidden: {}", msg),
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::MailDeliveryFailed(msg) => format!("Email delivery failed: {}", msg),
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        MembershipError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // a row that was read and then vanished before the write
            ErrorCode::ConcurrentModification
            | ErrorCode::AccountNotFound
            | ErrorCode::PackageNotFound
            | ErrorCode::PurchaseNotFound => MembershipError::ConcurrentModification(err.message),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => MembershipError::Forbidden(err.message),
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => MembershipError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            ErrorCode::MailDeliveryFailed => MembershipError::MailDeliveryFailed(err.message),
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
