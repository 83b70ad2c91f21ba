//! Authentication types for the domain layer.
//!
//! An [`AuthenticatedUser`] is the explicit session context handed to every
//! operation that needs to know who is calling. It is populated by a
//! `SessionValidator` adapter from the identity provider's token and carries
//! only the account id, email and role; token internals never reach handlers.

use super::{AccountId, DomainError, ErrorCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role granted to a session by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// Authenticated caller extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Account identifier from the token subject.
    pub id: AccountId,

    /// Email address from the token claims.
    pub email: String,

    /// Role claim; absent claims map to `Member`.
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(id: AccountId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with `Forbidden` unless the caller is an administrator.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Administrator role required",
            )
            .with_detail("account_id", self.id.as_str()))
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
