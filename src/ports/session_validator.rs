//! Session validation port.
//!
//! The identity provider issues access tokens; this service only checks
//! them and extracts who is calling. Implementations exist for HS256 JWTs
//! and for tests.
//!
//! All implementations MUST check the signature and expiry, and the
//! issuer/audience when they are configured.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts the caller's identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
