//! In-process session validator for tests and local development.
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_member("member-token", "acc-1")
//!     .with_admin("admin-token", "admin-1");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, AuthError, AuthenticatedUser, Role};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Registers a member with a derived `<id>@test.example.com` address.
    ///
    /// Panics on an empty id; test helper only.
    pub fn with_member(self, token: impl Into<String>, account_id: &str) -> Self {
        self.with_user(token, test_user(account_id, Role::Member))
    }

    pub fn with_admin(self, token: impl Into<String>, account_id: &str) -> Self {
        self.with_user(token, test_user(account_id, Role::Admin))
    }

    /// Every validation fails with `error` until cleared.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut slot) = self.force_error.write() {
            *slot = Some(error);
        }
        self
    }

    pub fn clear_error(&self) {
        if let Ok(mut slot) = self.force_error.write() {
            *slot = None;
        }
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
    }

    pub fn remove_token(&self, token: &str) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.remove(token);
        }
    }
}

fn test_user(account_id: &str, role: Role) -> AuthenticatedUser {
    let id = AccountId::new(account_id).expect("test account id must be non-empty");
    AuthenticatedUser::new(id, format!("{}@test.example.com", account_id), role)
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let forced = self
            .force_error
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator poisoned"))?
            .clone();
        if let Some(error) = forced {
            return Err(error);
        }

        self.tokens
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator poisoned"))?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
