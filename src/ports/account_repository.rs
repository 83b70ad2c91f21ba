//! Account repository port.
//!
//! Accounts are created at sign-up and mutated by administrators. Updates
//! are guarded by the row version: an update only lands if the stored
//! version still equals `account.version`, and bumps it by one.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::membership::Account;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if an account with this id already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, account: &Account) -> Result<(), DomainError>;

    /// Update an existing account, compare-and-swap on `version`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account doesn't exist
    /// - `ConcurrentModification` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, account: &Account) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// All accounts, newest first.
    async fn list(&self) -> Result<Vec<Account>, DomainError>;
}
