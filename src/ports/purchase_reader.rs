//! Purchase reader port (query side).
//!
//! Purchases are written only through [`LedgerStore`](super::LedgerStore),
//! which keeps the owning account's plan status in step.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, DomainError, PurchaseId};
use crate::domain::membership::Purchase;

#[async_trait]
pub trait PurchaseReader: Send + Sync {
    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError>;

    /// An account's purchases, most recently created first.
    async fn list_for_account(&self, account_id: &AccountId) -> Result<Vec<Purchase>, DomainError>;

    /// Completed purchases with `after < end_date <= until`, soonest end first.
    async fn list_completed_ending_between(
        &self,
        after: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Purchase>, DomainError>;
}
