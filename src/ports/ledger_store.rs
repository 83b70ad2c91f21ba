//! Ledger store port - atomic purchase writes.
//!
//! Adding or removing a purchase always changes two rows: the purchase and
//! the owning account's plan status. Implementations commit both or
//! neither, and guard the account write with a compare-and-swap on its row
//! version so two administrators acting on the same account cannot
//! silently overwrite each other.
//!
//! # Example
//!
//! ```ignore
//! let mut account = accounts.find_by_id(&purchase.account_id).await?.ok_or(..)?;
//! let earlier = purchases.list_for_account(&account.id).await?;
//! account.apply_purchase(&purchase, &earlier, today)?;
//! ledger.record_purchase(&purchase, &account).await?; // both rows or none
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PurchaseId};
use crate::domain::membership::{Account, Purchase};

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert `purchase` and write `account` in one transaction.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if `account.version` is stale (nothing is written)
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn record_purchase(&self, purchase: &Purchase, account: &Account)
        -> Result<(), DomainError>;

    /// Delete the purchase and write `account` in one transaction.
    ///
    /// # Errors
    ///
    /// - `PurchaseNotFound` if the purchase is already gone
    /// - `ConcurrentModification` if `account.version` is stale
    /// - `DatabaseError` on persistence failure
    async fn remove_purchase(&self, purchase_id: &PurchaseId, account: &Account)
        -> Result<(), DomainError>;
}
