//! In-memory store implementing every persistence port.
//!
//! All tables live behind one `RwLock`, so the two-row ledger writes are
//! atomic for free. Useful for:
//! - Local development without PostgreSQL
//! - Handler and HTTP tests
//!
//! Data does not survive a restart.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::contact::ContactMessage;
use crate::domain::foundation::{
    AccountId, DomainError, ErrorCode, MessageId, PackageId, PurchaseId,
};
use crate::domain::membership::{Account, Package, Purchase};
use crate::ports::{
    AccountRepository, ContactMessageRepository, LedgerStore, PackageRepository, PurchaseReader,
};

#[derive(Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    packages: HashMap<PackageId, Package>,
    /// Insertion order.
    purchases: Vec<Purchase>,
    messages: Vec<ContactMessage>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with `DatabaseError`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("simulated write failure"));
        }
        Ok(())
    }
}

/// Version check shared by plain account updates and ledger writes.
fn swap_account(tables: &mut Tables, account: &Account) -> Result<(), DomainError> {
    let stored = tables.accounts.get_mut(&account.id).ok_or_else(|| {
        DomainError::new(
            ErrorCode::AccountNotFound,
            format!("Account not found: {}", account.id),
        )
    })?;
    if stored.version != account.version {
        return Err(DomainError::new(
            ErrorCode::ConcurrentModification,
            format!(
                "account {} is at version {}, update was based on {}",
                account.id, stored.version, account.version
            ),
        ));
    }
    let mut next = account.clone();
    next.version += 1;
    *stored = next;
    Ok(())
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        if tables.accounts.contains_key(&account.id) {
            return Err(DomainError::validation("account_id", "Account already exists"));
        }
        tables.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        swap_account(&mut tables, account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.tables.read().await.accounts.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let mut accounts: Vec<_> = self.tables.read().await.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }
}

#[async_trait]
impl PackageRepository for InMemoryStore {
    async fn save(&self, package: &Package) -> Result<(), DomainError> {
        self.check_writable()?;
        self.tables
            .write()
            .await
            .packages
            .insert(package.id, package.clone());
        Ok(())
    }

    async fn update(&self, package: &Package) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        match tables.packages.get_mut(&package.id) {
            Some(stored) => {
                *stored = package.clone();
                Ok(())
            }
            None => Err(package_not_found(&package.id)),
        }
    }

    async fn delete(&self, id: &PackageId) -> Result<(), DomainError> {
        self.check_writable()?;
        self.tables
            .write()
            .await
            .packages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| package_not_found(id))
    }

    async fn find_by_id(&self, id: &PackageId) -> Result<Option<Package>, DomainError> {
        Ok(self.tables.read().await.packages.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Package>, DomainError> {
        let mut packages: Vec<_> = self.tables.read().await.packages.values().cloned().collect();
        packages.sort_by(|a, b| a.price.cmp(&b.price).then(a.created_at.cmp(&b.created_at)));
        Ok(packages)
    }

    async fn list_active(&self) -> Result<Vec<Package>, DomainError> {
        let mut packages: Vec<_> = self
            .tables
            .read()
            .await
            .packages
            .values()
            .filter(|p| p.active)
            .cloned()
            .collect();
        packages.sort_by(|a, b| {
            a.duration_days
                .cmp(&b.duration_days)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(packages)
    }
}

fn package_not_found(id: &PackageId) -> DomainError {
    DomainError::new(ErrorCode::PackageNotFound, format!("Package not found: {}", id))
}

#[async_trait]
impl PurchaseReader for InMemoryStore {
    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .purchases
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn list_for_account(&self, account_id: &AccountId) -> Result<Vec<Purchase>, DomainError> {
        let tables = self.tables.read().await;
        // reversed first so equal timestamps keep newest-inserted first
        let mut purchases: Vec<_> = tables
            .purchases
            .iter()
            .rev()
            .filter(|p| &p.account_id == account_id)
            .cloned()
            .collect();
        purchases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(purchases)
    }

    async fn list_completed_ending_between(
        &self,
        after: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Purchase>, DomainError> {
        let mut purchases: Vec<_> = self
            .tables
            .read()
            .await
            .purchases
            .iter()
            .filter(|p| p.is_completed() && p.end_date > after && p.end_date <= until)
            .cloned()
            .collect();
        purchases.sort_by_key(|p| p.end_date);
        Ok(purchases)
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn record_purchase(
        &self,
        purchase: &Purchase,
        account: &Account,
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        swap_account(&mut tables, account)?;
        tables.purchases.push(purchase.clone());
        Ok(())
    }

    async fn remove_purchase(
        &self,
        purchase_id: &PurchaseId,
        account: &Account,
    ) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let index = tables
            .purchases
            .iter()
            .position(|p| &p.id == purchase_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::PurchaseNotFound,
                    format!("Purchase not found: {}", purchase_id),
                )
            })?;
        swap_account(&mut tables, account)?;
        tables.purchases.remove(index);
        Ok(())
    }
}

#[async_trait]
impl ContactMessageRepository for InMemoryStore {
    async fn save(&self, message: &ContactMessage) -> Result<(), DomainError> {
        self.check_writable()?;
        self.tables.write().await.messages.push(message.clone());
        Ok(())
    }

    async fn update(&self, message: &ContactMessage) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        match tables.messages.iter_mut().find(|m| m.id == message.id) {
            Some(stored) => {
                *stored = message.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MessageNotFound,
                format!("Message not found: {}", message.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ContactMessage>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .messages
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, DomainError> {
        let tables = self.tables.read().await;
        let mut messages: Vec<_> = tables.messages.iter().rev().cloned().collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }
}
