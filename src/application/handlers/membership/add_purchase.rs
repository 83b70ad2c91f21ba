//! AddPurchaseHandler - Records a taken payment against an account.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, AuthenticatedUser, PackageId, PurchaseId};
use crate::domain::membership::{
    Account, MembershipError, PaymentMethod, PaymentStatus, Purchase,
};
use crate::ports::{AccountRepository, LedgerStore, PackageRepository, PurchaseReader};

#[derive(Debug, Clone)]
pub struct AddPurchaseCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub package_id: PackageId,
    pub start_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct AddPurchaseResult {
    pub purchase: Purchase,
    pub account: Account,
}

/// Handler for recording purchases.
///
/// Copies name, price and duration from the package so later package edits
/// leave the history untouched. The purchase row and the account's plan
/// status are written together. The status is recomputed from the whole
/// history, so a backdated purchase that has already ended stays inactive.
pub struct AddPurchaseHandler {
    accounts: Arc<dyn AccountRepository>,
    packages: Arc<dyn PackageRepository>,
    purchases: Arc<dyn PurchaseReader>,
    ledger: Arc<dyn LedgerStore>,
}

impl AddPurchaseHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        packages: Arc<dyn PackageRepository>,
        purchases: Arc<dyn PurchaseReader>,
        ledger: Arc<dyn LedgerStore>,
    ) -> Self {
        Self {
            accounts,
            packages,
            purchases,
            ledger,
        }
    }

    pub async fn handle(&self, cmd: AddPurchaseCommand) -> Result<AddPurchaseResult, MembershipError> {
        cmd.actor.require_admin()?;

        let mut account = self
            .accounts
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(cmd.account_id.clone()))?;

        let package = self
            .packages
            .find_by_id(&cmd.package_id)
            .await?
            .ok_or(MembershipError::PackageNotFound(cmd.package_id))?;

        let purchase = Purchase::from_package(
            PurchaseId::new(),
            account.id.clone(),
            &package,
            cmd.start_date,
            PaymentStatus::Completed,
            cmd.payment_method,
            cmd.transaction_id,
        )?;

        let earlier = self.purchases.list_for_account(&account.id).await?;
        account.apply_purchase(&purchase, &earlier, cmd.today)?;
        self.ledger.record_purchase(&purchase, &account).await?;
        account.version += 1;

        tracing::info!(
            account_id = %account.id,
            purchase_id = %purchase.id,
            package = %purchase.package_name,
            end_date = %purchase.end_date,
            plan_status = ?account.plan_status,
            admin = %cmd.actor.id,
            "Purchase added"
        );

        Ok(AddPurchaseResult { purchase, account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::{
        admin, date, member, seed_account, seed_package,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::membership::{ledger, PlanStatus};
    use crate::ports::PurchaseReader;

    fn handler(store: &Arc<InMemoryStore>) -> AddPurchaseHandler {
        AddPurchaseHandler::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    fn command(account_id: &AccountId, package_id: PackageId) -> AddPurchaseCommand {
        AddPurchaseCommand {
            actor: admin(),
            account_id: account_id.clone(),
            package_id,
            start_date: date(2024, 1, 1),
            payment_method: PaymentMethod::Upi,
            transaction_id: Some("  UPI-991 ".to_string()),
            today: date(2024, 1, 10),
        }
    }

    #[tokio::test]
    async fn completed_purchase_activates_plan() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, true).await;

        let result = handler(&store)
            .handle(command(&account.id, package.id))
            .await
            .unwrap();

        assert_eq!(result.account.plan_status, PlanStatus::Active);
        assert_eq!(result.purchase.end_date, date(2024, 1, 31));
        assert_eq!(result.purchase.amount, 3000);
        assert_eq!(result.purchase.transaction_id.as_deref(), Some("UPI-991"));

        let stored = AccountRepository::find_by_id(store.as_ref(), &account.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.plan_status, PlanStatus::Active);
        assert_eq!(stored.version, result.account.version);

        let purchases = store.list_for_account(&account.id).await.unwrap();
        assert_eq!(purchases.len(), 1);
    }

    #[tokio::test]
    async fn backdated_expired_purchase_does_not_activate() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, true).await;

        let mut cmd = command(&account.id, package.id);
        cmd.start_date = date(2020, 1, 1);
        let result = handler(&store).handle(cmd).await.unwrap();

        assert_eq!(result.purchase.end_date, date(2020, 1, 31));
        assert_eq!(result.account.plan_status, PlanStatus::Inactive);

        let stored = AccountRepository::find_by_id(store.as_ref(), &account.id)
            .await
            .unwrap()
            .unwrap();
        let history = store.list_for_account(&account.id).await.unwrap();
        assert_eq!(
            stored.plan_status,
            ledger::reconciled_plan_status(&history, date(2024, 1, 10))
        );
    }

    #[tokio::test]
    async fn expired_addition_keeps_current_plan_active() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, true).await;

        handler(&store)
            .handle(command(&account.id, package.id))
            .await
            .unwrap();

        let mut cmd = command(&account.id, package.id);
        cmd.start_date = date(2020, 1, 1);
        let result = handler(&store).handle(cmd).await.unwrap();
        assert_eq!(result.account.plan_status, PlanStatus::Active);
    }

    #[tokio::test]
    async fn inactive_package_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, false).await;

        let err = handler(&store)
            .handle(command(&account.id, package.id))
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::PackageInactive(_)));
        assert!(store.list_for_account(&account.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_account_and_package_are_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, true).await;

        let missing_account = AccountId::new("ghost").unwrap();
        let err = handler(&store)
            .handle(command(&missing_account, package.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AccountNotFound);

        let err = handler(&store)
            .handle(command(&account.id, PackageId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PackageNotFound);
    }

    #[tokio::test]
    async fn blacklisted_account_cannot_purchase() {
        let store = Arc::new(InMemoryStore::new());
        let mut account = seed_account(&store, "acc-1").await;
        account.blacklist("unpaid dues").unwrap();
        AccountRepository::update(store.as_ref(), &account).await.unwrap();
        let package = seed_package(&store, true).await;

        let err = handler(&store)
            .handle(command(&account.id, package.id))
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::AccountBlacklisted(_)));
    }

    #[tokio::test]
    async fn members_cannot_record_purchases() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, true).await;

        let mut cmd = command(&account.id, package.id);
        cmd.actor = member("acc-1");
        let err = handler(&store).handle(cmd).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn failed_write_leaves_no_purchase() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let package = seed_package(&store, true).await;
        store.fail_writes(true);

        let err = handler(&store)
            .handle(command(&account.id, package.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DatabaseError);

        store.fail_writes(false);
        assert!(store.list_for_account(&account.id).await.unwrap().is_empty());
    }
}
