//! RemovePurchaseHandler - Deletes a purchase and recomputes the plan.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AuthenticatedUser, PurchaseId};
use crate::domain::membership::{Account, MembershipError, Purchase};
use crate::ports::{AccountRepository, LedgerStore, PurchaseReader};

#[derive(Debug, Clone)]
pub struct RemovePurchaseCommand {
    pub actor: AuthenticatedUser,
    pub purchase_id: PurchaseId,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct RemovePurchaseResult {
    pub removed: Purchase,
    pub account: Account,
}

/// Removes a purchase and re-derives the owner's plan status from the
/// purchases that remain.
pub struct RemovePurchaseHandler {
    accounts: Arc<dyn AccountRepository>,
    purchases: Arc<dyn PurchaseReader>,
    ledger: Arc<dyn LedgerStore>,
}

impl RemovePurchaseHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        purchases: Arc<dyn PurchaseReader>,
        ledger: Arc<dyn LedgerStore>,
    ) -> Self {
        Self {
            accounts,
            purchases,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        cmd: RemovePurchaseCommand,
    ) -> Result<RemovePurchaseResult, MembershipError> {
        cmd.actor.require_admin()?;

        let removed = self
            .purchases
            .find_by_id(&cmd.purchase_id)
            .await?
            .ok_or(MembershipError::PurchaseNotFound(cmd.purchase_id))?;

        let mut account = self
            .accounts
            .find_by_id(&removed.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(removed.account_id.clone()))?;

        let remaining: Vec<Purchase> = self
            .purchases
            .list_for_account(&account.id)
            .await?
            .into_iter()
            .filter(|p| p.id != removed.id)
            .collect();

        account.apply_purchase_removal(&remaining, cmd.today);
        self.ledger.remove_purchase(&removed.id, &account).await?;
        account.version += 1;

        tracing::info!(
            account_id = %account.id,
            purchase_id = %removed.id,
            plan_status = %account.plan_status,
            remaining = remaining.len(),
            admin = %cmd.actor.id,
            "Purchase removed"
        );

        Ok(RemovePurchaseResult { removed, account })
    }
}
