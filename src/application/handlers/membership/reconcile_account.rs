//! ReconcileAccountHandler - Recomputes plan status from the purchase history.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, AuthenticatedUser};
use crate::domain::membership::{Account, MembershipError};
use crate::ports::{AccountRepository, PurchaseReader};

#[derive(Debug, Clone)]
pub struct ReconcileAccountCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ReconcileAccountResult {
    pub account: Account,
    /// False when the stored status already matched.
    pub changed: bool,
}

/// Plans lapse silently when their end date passes; this brings the stored
/// flag back in line. Writes only when the status actually changes.
pub struct ReconcileAccountHandler {
    accounts: Arc<dyn AccountRepository>,
    purchases: Arc<dyn PurchaseReader>,
}

impl ReconcileAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, purchases: Arc<dyn PurchaseReader>) -> Self {
        Self {
            accounts,
            purchases,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcileAccountCommand,
    ) -> Result<ReconcileAccountResult, MembershipError> {
        cmd.actor.require_admin()?;

        let mut account = self
            .accounts
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(cmd.account_id.clone()))?;
        let purchases = self.purchases.list_for_account(&account.id).await?;

        let before = account.plan_status;
        account.reconcile(&purchases, cmd.today);
        let changed = before != account.plan_status;

        if changed {
            self.accounts.update(&account).await?;
            account.version += 1;
            tracing::info!(
                account_id = %account.id,
                from = %before,
                to = %account.plan_status,
                "Plan status reconciled"
            );
        }

        Ok(ReconcileAccountResult { account, changed })
    }
}
