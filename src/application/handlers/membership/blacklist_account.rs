//! BlacklistAccountHandler - Bans an account and revokes its plan.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, AuthenticatedUser};
use crate::domain::membership::{Account, MembershipError};
use crate::ports::AccountRepository;

#[derive(Debug, Clone)]
pub struct BlacklistAccountCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub reason: String,
}

/// Blacklisting forces `Inactive` and `Pending` whatever the purchases say.
/// Purchase history is kept.
pub struct BlacklistAccountHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl BlacklistAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: BlacklistAccountCommand) -> Result<Account, MembershipError> {
        cmd.actor.require_admin()?;

        let mut account = self
            .accounts
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(cmd.account_id.clone()))?;

        account.blacklist(&cmd.reason)?;
        self.accounts.update(&account).await?;
        account.version += 1;

        tracing::warn!(
            account_id = %account.id,
            admin = %cmd.actor.id,
            reason = %cmd.reason.trim(),
            "Account blacklisted"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::{
        admin, date, seed_account, seed_purchase,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::membership::{ApprovalStatus, PaymentStatus, PlanStatus};

    #[tokio::test]
    async fn blacklist_overrides_active_plan() {
        let store = Arc::new(InMemoryStore::new());
        seed_account(&store, "acc-1").await;
        seed_purchase(
            &store,
            "acc-1",
            date(2024, 1, 1),
            date(2099, 1, 1),
            PaymentStatus::Completed,
        )
        .await;

        let account = BlacklistAccountHandler::new(store.clone())
            .handle(BlacklistAccountCommand {
                actor: admin(),
                account_id: AccountId::new("acc-1").unwrap(),
                reason: "  repeated no-shows ".to_string(),
            })
            .await
            .unwrap();

        assert!(account.blacklisted);
        assert_eq!(account.plan_status, PlanStatus::Inactive);
        assert_eq!(account.approval, ApprovalStatus::Pending);
        assert_eq!(account.blacklist_reason.as_deref(), Some("repeated no-shows"));

        let stored = store.find_by_id(&account.id).await.unwrap().unwrap();
        assert!(stored.blacklisted);
    }

    #[tokio::test]
    async fn blank_reason_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;

        let err = BlacklistAccountHandler::new(store.clone())
            .handle(BlacklistAccountCommand {
                actor: admin(),
                account_id: account.id.clone(),
                reason: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);

        let stored = store.find_by_id(&account.id).await.unwrap().unwrap();
        assert!(!stored.blacklisted);
    }
}
