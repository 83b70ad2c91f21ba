//! ApproveAccountHandler - Admits a pending account.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, AuthenticatedUser};
use crate::domain::membership::{Account, MembershipError};
use crate::ports::AccountRepository;

#[derive(Debug, Clone)]
pub struct ApproveAccountCommand {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
}

pub struct ApproveAccountHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl ApproveAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(&self, cmd: ApproveAccountCommand) -> Result<Account, MembershipError> {
        cmd.actor.require_admin()?;

        let mut account = self
            .accounts
            .find_by_id(&cmd.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(cmd.account_id.clone()))?;

        account.approve()?;
        self.accounts.update(&account).await?;
        account.version += 1;

        tracing::info!(account_id = %account.id, admin = %cmd.actor.id, "Account approved");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::{admin, seed_account};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::membership::ApprovalStatus;

    fn command(id: &AccountId) -> ApproveAccountCommand {
        ApproveAccountCommand {
            actor: admin(),
            account_id: id.clone(),
        }
    }

    #[tokio::test]
    async fn pending_account_becomes_approved() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;

        let approved = ApproveAccountHandler::new(store.clone())
            .handle(command(&account.id))
            .await
            .unwrap();

        assert_eq!(approved.approval, ApprovalStatus::Approved);
        let stored = store.find_by_id(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.approval, ApprovalStatus::Approved);
    }

    #[tokio::test]
    async fn approving_twice_is_an_invalid_transition() {
        let store = Arc::new(InMemoryStore::new());
        let account = seed_account(&store, "acc-1").await;
        let handler = ApproveAccountHandler::new(store.clone());
        handler.handle(command(&account.id)).await.unwrap();

        let err = handler.handle(command(&account.id)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn blacklisted_account_cannot_be_approved() {
        let store = Arc::new(InMemoryStore::new());
        let mut account = seed_account(&store, "acc-1").await;
        account.blacklist("fraud").unwrap();
        store.update(&account).await.unwrap();

        let err = ApproveAccountHandler::new(store.clone())
            .handle(command(&account.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AccountBlacklisted);
    }
}
