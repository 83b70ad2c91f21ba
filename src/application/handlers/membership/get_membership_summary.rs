//! GetMembershipSummaryHandler - Plan overview for one account.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{AccountId, AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::membership::{ledger, Account, MembershipError, Purchase};
use crate::ports::{AccountRepository, PurchaseReader};

#[derive(Debug, Clone)]
pub struct GetMembershipSummaryQuery {
    pub actor: AuthenticatedUser,
    pub account_id: AccountId,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct GetMembershipSummaryResult {
    pub account: Account,
    pub active_purchase: Option<Purchase>,
    /// Days left on the active purchase, never negative.
    pub days_remaining: Option<i64>,
    /// Most recent first.
    pub purchases: Vec<Purchase>,
}

/// Members may read their own summary; administrators may read any.
pub struct GetMembershipSummaryHandler {
    accounts: Arc<dyn AccountRepository>,
    purchases: Arc<dyn PurchaseReader>,
}

impl GetMembershipSummaryHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, purchases: Arc<dyn PurchaseReader>) -> Self {
        Self {
            accounts,
            purchases,
        }
    }

    pub async fn handle(
        &self,
        query: GetMembershipSummaryQuery,
    ) -> Result<GetMembershipSummaryResult, MembershipError> {
        if query.actor.id != query.account_id && !query.actor.is_admin() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Cannot read another account's membership",
            )
            .into());
        }

        let account = self
            .accounts
            .find_by_id(&query.account_id)
            .await?
            .ok_or_else(|| MembershipError::AccountNotFound(query.account_id.clone()))?;
        let purchases = self.purchases.list_for_account(&account.id).await?;

        let active_purchase = ledger::active_purchase(&purchases, query.today).cloned();
        let days_remaining = active_purchase
            .as_ref()
            .map(|p| ledger::days_remaining_clamped(p, query.today));

        Ok(GetMembershipSummaryResult {
            account,
            active_purchase,
            days_remaining,
            purchases,
        })
    }
}
