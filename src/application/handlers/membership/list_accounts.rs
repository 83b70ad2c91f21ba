//! ListAccountsHandler - Admin account listing with statistics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::membership::{Account, MembershipError};
use crate::ports::AccountRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountFilter {
    #[default]
    All,
    Approved,
    Pending,
}

impl AccountFilter {
    fn admits(&self, account: &Account) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Approved => account.approval.is_approved(),
            AccountFilter::Pending => !account.approval.is_approved(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AccountStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub active_plans: usize,
    pub blacklisted: usize,
}

impl AccountStats {
    fn tally(accounts: &[Account]) -> Self {
        accounts.iter().fold(Self::default(), |mut stats, a| {
            stats.total += 1;
            if a.approval.is_approved() {
                stats.approved += 1;
            } else {
                stats.pending += 1;
            }
            if a.plan_status.is_active() {
                stats.active_plans += 1;
            }
            if a.blacklisted {
                stats.blacklisted += 1;
            }
            stats
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListAccountsQuery {
    pub filter: AccountFilter,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListAccountsResult {
    /// Newest first, after filter and search.
    pub accounts: Vec<Account>,
    /// Always over every account, ignoring filter and search.
    pub stats: AccountStats,
}

pub struct ListAccountsHandler {
    accounts: Arc<dyn AccountRepository>,
}

impl ListAccountsHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn handle(
        &self,
        actor: &AuthenticatedUser,
        query: ListAccountsQuery,
    ) -> Result<ListAccountsResult, MembershipError> {
        actor.require_admin()?;

        let all = self.accounts.list().await?;
        let stats = AccountStats::tally(&all);
        let needle = query.search.unwrap_or_default();

        let accounts = all
            .into_iter()
            .filter(|a| query.filter.admits(a) && a.matches_search(&needle))
            .collect();

        Ok(ListAccountsResult { accounts, stats })
    }
}
