//! ListExpiringMembershipsHandler - Purchases about to end, joined with their owners.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{AccountId, AuthenticatedUser, PurchaseId};
use crate::domain::membership::{ledger, MembershipError};
use crate::ports::{AccountRepository, PurchaseReader};

#[derive(Debug, Clone)]
pub struct ListExpiringQuery {
    pub today: NaiveDate,
    pub lookahead_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringMembership {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub purchase_id: PurchaseId,
    pub package_name: String,
    pub end_date: NaiveDate,
    pub days_remaining: i64,
}

/// The reminder worklist: completed purchases ending within the lookahead,
/// soonest first. Purchases whose account no longer exists are skipped.
pub struct ListExpiringMembershipsHandler {
    accounts: Arc<dyn AccountRepository>,
    purchases: Arc<dyn PurchaseReader>,
}

impl ListExpiringMembershipsHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, purchases: Arc<dyn PurchaseReader>) -> Self {
        Self {
            accounts,
            purchases,
        }
    }

    pub async fn handle(
        &self,
        actor: &AuthenticatedUser,
        query: ListExpiringQuery,
    ) -> Result<Vec<ExpiringMembership>, MembershipError> {
        actor.require_admin()?;

        if !(1..=ledger::MAX_REMINDER_LOOKAHEAD_DAYS).contains(&query.lookahead_days) {
            return Err(MembershipError::validation(
                "days",
                format!(
                    "lookahead must be between 1 and {} days",
                    ledger::MAX_REMINDER_LOOKAHEAD_DAYS
                ),
            ));
        }
        let horizon = ledger::lookahead_horizon(query.today, query.lookahead_days)?;
        let candidates = self
            .purchases
            .list_completed_ending_between(query.today, horizon)
            .await?;

        let mut expiring = Vec::new();
        for purchase in ledger::expiring_within(&candidates, query.today, query.lookahead_days)? {
            let Some(account) = self.accounts.find_by_id(&purchase.account_id).await? else {
                tracing::warn!(
                    purchase_id = %purchase.id,
                    account_id = %purchase.account_id,
                    "Expiring purchase has no account"
                );
                continue;
            };
            expiring.push(ExpiringMembership {
                account_id: account.id,
                name: account.name,
                email: account.email,
                phone: account.phone,
                purchase_id: purchase.id,
                package_name: purchase.package_name.clone(),
                end_date: purchase.end_date,
                days_remaining: ledger::days_remaining(purchase, query.today),
            });
        }
        expiring.sort_by_key(|e| e.end_date);

        Ok(expiring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::{
        admin, date, seed_account, seed_purchase,
    };
    use crate::domain::membership::PaymentStatus;

    #[tokio::test]
    async fn lists_completed_purchases_inside_the_window() {
        let store = Arc::new(InMemoryStore::new());
        seed_account(&store, "acc-1").await;
        seed_account(&store, "acc-2").await;
        let today = date(2024, 1, 29);

        let later = seed_purchase(&store, "acc-1", date(2024, 1, 1), date(2024, 1, 31), PaymentStatus::Completed).await;
        let sooner = seed_purchase(&store, "acc-2", date(2023, 12, 31), date(2024, 1, 30), PaymentStatus::Completed).await;
        // ends today: already past the reminder point
        seed_purchase(&store, "acc-2", date(2023, 12, 30), date(2024, 1, 29), PaymentStatus::Completed).await;
        // ends beyond the lookahead
        seed_purchase(&store, "acc-1", date(2024, 1, 2), date(2024, 2, 1), PaymentStatus::Completed).await;
        // not paid
        seed_purchase(&store, "acc-1", date(2024, 1, 1), date(2024, 1, 30), PaymentStatus::Pending).await;

        let expiring = ListExpiringMembershipsHandler::new(store.clone(), store.clone())
            .handle(
                &admin(),
                ListExpiringQuery {
                    today,
                    lookahead_days: 2,
                },
            )
            .await
            .unwrap();

        let ids: Vec<_> = expiring.iter().map(|e| e.purchase_id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
        assert_eq!(expiring[0].days_remaining, 1);
        assert_eq!(expiring[1].days_remaining, 2);
        assert_eq!(expiring[0].email, "asha@example.com");
    }

    #[tokio::test]
    async fn lookahead_outside_the_allowed_range_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let handler = ListExpiringMembershipsHandler::new(store.clone(), store.clone());

        for lookahead_days in [0, 31, 200_000_000] {
            let err = handler
                .handle(
                    &admin(),
                    ListExpiringQuery {
                        today: date(2024, 1, 1),
                        lookahead_days,
                    },
                )
                .await
                .unwrap_err();
            assert!(
                matches!(err, MembershipError::ValidationFailed { ref field, .. } if field == "days"),
                "lookahead {} should be rejected",
                lookahead_days
            );
        }
    }
}
