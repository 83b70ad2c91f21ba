//! Account aggregate - a registered gym member or administrator.
//!
//! # Invariants
//!
//! - `plan_status` is `Active` only while some completed purchase has not expired
//! - a blacklisted account is always `Inactive` and `Pending`
//! - `version` increases by one on every persisted update

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, StateMachine, Timestamp};

use super::{ledger, ApprovalStatus, MembershipError, PlanStatus, Purchase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<String>,
    pub approval: ApprovalStatus,
    pub blacklisted: bool,
    pub blacklist_reason: Option<String>,
    pub plan_status: PlanStatus,
    pub is_admin: bool,
    pub created_at: Timestamp,

    /// Row version read from storage; updates compare against it.
    pub version: i32,
}

impl Account {
    /// A freshly signed-up account: pending approval, no plan.
    pub fn register(
        id: AccountId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        gender: Option<String>,
    ) -> Result<Self, MembershipError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        if name.is_empty() {
            return Err(MembershipError::validation("name", "Name is required"));
        }
        if !email.contains('@') {
            return Err(MembershipError::validation("email", "A valid email is required"));
        }

        Ok(Self {
            id,
            name,
            email,
            phone: phone.into().trim().to_string(),
            gender: gender.map(|g| g.trim().to_string()).filter(|g| !g.is_empty()),
            approval: ApprovalStatus::Pending,
            blacklisted: false,
            blacklist_reason: None,
            plan_status: PlanStatus::Inactive,
            is_admin: false,
            created_at: Timestamp::now(),
            version: 0,
        })
    }

    /// Recomputes the plan after a completed purchase is recorded.
    ///
    /// `earlier` is the account's existing history, most recent first. A
    /// backdated purchase that has already ended does not activate the plan.
    /// Pending purchases leave the status alone. Blacklisted accounts cannot
    /// take new purchases.
    pub fn apply_purchase(
        &mut self,
        purchase: &Purchase,
        earlier: &[Purchase],
        today: NaiveDate,
    ) -> Result<(), MembershipError> {
        if purchase.account_id != self.id {
            return Err(MembershipError::validation(
                "account_id",
                "purchase belongs to a different account",
            ));
        }
        if self.blacklisted {
            return Err(MembershipError::AccountBlacklisted(self.id.clone()));
        }
        if purchase.is_completed() {
            let mut history = Vec::with_capacity(earlier.len() + 1);
            history.push(purchase.clone());
            history.extend_from_slice(earlier);
            self.reconcile(&history, today);
        }
        Ok(())
    }

    /// Recomputes the plan status from what is left after a purchase is deleted.
    ///
    /// `remaining` must be re-read from storage, never derived by assuming the
    /// deleted purchase was the only active one.
    pub fn apply_purchase_removal(&mut self, remaining: &[Purchase], today: NaiveDate) {
        self.reconcile(remaining, today);
    }

    /// Sets the plan status from the full purchase set.
    pub fn reconcile(&mut self, purchases: &[Purchase], today: NaiveDate) {
        self.plan_status = if self.blacklisted {
            PlanStatus::Inactive
        } else {
            ledger::reconciled_plan_status(purchases, today)
        };
    }

    /// Blacklists the account, revoking approval and the plan.
    ///
    /// Applies regardless of prior state; blacklisting again replaces the reason.
    pub fn blacklist(&mut self, reason: &str) -> Result<(), MembershipError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(MembershipError::validation(
                "reason",
                "A blacklist reason is required",
            ));
        }
        self.blacklisted = true;
        self.blacklist_reason = Some(reason.to_string());
        self.plan_status = PlanStatus::Inactive;
        self.approval = ApprovalStatus::Pending;
        Ok(())
    }

    pub fn approve(&mut self) -> Result<(), MembershipError> {
        if self.blacklisted {
            return Err(MembershipError::AccountBlacklisted(self.id.clone()));
        }
        self.approval = self
            .approval
            .transition_to(ApprovalStatus::Approved)
            .map_err(|_| MembershipError::invalid_state(format!("{:?}", self.approval), "approve"))?;
        Ok(())
    }

    /// Case-insensitive match on name, email or phone.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.phone.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
pub(crate) fn test_account(id: &str) -> Account {
    Account::register(
        AccountId::new(id).unwrap(),
        "Asha Rao",
        "asha@example.com",
        "9876543210",
        Some("female".to_string()),
    )
    .unwrap()
}
