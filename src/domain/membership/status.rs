//! Account status enums.
//!
//! `PlanStatus` is the redundantly persisted "has an active plan" flag.
//! `ApprovalStatus` is the administrator approval state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MembershipError;

/// Whether an account currently holds a paid, unexpired plan.
///
/// Only three operations move it: applying a completed purchase (to
/// `Active`), removing a purchase when nothing active remains (to
/// `Inactive`) and blacklisting (to `Inactive`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    #[default]
    Inactive,
}

impl PlanStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PlanStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Inactive => "inactive",
        }
    }
}

impl From<bool> for PlanStatus {
    fn from(active: bool) -> Self {
        if active {
            PlanStatus::Active
        } else {
            PlanStatus::Inactive
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanStatus {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "inactive" => Ok(PlanStatus::Inactive),
            other => Err(MembershipError::validation(
                "plan_status",
                format!("unknown plan status '{}'", other),
            )),
        }
    }
}

/// Administrator approval of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
}

impl ApprovalStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalStatus::Approved)
    }
}

impl StateMachine for ApprovalStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ApprovalStatus::*;
        matches!(
            (self, target),
            (Pending, Approved)
            // Only reachable through blacklisting
                | (Approved, Pending)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ApprovalStatus::*;
        match self {
            Pending => vec![Approved],
            Approved => vec![Pending],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_status_defaults_to_inactive() {
        assert_eq!(PlanStatus::default(), PlanStatus::Inactive);
    }

    #[test]
    fn plan_status_from_bool() {
        assert_eq!(PlanStatus::from(true), PlanStatus::Active);
        assert_eq!(PlanStatus::from(false), PlanStatus::Inactive);
    }

    #[test]
    fn plan_status_parses_case_insensitively() {
        assert_eq!("ACTIVE".parse::<PlanStatus>().unwrap(), PlanStatus::Active);
        assert!("expired".parse::<PlanStatus>().is_err());
    }

    #[test]
    fn plan_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PlanStatus::Active).unwrap(), "\"active\"");
    }

    #[test]
    fn pending_can_be_approved() {
        assert_eq!(
            ApprovalStatus::Pending.transition_to(ApprovalStatus::Approved),
            Ok(ApprovalStatus::Approved)
        );
    }

    #[test]
    fn approved_cannot_be_approved_again() {
        assert!(ApprovalStatus::Approved
            .transition_to(ApprovalStatus::Approved)
            .is_err());
    }

    #[test]
    fn approval_is_never_terminal() {
        assert!(!ApprovalStatus::Pending.is_terminal());
        assert!(!ApprovalStatus::Approved.is_terminal());
    }
}
