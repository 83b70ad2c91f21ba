//! Purchase record - one account buying one package instance.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AccountId, PackageId, PurchaseId, Timestamp};

use super::{MembershipError, Package};

/// Whether payment for a purchase has been taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
}

impl PaymentStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(PaymentStatus::Completed),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(MembershipError::validation(
                "payment_status",
                format!("unknown payment status '{}'", other),
            )),
        }
    }
}

/// How the member paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Card,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            "online" => Ok(PaymentMethod::Online),
            other => Err(MembershipError::validation(
                "payment_method",
                format!("unknown payment method '{}'", other),
            )),
        }
    }
}

/// A historical record of a package bought by an account.
///
/// Package name, price and duration are copied by value so later package
/// edits leave history untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub account_id: AccountId,
    pub package_id: PackageId,
    pub package_name: String,
    pub amount: i64,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
}

impl Purchase {
    /// Records a purchase of `package` starting on `start_date`.
    ///
    /// Fails if the package is not offered for sale or the end date would
    /// overflow the calendar.
    pub fn from_package(
        id: PurchaseId,
        account_id: AccountId,
        package: &Package,
        start_date: NaiveDate,
        payment_status: PaymentStatus,
        payment_method: PaymentMethod,
        transaction_id: Option<String>,
    ) -> Result<Self, MembershipError> {
        if !package.active {
            return Err(MembershipError::PackageInactive(package.id));
        }

        let end_date = start_date
            .checked_add_signed(Duration::days(i64::from(package.duration_days)))
            .ok_or_else(|| MembershipError::validation("start_date", "end date out of range"))?;

        Ok(Self {
            id,
            account_id,
            package_id: package.id,
            package_name: package.name.clone(),
            amount: package.price,
            duration_days: package.duration_days,
            start_date,
            end_date,
            payment_status,
            payment_method,
            transaction_id: normalize_transaction_id(payment_method, transaction_id),
            created_at: Timestamp::now(),
        })
    }

    pub fn is_completed(&self) -> bool {
        self.payment_status.is_completed()
    }
}

/// Cash never carries a transaction id; blank ids are dropped.
fn normalize_transaction_id(method: PaymentMethod, id: Option<String>) -> Option<String> {
    if method == PaymentMethod::Cash {
        return None;
    }
    id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
