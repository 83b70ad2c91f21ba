//! HTTP DTOs for account, purchase and expiry endpoints.
//!
//! Responses leave out the account row version; it is a storage concern.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{
    AccountFilter, AccountStats, AddPurchaseResult, GetMembershipSummaryResult,
    ListAccountsResult, QuoteRefundResult, ReconcileAccountResult, RemovePurchaseResult,
    SendExpiryReminderResult,
};
use crate::domain::foundation::{PackageId, PurchaseId};
use crate::domain::membership::{
    Account, ApprovalStatus, PaymentMethod, PaymentStatus, PlanStatus, Purchase,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Profile details a member submits after first sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterProfileRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAccountsParams {
    #[serde(default)]
    pub filter: AccountFilter,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlacklistRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPurchaseRequest {
    pub account_id: String,
    pub package_id: PackageId,
    pub start_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpiringParams {
    /// Overrides the configured lookahead.
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendReminderRequest {
    pub account_id: String,
    pub purchase_id: PurchaseId,
    /// Custom text; the default reminder is built when absent.
    #[serde(default)]
    pub message: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<String>,
    pub approval: ApprovalStatus,
    pub blacklisted: bool,
    pub blacklist_reason: Option<String>,
    pub plan_status: PlanStatus,
    pub is_admin: bool,
    /// ISO 8601
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name,
            email: account.email,
            phone: account.phone,
            gender: account.gender,
            approval: account.approval,
            blacklisted: account.blacklisted,
            blacklist_reason: account.blacklist_reason,
            plan_status: account.plan_status,
            is_admin: account.is_admin,
            created_at: account.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseResponse {
    pub id: String,
    pub account_id: String,
    pub package_id: String,
    pub package_name: String,
    pub amount: i64,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub created_at: String,
}

impl From<Purchase> for PurchaseResponse {
    fn from(p: Purchase) -> Self {
        Self {
            id: p.id.to_string(),
            account_id: p.account_id.to_string(),
            package_id: p.package_id.to_string(),
            package_name: p.package_name,
            amount: p.amount,
            duration_days: p.duration_days,
            start_date: p.start_date,
            end_date: p.end_date,
            payment_status: p.payment_status,
            payment_method: p.payment_method,
            transaction_id: p.transaction_id,
            created_at: p.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipSummaryResponse {
    pub account: AccountResponse,
    pub active_purchase: Option<PurchaseResponse>,
    pub days_remaining: Option<i64>,
    pub purchases: Vec<PurchaseResponse>,
}

impl From<GetMembershipSummaryResult> for MembershipSummaryResponse {
    fn from(r: GetMembershipSummaryResult) -> Self {
        Self {
            account: r.account.into(),
            active_purchase: r.active_purchase.map(PurchaseResponse::from),
            days_remaining: r.days_remaining,
            purchases: r.purchases.into_iter().map(PurchaseResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountListResponse {
    pub accounts: Vec<AccountResponse>,
    pub stats: AccountStats,
}

impl From<ListAccountsResult> for AccountListResponse {
    fn from(r: ListAccountsResult) -> Self {
        Self {
            accounts: r.accounts.into_iter().map(AccountResponse::from).collect(),
            stats: r.stats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub account: AccountResponse,
    pub changed: bool,
}

impl From<ReconcileAccountResult> for ReconcileResponse {
    fn from(r: ReconcileAccountResult) -> Self {
        Self {
            account: r.account.into(),
            changed: r.changed,
        }
    }
}

/// Purchase plus the owning account after the ledger write.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerWriteResponse {
    pub purchase: PurchaseResponse,
    pub account: AccountResponse,
}

impl From<AddPurchaseResult> for LedgerWriteResponse {
    fn from(r: AddPurchaseResult) -> Self {
        Self {
            purchase: r.purchase.into(),
            account: r.account.into(),
        }
    }
}

impl From<RemovePurchaseResult> for LedgerWriteResponse {
    fn from(r: RemovePurchaseResult) -> Self {
        Self {
            purchase: r.removed.into(),
            account: r.account.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefundQuoteResponse {
    pub purchase_id: String,
    pub package_name: String,
    pub amount_paid: i64,
    pub days_remaining: i64,
    pub total_window_days: i64,
    pub refund_amount: i64,
}

impl From<QuoteRefundResult> for RefundQuoteResponse {
    fn from(r: QuoteRefundResult) -> Self {
        Self {
            purchase_id: r.purchase.id.to_string(),
            package_name: r.purchase.package_name,
            amount_paid: r.purchase.amount,
            days_remaining: r.quote.days_remaining,
            total_window_days: r.quote.total_window_days,
            refund_amount: r.quote.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderSentResponse {
    pub to_email: String,
    pub days_remaining: i64,
}

impl From<SendExpiryReminderResult> for ReminderSentResponse {
    fn from(r: SendExpiryReminderResult) -> Self {
        Self {
            to_email: r.to_email,
            days_remaining: r.days_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::test_account;

    #[test]
    fn account_response_hides_version() {
        let json = serde_json::to_value(AccountResponse::from(test_account("acc-1"))).unwrap();
        assert!(json.get("version").is_none());
        assert_eq!(json["id"], "acc-1");
    }

    #[test]
    fn list_params_default_to_all() {
        let params: ListAccountsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.filter, AccountFilter::All);
        assert!(params.search.is_none());
    }

    #[test]
    fn add_purchase_request_parses_lowercase_method() {
        let body = serde_json::json!({
            "account_id": "acc-1",
            "package_id": PackageId::new(),
            "start_date": "2024-01-01",
            "payment_method": "upi"
        });
        let request: AddPurchaseRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Upi);
        assert!(request.transaction_id.is_none());
    }
}
