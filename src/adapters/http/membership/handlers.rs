//! HTTP handlers for member and admin membership endpoints.
//!
//! These connect axum routes to the application command/query handlers. The
//! caller from `RequireAuth` is passed through; handlers decide on roles.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::membership::{
    AddPurchaseCommand, ApproveAccountCommand, BlacklistAccountCommand,
    GetMembershipSummaryQuery, ListAccountsQuery, ListExpiringQuery, QuoteRefundQuery,
    ReconcileAccountCommand, RegisterAccountCommand, RemovePurchaseCommand,
    SendExpiryReminderCommand,
};
use crate::domain::foundation::{today, AccountId, PurchaseId};
use crate::domain::membership::MembershipError;

use super::super::error::MembershipApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AccountListResponse, AccountResponse, AddPurchaseRequest, BlacklistRequest, ExpiringParams,
    LedgerWriteResponse, ListAccountsParams, MembershipSummaryResponse, ReconcileResponse,
    RefundQuoteResponse, RegisterProfileRequest, ReminderSentResponse, SendReminderRequest,
};

fn account_id(raw: &str) -> Result<AccountId, MembershipError> {
    Ok(AccountId::new(raw)?)
}

// ════════════════════════════════════════════════════════════════════════════════
// Member endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/me/membership
pub async fn get_my_membership(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, MembershipApiError> {
    let query = GetMembershipSummaryQuery {
        account_id: user.id.clone(),
        actor: user,
        today: today(),
    };
    let result = state.membership_summary_handler().handle(query).await?;
    Ok(Json(MembershipSummaryResponse::from(result)))
}

/// POST /api/me/profile - 201 on first registration, 200 when it already exists
pub async fn register_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RegisterProfileRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = RegisterAccountCommand {
        actor: user,
        name: request.name,
        phone: request.phone,
        gender: request.gender,
    };
    let result = state.register_account_handler().handle(cmd).await?;
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(AccountResponse::from(result.account))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin: accounts
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/accounts?filter=&search=
pub async fn list_accounts(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListAccountsParams>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let query = ListAccountsQuery {
        filter: params.filter,
        search: params.search,
    };
    let result = state.list_accounts_handler().handle(&user, query).await?;
    Ok(Json(AccountListResponse::from(result)))
}

/// GET /api/admin/accounts/:id
pub async fn get_account_summary(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let query = GetMembershipSummaryQuery {
        actor: user,
        account_id: account_id(&id)?,
        today: today(),
    };
    let result = state.membership_summary_handler().handle(query).await?;
    Ok(Json(MembershipSummaryResponse::from(result)))
}

/// POST /api/admin/accounts/:id/approve
pub async fn approve_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = ApproveAccountCommand {
        actor: user,
        account_id: account_id(&id)?,
    };
    let account = state.approve_account_handler().handle(cmd).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// POST /api/admin/accounts/:id/blacklist
pub async fn blacklist_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<BlacklistRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = BlacklistAccountCommand {
        actor: user,
        account_id: account_id(&id)?,
        reason: request.reason,
    };
    let account = state.blacklist_account_handler().handle(cmd).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// POST /api/admin/accounts/:id/reconcile
pub async fn reconcile_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = ReconcileAccountCommand {
        actor: user,
        account_id: account_id(&id)?,
        today: today(),
    };
    let result = state.reconcile_account_handler().handle(cmd).await?;
    Ok(Json(ReconcileResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin: purchases
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/purchases
pub async fn add_purchase(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<AddPurchaseRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = AddPurchaseCommand {
        actor: user,
        account_id: account_id(&request.account_id)?,
        package_id: request.package_id,
        start_date: request.start_date,
        payment_method: request.payment_method,
        transaction_id: request.transaction_id,
        today: today(),
    };
    let result = state.add_purchase_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(LedgerWriteResponse::from(result))))
}

/// DELETE /api/admin/purchases/:id
pub async fn remove_purchase(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(purchase_id): Path<PurchaseId>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = RemovePurchaseCommand {
        actor: user,
        purchase_id,
        today: today(),
    };
    let result = state.remove_purchase_handler().handle(cmd).await?;
    Ok(Json(LedgerWriteResponse::from(result)))
}

/// GET /api/admin/purchases/:id/refund
pub async fn quote_refund(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(purchase_id): Path<PurchaseId>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let query = QuoteRefundQuery {
        actor: user,
        purchase_id,
        today: today(),
    };
    let result = state.quote_refund_handler().handle(query).await?;
    Ok(Json(RefundQuoteResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin: expiring memberships
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/expiring?days=
pub async fn list_expiring(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ExpiringParams>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let query = ListExpiringQuery {
        today: today(),
        lookahead_days: params.days.unwrap_or(state.reminder_lookahead_days),
    };
    let expiring = state.list_expiring_handler().handle(&user, query).await?;
    Ok(Json(expiring))
}

/// POST /api/admin/expiring/reminders
pub async fn send_reminder(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SendReminderRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let cmd = SendExpiryReminderCommand {
        actor: user,
        account_id: account_id(&request.account_id)?,
        purchase_id: request.purchase_id,
        message: request.message,
        today: today(),
    };
    let result = state.send_reminder_handler().handle(cmd).await?;
    Ok(Json(ReminderSentResponse::from(result)))
}
