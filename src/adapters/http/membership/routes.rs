//! Axum routers for member and admin membership endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    add_purchase, approve_account, blacklist_account, get_account_summary, get_my_membership,
    list_accounts, list_expiring, quote_refund, reconcile_account, register_profile,
    remove_purchase, send_reminder,
};

/// Member routes, mounted at `/api/me`.
///
/// - `GET /membership` - own status, active plan and history
/// - `POST /profile` - first-time profile registration
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/membership", get(get_my_membership))
        .route("/profile", post(register_profile))
}

/// Admin routes for accounts, purchases and expiry reminders, mounted at `/api/admin`.
///
/// - `GET /accounts` - list with `filter` and `search`, plus statistics
/// - `GET /accounts/:id` - membership summary
/// - `POST /accounts/:id/approve`
/// - `POST /accounts/:id/blacklist`
/// - `POST /accounts/:id/reconcile` - recompute plan status from purchases
/// - `POST /purchases` - record a taken payment
/// - `DELETE /purchases/:id`
/// - `GET /purchases/:id/refund` - prorated refund quote
/// - `GET /expiring` - memberships ending within `days`
/// - `POST /expiring/reminders` - email one member
pub fn admin_membership_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/:id", get(get_account_summary))
        .route("/accounts/:id/approve", post(approve_account))
        .route("/accounts/:id/blacklist", post(blacklist_account))
        .route("/accounts/:id/reconcile", post(reconcile_account))
        .route("/purchases", post(add_purchase))
        .route("/purchases/:id", delete(remove_purchase))
        .route("/purchases/:id/refund", get(quote_refund))
        .route("/expiring", get(list_expiring))
        .route("/expiring/reminders", post(send_reminder))
}
