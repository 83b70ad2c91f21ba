//! Axum routers for contact-form endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{list_messages, reply_to_message, resolve_message, submit_message};

/// Visitor submission, mounted at `/api/contact`.
pub fn public_contact_routes() -> Router<AppState> {
    Router::new().route("/", post(submit_message))
}

/// Inbox administration, mounted at `/api/admin/messages`.
pub fn admin_contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages))
        .route("/:id/reply", post(reply_to_message))
        .route("/:id/resolve", post(resolve_message))
}
