//! Axum router for the mail relay, mounted at `/api`.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{send_otp, send_reminder, send_reply};

pub fn relay_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/send-reminder", post(send_reminder))
        .route("/send-reply", post(send_reply))
}
