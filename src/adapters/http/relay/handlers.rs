//! HTTP handlers for the transactional mail relay.
//!
//! Unauthenticated. Each endpoint validates, renders one email and sends it
//! once; the body always carries `success` and `message`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::relay::{RelayError, RelayKind, RelayRequest};

use super::super::state::AppState;
use super::dto::{RelayResponse, SendOtpRequest, SendReminderRequest, SendReplyRequest};

async fn relay<T>(
    state: &AppState,
    kind: RelayKind,
    body: Result<Json<T>, JsonRejection>,
) -> Response
where
    T: Into<RelayRequest>,
{
    let request: RelayRequest = match body {
        Ok(Json(body)) => body.into(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, ?kind, "Unreadable relay body");
            return (
                StatusCode::BAD_REQUEST,
                Json(RelayResponse::failed(kind.missing_fields_message(), None)),
            )
                .into_response();
        }
    };

    match state.relay_handler().handle(request).await {
        Ok(message) => (StatusCode::OK, Json(RelayResponse::ok(message))).into_response(),
        Err(RelayError::MissingFields(_)) => (
            StatusCode::BAD_REQUEST,
            Json(RelayResponse::failed(kind.missing_fields_message(), None)),
        )
            .into_response(),
        Err(RelayError::Delivery { kind, source }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RelayResponse::failed(
                kind.failure_message(),
                Some(source.to_string()),
            )),
        )
            .into_response(),
    }
}

/// POST /api/send-otp
pub async fn send_otp(
    State(state): State<AppState>,
    body: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Response {
    relay(&state, RelayKind::Otp, body).await
}

/// POST /api/send-reminder
pub async fn send_reminder(
    State(state): State<AppState>,
    body: Result<Json<SendReminderRequest>, JsonRejection>,
) -> Response {
    relay(&state, RelayKind::Reminder, body).await
}

/// POST /api/send-reply
pub async fn send_reply(
    State(state): State<AppState>,
    body: Result<Json<SendReplyRequest>, JsonRejection>,
) -> Response {
    relay(&state, RelayKind::Reply, body).await
}
