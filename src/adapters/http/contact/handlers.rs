//! HTTP handlers for contact-form endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::contact::{
    ListContactMessagesQuery, ReplyToContactMessageCommand, ResolveContactMessageCommand,
};
use crate::domain::foundation::MessageId;

use super::super::error::ContactApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{ContactFormRequest, ContactMessageResponse, ListMessagesParams, ReplyRequest};

/// POST /api/contact
pub async fn submit_message(
    State(state): State<AppState>,
    Json(request): Json<ContactFormRequest>,
) -> Result<impl IntoResponse, ContactApiError> {
    let message = state
        .submit_message_handler()
        .handle(request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ContactMessageResponse::from(message))))
}

/// GET /api/admin/messages?status=
pub async fn list_messages(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListMessagesParams>,
) -> Result<impl IntoResponse, ContactApiError> {
    let query = ListContactMessagesQuery {
        status: params.status,
    };
    let messages = state.list_messages_handler().handle(&user, query).await?;
    let body: Vec<ContactMessageResponse> = messages
        .into_iter()
        .map(ContactMessageResponse::from)
        .collect();
    Ok(Json(body))
}

/// POST /api/admin/messages/:id/reply
pub async fn reply_to_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(message_id): Path<MessageId>,
    Json(request): Json<ReplyRequest>,
) -> Result<impl IntoResponse, ContactApiError> {
    let cmd = ReplyToContactMessageCommand {
        actor: user,
        message_id,
        reply: request.reply,
    };
    let message = state.reply_handler().handle(cmd).await?;
    Ok(Json(ContactMessageResponse::from(message)))
}

/// POST /api/admin/messages/:id/resolve
pub async fn resolve_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(message_id): Path<MessageId>,
) -> Result<impl IntoResponse, ContactApiError> {
    let cmd = ResolveContactMessageCommand {
        actor: user,
        message_id,
    };
    let message = state.resolve_handler().handle(cmd).await?;
    Ok(Json(ContactMessageResponse::from(message)))
}
