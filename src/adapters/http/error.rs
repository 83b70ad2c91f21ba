//! API error types that turn domain errors into HTTP responses.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | not found | 404 |
//! | validation | 400 |
//! | forbidden | 403 |
//! | state / blacklisted / inactive / concurrent change | 409 |
//! | not active / zero-length window | 422 |
//! | mail delivery | 502 |
//! | infrastructure | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::contact::ContactError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::membership::MembershipError;

/// JSON error body shared by the member and admin APIs.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::AccountNotFound
        | ErrorCode::PackageNotFound
        | ErrorCode::PurchaseNotFound
        | ErrorCode::MessageNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::AccountBlacklisted
        | ErrorCode::PackageInactive
        | ErrorCode::ConcurrentModification => StatusCode::CONFLICT,
        ErrorCode::PurchaseNotActive | ErrorCode::ZeroLengthWindow => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::MailDeliveryFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(code: ErrorCode, message: String) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "Request failed");
    } else {
        tracing::debug!(code = %code, error = %message, "Request rejected");
    }
    (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
}

/// Membership, package and purchase endpoint errors.
#[derive(Debug)]
pub struct MembershipApiError(pub MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for MembershipApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> Response {
        respond(self.0.code(), self.0.message())
    }
}

/// Contact-message endpoint errors.
#[derive(Debug)]
pub struct ContactApiError(pub ContactError);

impl From<ContactError> for ContactApiError {
    fn from(err: ContactError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ContactApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ContactApiError {
    fn into_response(self) -> Response {
        respond(self.0.code(), self.0.message())
    }
}
