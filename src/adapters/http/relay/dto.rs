//! Relay request and response bodies (camelCase JSON).
//!
//! Every field defaults so a missing key surfaces as the missing-fields
//! answer for the endpoint instead of a deserializer error.

use serde::{Deserialize, Serialize};

use crate::application::handlers::relay::RelayRequest;
use crate::domain::mail::{ReminderEmail, ReplyEmail};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendOtpRequest {
    pub email: String,
    pub otp: String,
}

impl From<SendOtpRequest> for RelayRequest {
    fn from(r: SendOtpRequest) -> Self {
        RelayRequest::Otp {
            email: r.email,
            otp: r.otp,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendReminderRequest {
    pub email: String,
    pub user_name: String,
    pub package_name: String,
    pub days_remaining: Option<i64>,
    pub end_date: Option<String>,
    pub message: String,
}

impl From<SendReminderRequest> for RelayRequest {
    fn from(r: SendReminderRequest) -> Self {
        RelayRequest::Reminder(ReminderEmail {
            email: r.email,
            user_name: r.user_name,
            package_name: r.package_name,
            days_remaining: r.days_remaining,
            end_date: r.end_date,
            message: r.message,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendReplyRequest {
    pub email: String,
    pub user_name: String,
    pub user_subject: Option<String>,
    pub user_message: Option<String>,
    pub admin_reply: String,
}

impl From<SendReplyRequest> for RelayRequest {
    fn from(r: SendReplyRequest) -> Self {
        RelayRequest::Reply(ReplyEmail {
            email: r.email,
            user_name: r.user_name,
            user_subject: r.user_subject,
            user_message: r.user_message,
            admin_reply: r.admin_reply,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}
