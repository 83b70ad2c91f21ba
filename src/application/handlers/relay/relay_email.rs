//! RelayEmailHandler - Forwards one of the three transactional emails.
//!
//! Fire and report: no retry, no persistence, no idempotency key.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::mail::{
    otp_email, reminder_email, reply_email, OutboundEmail, ReminderEmail, ReplyEmail,
};
use crate::ports::{MailError, Mailer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Otp,
    Reminder,
    Reply,
}

impl RelayKind {
    pub fn success_message(&self) -> &'static str {
        match self {
            RelayKind::Otp => "OTP sent successfully",
            RelayKind::Reminder => "Reminder email sent successfully",
            RelayKind::Reply => "Reply email sent successfully",
        }
    }

    /// Answer for a request missing a required field.
    pub fn missing_fields_message(&self) -> &'static str {
        match self {
            RelayKind::Otp => "Email and OTP required",
            RelayKind::Reminder | RelayKind::Reply => "Missing required fields",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            RelayKind::Otp => "Failed to send OTP",
            RelayKind::Reminder => "Failed to send reminder email",
            RelayKind::Reply => "Failed to send reply email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayRequest {
    Otp { email: String, otp: String },
    Reminder(ReminderEmail),
    Reply(ReplyEmail),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{kind:?} email failed: {source}")]
    Delivery {
        kind: RelayKind,
        #[source]
        source: MailError,
    },
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl RelayRequest {
    pub fn kind(&self) -> RelayKind {
        match self {
            RelayRequest::Otp { .. } => RelayKind::Otp,
            RelayRequest::Reminder(_) => RelayKind::Reminder,
            RelayRequest::Reply(_) => RelayKind::Reply,
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let required: Vec<(&'static str, &str)> = match self {
            RelayRequest::Otp { email, otp } => vec![("email", email.as_str()), ("otp", otp.as_str())],
            RelayRequest::Reminder(r) => vec![
                ("email", r.email.as_str()),
                ("userName", r.user_name.as_str()),
                ("packageName", r.package_name.as_str()),
                ("message", r.message.as_str()),
            ],
            RelayRequest::Reply(r) => vec![
                ("email", r.email.as_str()),
                ("userName", r.user_name.as_str()),
                ("adminReply", r.admin_reply.as_str()),
            ],
        };
        required
            .into_iter()
            .filter(|(_, value)| blank(value))
            .map(|(name, _)| name)
            .collect()
    }

    fn render(&self) -> OutboundEmail {
        match self {
            RelayRequest::Otp { email, otp } => otp_email(email.trim(), otp.trim()),
            RelayRequest::Reminder(r) => reminder_email(r),
            RelayRequest::Reply(r) => reply_email(r),
        }
    }
}

pub struct RelayEmailHandler {
    mailer: Arc<dyn Mailer>,
}

impl RelayEmailHandler {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Returns the success message for the response body.
    pub async fn handle(&self, request: RelayRequest) -> Result<&'static str, RelayError> {
        let kind = request.kind();
        let missing = request.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?kind, ?missing, "Relay request rejected");
            return Err(RelayError::MissingFields(missing));
        }

        let email = request.render();
        self.mailer.send(&email).await.map_err(|source| {
            tracing::error!(?kind, to = %email.to_email, error = %source, "Relay delivery failed");
            RelayError::Delivery { kind, source }
        })?;

        tracing::info!(?kind, to = %email.to_email, "Relay email sent");
        Ok(kind.success_message())
    }
}
