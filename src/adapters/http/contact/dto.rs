//! HTTP DTOs for contact-form endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::contact::{ContactForm, ContactMessage, MessageStatus};

/// Visitor form. Missing optional fields arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactFormRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl From<ContactFormRequest> for ContactForm {
    fn from(r: ContactFormRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            subject: r.subject,
            body: r.message,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesParams {
    pub status: Option<MessageStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub admin_reply: Option<String>,
    pub replied_at: Option<String>,
    pub created_at: String,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            message: m.body,
            status: m.status,
            admin_reply: m.admin_reply,
            replied_at: m.replied_at.map(|t| t.as_datetime().to_rfc3339()),
            created_at: m.created_at.as_datetime().to_rfc3339(),
        }
    }
}
