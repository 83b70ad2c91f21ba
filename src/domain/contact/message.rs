//! Contact-form message submitted by a visitor and handled by an administrator.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{MessageId, StateMachine, Timestamp};

use super::ContactError;

/// Lifecycle of a contact message.
///
/// ```text
/// Pending ──► Replied ──► Resolved
///    │          ▲  │
///    │          └──┘ (reply edited)
///    └──────────────────► Resolved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Pending,
    Replied,
    Resolved,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Replied => "replied",
            MessageStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for MessageStatus {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MessageStatus::Pending),
            "replied" => Ok(MessageStatus::Replied),
            "resolved" => Ok(MessageStatus::Resolved),
            other => Err(ContactError::validation(
                "status",
                format!("unknown message status '{}'", other),
            )),
        }
    }
}

impl StateMachine for MessageStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MessageStatus::*;
        matches!(
            (self, target),
            (Pending, Replied) | (Replied, Replied) | (Pending, Resolved) | (Replied, Resolved)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MessageStatus::*;
        match self {
            Pending => vec![Replied, Resolved],
            Replied => vec![Replied, Resolved],
            Resolved => vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub body: String,
    pub status: MessageStatus,
    pub admin_reply: Option<String>,
    pub replied_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Fields a visitor fills in on the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub body: String,
}

impl ContactMessage {
    pub fn submit(id: MessageId, form: ContactForm) -> Result<Self, ContactError> {
        let name = form.name.trim().to_string();
        let email = form.email.trim().to_string();
        let body = form.body.trim().to_string();

        if name.is_empty() {
            return Err(ContactError::validation("name", "Name is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(ContactError::validation("email", "A valid email is required"));
        }
        if body.is_empty() {
            return Err(ContactError::validation("body", "Message is required"));
        }

        Ok(Self {
            id,
            name,
            email,
            phone: form.phone.trim().to_string(),
            subject: form.subject.trim().to_string(),
            body,
            status: MessageStatus::Pending,
            admin_reply: None,
            replied_at: None,
            created_at: Timestamp::now(),
        })
    }

    /// Stores (or replaces) the administrator's reply.
    pub fn reply(&mut self, text: &str) -> Result<(), ContactError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ContactError::validation("reply", "Please enter a reply message"));
        }
        self.status = self.transition(MessageStatus::Replied)?;
        self.admin_reply = Some(text.to_string());
        self.replied_at = Some(Timestamp::now());
        Ok(())
    }

    pub fn resolve(&mut self) -> Result<(), ContactError> {
        self.status = self.transition(MessageStatus::Resolved)?;
        Ok(())
    }

    fn transition(&self, target: MessageStatus) -> Result<MessageStatus, ContactError> {
        self.status
            .transition_to(target)
            .map_err(|e| ContactError::InvalidState(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) fn sample_form() -> ContactForm {
    ContactForm {
        name: "Ravi".to_string(),
        email: "ravi@example.com".to_string(),
        phone: "".to_string(),
        subject: "Timings".to_string(),
        body: "Are you open on Sundays?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage::submit(MessageId::new(), sample_form()).unwrap()
    }

    #[test]
    fn submitted_message_is_pending() {
        let msg = message();
        assert_eq!(msg.status, MessageStatus::Pending);
        assert!(msg.admin_reply.is_none());
    }

    #[test]
    fn subject_is_optional() {
        let form = ContactForm {
            subject: "  ".to_string(),
            ..sample_form()
        };
        assert_eq!(ContactMessage::submit(MessageId::new(), form).unwrap().subject, "");
    }

    #[test]
    fn body_is_required() {
        let form = ContactForm {
            body: " ".to_string(),
            ..sample_form()
        };
        assert!(matches!(
            ContactMessage::submit(MessageId::new(), form),
            Err(ContactError::ValidationFailed { ref field, .. }) if field == "body"
        ));
    }

    #[test]
    fn email_must_look_like_an_address() {
        let form = ContactForm {
            email: "ravi".to_string(),
            ..sample_form()
        };
        assert!(ContactMessage::submit(MessageId::new(), form).is_err());
    }

    #[test]
    fn reply_sets_status_and_timestamp() {
        let mut msg = message();
        msg.reply("  Yes, 6am to noon. ").unwrap();
        assert_eq!(msg.status, MessageStatus::Replied);
        assert_eq!(msg.admin_reply.as_deref(), Some("Yes, 6am to noon."));
        assert!(msg.replied_at.is_some());
    }

    #[test]
    fn reply_can_be_edited() {
        let mut msg = message();
        msg.reply("first").unwrap();
        msg.reply("second").unwrap();
        assert_eq!(msg.admin_reply.as_deref(), Some("second"));
    }

    #[test]
    fn blank_reply_is_rejected() {
        let mut msg = message();
        assert!(msg.reply("   ").is_err());
        assert_eq!(msg.status, MessageStatus::Pending);
    }

    #[test]
    fn resolved_is_terminal() {
        let mut msg = message();
        msg.resolve().unwrap();
        assert!(msg.status.is_terminal());
        assert!(matches!(msg.reply("late"), Err(ContactError::InvalidState(_))));
        assert!(msg.resolve().is_err());
    }
}
