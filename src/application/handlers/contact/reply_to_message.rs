//! ReplyToContactMessageHandler - Stores an admin reply and emails it.
//!
//! The reply is persisted first. If the email then fails the caller gets
//! `ReplySavedEmailFailed`, so the stored reply is never mistaken for a
//! delivered one.

use std::sync::Arc;

use crate::domain::contact::{ContactError, ContactMessage};
use crate::domain::foundation::{AuthenticatedUser, MessageId};
use crate::domain::mail::{reply_email, ReplyEmail};
use crate::ports::{ContactMessageRepository, Mailer};

#[derive(Debug, Clone)]
pub struct ReplyToContactMessageCommand {
    pub actor: AuthenticatedUser,
    pub message_id: MessageId,
    pub reply: String,
}

pub struct ReplyToContactMessageHandler {
    messages: Arc<dyn ContactMessageRepository>,
    mailer: Arc<dyn Mailer>,
}

impl ReplyToContactMessageHandler {
    pub fn new(messages: Arc<dyn ContactMessageRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self { messages, mailer }
    }

    pub async fn handle(
        &self,
        cmd: ReplyToContactMessageCommand,
    ) -> Result<ContactMessage, ContactError> {
        cmd.actor.require_admin()?;

        let mut message = self
            .messages
            .find_by_id(&cmd.message_id)
            .await?
            .ok_or(ContactError::NotFound(cmd.message_id))?;

        message.reply(&cmd.reply)?;
        self.messages.update(&message).await?;
        tracing::info!(message_id = %message.id, admin = %cmd.actor.id, "Contact reply saved");

        let email = reply_email(&ReplyEmail {
            email: message.email.clone(),
            user_name: message.name.clone(),
            user_subject: Some(message.subject.clone()),
            user_message: Some(message.body.clone()),
            admin_reply: message.admin_reply.clone().unwrap_or_default(),
        });

        if let Err(e) = self.mailer.send(&email).await {
            tracing::error!(message_id = %message.id, error = %e, "Reply saved but email failed");
            return Err(ContactError::ReplySavedEmailFailed {
                message_id: message.id,
                reason: e.to_string(),
            });
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mail::RecordingMailer;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::admin;
    use crate::domain::contact::{sample_form, MessageStatus};
    use crate::domain::foundation::ErrorCode;
    use crate::ports::MailError;

    async fn seeded() -> (Arc<InMemoryStore>, ContactMessage) {
        let store = Arc::new(InMemoryStore::new());
        let message = ContactMessage::submit(MessageId::new(), sample_form()).unwrap();
        store.save(&message).await.unwrap();
        (store, message)
    }

    fn command(message_id: MessageId, reply: &str) -> ReplyToContactMessageCommand {
        ReplyToContactMessageCommand {
            actor: admin(),
            message_id,
            reply: reply.to_string(),
        }
    }

    #[tokio::test]
    async fn reply_is_stored_and_mailed() {
        let (store, message) = seeded().await;
        let mailer = Arc::new(RecordingMailer::new());

        let replied = ReplyToContactMessageHandler::new(store.clone(), mailer.clone())
            .handle(command(message.id, "Yes, 6am to noon."))
            .await
            .unwrap();

        assert_eq!(replied.status, MessageStatus::Replied);
        assert!(replied.replied_at.is_some());

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "ravi@example.com");
        assert_eq!(sent[0].subject, "Re: Timings");
        assert!(sent[0].text.contains("Yes, 6am to noon."));
    }

    #[tokio::test]
    async fn reply_can_be_edited() {
        let (store, message) = seeded().await;
        let handler =
            ReplyToContactMessageHandler::new(store.clone(), Arc::new(RecordingMailer::new()));
        handler.handle(command(message.id, "First")).await.unwrap();

        let edited = handler.handle(command(message.id, "Second")).await.unwrap();
        assert_eq!(edited.admin_reply.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn mail_failure_keeps_the_saved_reply() {
        let (store, message) = seeded().await;
        let mailer = Arc::new(RecordingMailer::failing(MailError::Rejected("bad address".into())));

        let err = ReplyToContactMessageHandler::new(store.clone(), mailer)
            .handle(command(message.id, "Yes"))
            .await
            .unwrap_err();

        assert!(matches!(err, ContactError::ReplySavedEmailFailed { message_id, .. } if message_id == message.id));
        let stored = store.find_by_id(&message.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MessageStatus::Replied);
        assert_eq!(stored.admin_reply.as_deref(), Some("Yes"));
    }

    #[tokio::test]
    async fn blank_reply_and_resolved_messages_are_rejected() {
        let (store, mut message) = seeded().await;
        let handler =
            ReplyToContactMessageHandler::new(store.clone(), Arc::new(RecordingMailer::new()));

        let err = handler.handle(command(message.id, "  ")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);

        message.resolve().unwrap();
        store.update(&message).await.unwrap();
        let err = handler.handle(command(message.id, "late")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }
}
