//! ResolveContactMessageHandler - Closes a contact message.

use std::sync::Arc;

use crate::domain::contact::{ContactError, ContactMessage};
use crate::domain::foundation::{AuthenticatedUser, MessageId};
use crate::ports::ContactMessageRepository;

#[derive(Debug, Clone)]
pub struct ResolveContactMessageCommand {
    pub actor: AuthenticatedUser,
    pub message_id: MessageId,
}

pub struct ResolveContactMessageHandler {
    messages: Arc<dyn ContactMessageRepository>,
}

impl ResolveContactMessageHandler {
    pub fn new(messages: Arc<dyn ContactMessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(
        &self,
        cmd: ResolveContactMessageCommand,
    ) -> Result<ContactMessage, ContactError> {
        cmd.actor.require_admin()?;

        let mut message = self
            .messages
            .find_by_id(&cmd.message_id)
            .await?
            .ok_or(ContactError::NotFound(cmd.message_id))?;

        message.resolve()?;
        self.messages.update(&message).await?;

        tracing::info!(message_id = %message.id, "Contact message resolved");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::membership::fixtures::admin;
    use crate::domain::contact::{sample_form, MessageStatus};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn resolved_is_terminal() {
        let store = Arc::new(InMemoryStore::new());
        let message = ContactMessage::submit(MessageId::new(), sample_form()).unwrap();
        store.save(&message).await.unwrap();
        let handler = ResolveContactMessageHandler::new(store.clone());
        let cmd = ResolveContactMessageCommand {
            actor: admin(),
            message_id: message.id,
        };

        let resolved = handler.handle(cmd.clone()).await.unwrap();
        assert_eq!(resolved.status, MessageStatus::Resolved);

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn unknown_message_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = ResolveContactMessageHandler::new(store.clone())
            .handle(ResolveContactMessageCommand {
                actor: admin(),
                message_id: MessageId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MessageNotFound);
    }
}
