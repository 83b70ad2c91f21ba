//! ListContactMessagesHandler - Admin inbox.

use std::sync::Arc;

use crate::domain::contact::{ContactError, ContactMessage, MessageStatus};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::ContactMessageRepository;

#[derive(Debug, Clone, Default)]
pub struct ListContactMessagesQuery {
    /// `None` lists every message.
    pub status: Option<MessageStatus>,
}

pub struct ListContactMessagesHandler {
    messages: Arc<dyn ContactMessageRepository>,
}

impl ListContactMessagesHandler {
    pub fn new(messages: Arc<dyn ContactMessageRepository>) -> Self {
        Self { messages }
    }

    /// Newest first.
    pub async fn handle(
        &self,
        actor: &AuthenticatedUser,
        query: ListContactMessagesQuery,
    ) -> Result<Vec<ContactMessage>, ContactError> {
        actor.require_admin()?;

        let messages = self.messages.list().await?;
        Ok(match query.status {
            Some(status) => messages.into_iter().filter(|m| m.status == status).collect(),
            None => messages,
        })
    }
}
