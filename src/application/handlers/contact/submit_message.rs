//! SubmitContactMessageHandler - Stores a visitor's contact-form message.

use std::sync::Arc;

use crate::domain::contact::{ContactError, ContactForm, ContactMessage};
use crate::domain::foundation::MessageId;
use crate::ports::ContactMessageRepository;

/// No session required.
pub struct SubmitContactMessageHandler {
    messages: Arc<dyn ContactMessageRepository>,
}

impl SubmitContactMessageHandler {
    pub fn new(messages: Arc<dyn ContactMessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(&self, form: ContactForm) -> Result<ContactMessage, ContactError> {
        let message = ContactMessage::submit(MessageId::new(), form)?;
        self.messages.save(&message).await?;

        tracing::info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }
}
