//! Contact message repository port.

use async_trait::async_trait;

use crate::domain::contact::ContactMessage;
use crate::domain::foundation::{DomainError, MessageId};

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn save(&self, message: &ContactMessage) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `MessageNotFound` if the message doesn't exist
    async fn update(&self, message: &ContactMessage) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ContactMessage>, DomainError>;

    /// All messages, newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_message_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ContactMessageRepository) {}
    }
}
