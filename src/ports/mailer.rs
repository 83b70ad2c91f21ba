//! Mailer port - hands rendered email to a delivery provider.
//!
//! Fire and report: no retry, no queue, no delivery tracking.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mail::OutboundEmail;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// The provider answered but refused the message.
    #[error("mail provider rejected the message: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("mail transport error: {0}")]
    Transport(String),

    /// Credentials or sender are missing.
    #[error("mailer is not configured: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }

    #[test]
    fn errors_render_their_cause() {
        assert_eq!(
            MailError::Rejected("invalid recipient".into()).to_string(),
            "mail provider rejected the message: invalid recipient"
        );
    }
}
