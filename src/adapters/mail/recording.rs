//! Mailer that keeps messages in memory instead of sending them.
//!
//! Used for `email.dry_run` and in tests; `failing()` makes every send fail.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::mail::OutboundEmail;
use crate::ports::{MailError, Mailer};

#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    failure: Option<MailError>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: MailError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        tracing::info!(to = %email.to_email, subject = %email.subject, "Email recorded (not sent)");
        self.sent
            .lock()
            .map_err(|_| MailError::Transport("recording mailer poisoned".to_string()))?
            .push(email.clone());
        Ok(())
    }
}
