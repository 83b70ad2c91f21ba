//! Membership ledger settings

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::membership::ledger::MAX_REMINDER_LOOKAHEAD_DAYS;

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// How far ahead the expiry-reminder scan looks, in days
    #[serde(default = "default_lookahead")]
    pub reminder_lookahead_days: u32,
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_REMINDER_LOOKAHEAD_DAYS).contains(&self.reminder_lookahead_days) {
            return Err(ValidationError::InvalidReminderLookahead);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            reminder_lookahead_days: default_lookahead(),
        }
    }
}

fn default_lookahead() -> u32 {
    2
}
