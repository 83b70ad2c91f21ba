//! Email configuration (Mailjet)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Mailjet public API key (basic-auth user)
    #[serde(default)]
    pub api_key_public: String,

    /// Mailjet private API key (basic-auth password)
    #[serde(default = "empty_secret")]
    pub api_key_private: SecretString,

    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Log messages instead of sending them
    #[serde(default)]
    pub dry_run: bool,
}

impl EmailConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.sender_email.contains('@') {
            return Err(ValidationError::InvalidSenderEmail);
        }
        if self.dry_run {
            return Ok(());
        }
        if self.api_key_public.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__API_KEY_PUBLIC"));
        }
        if self.api_key_private.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__API_KEY_PRIVATE"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidMailApiUrl);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key_public: String::new(),
            api_key_private: empty_secret(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout(),
            dry_run: false,
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_sender_email() -> String {
    "noreply@gym.example.com".to_string()
}

fn default_sender_name() -> String {
    "Gym Management".to_string()
}

fn default_api_base_url() -> String {
    "https://api.mailjet.com".to_string()
}

fn default_timeout() -> u64 {
    10
}
