//! Mailjet Send API v3.1 adapter.
//!
//! ```ignore
//! let mailer = MailjetMailer::new(&config.email)?;
//! mailer.send(&otp_email("a@example.com", "123456")).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::EmailConfig;
use crate::domain::mail::OutboundEmail;
use crate::ports::{MailError, Mailer};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    from: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    text_part: &'a str,
    #[serde(rename = "HTMLPart", skip_serializing_if = "Option::is_none")]
    html_part: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

pub struct MailjetMailer {
    client: Client,
    base_url: String,
    api_key_public: String,
    api_key_private: SecretString,
    sender_email: String,
    sender_name: String,
}

impl MailjetMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        if config.api_key_public.is_empty() || config.api_key_private.expose_secret().is_empty() {
            return Err(MailError::Configuration("Mailjet API keys are not set".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| MailError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key_public: config.api_key_public.clone(),
            api_key_private: config.api_key_private.clone(),
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}/v3.1/send", self.base_url)
    }

    fn request_body<'a>(&'a self, email: &'a OutboundEmail) -> SendRequest<'a> {
        SendRequest {
            messages: vec![Message {
                from: Address {
                    email: &self.sender_email,
                    name: Some(&self.sender_name),
                },
                to: vec![Address {
                    email: &email.to_email,
                    name: email.to_name.as_deref(),
                }],
                subject: &email.subject,
                text_part: &email.text,
                html_part: email.html.as_deref(),
            }],
        }
    }
}

#[async_trait]
impl Mailer for MailjetMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(self.send_url())
            .basic_auth(&self.api_key_public, Some(self.api_key_private.expose_secret()))
            .json(&self.request_body(email))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Transport("Mailjet request timed out".to_string())
                } else {
                    MailError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(to = %email.to_email, subject = %email.subject, "Email sent");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, to = %email.to_email, body = %body, "Mailjet refused email");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(MailError::Configuration(
                format!("Mailjet rejected credentials ({})", status),
            )),
            s if s.is_client_error() => Err(MailError::Rejected(format!("{}: {}", status, body))),
            _ => Err(MailError::Transport(format!("Mailjet returned {}", status))),
        }
    }
}

impl std::fmt::Debug for MailjetMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailjetMailer")
            .field("base_url", &self.base_url)
            .field("sender_email", &self.sender_email)
            .finish_non_exhaustive()
    }
}
