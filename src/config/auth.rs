//! Authentication configuration
//!
//! Access tokens are HS256 JWTs signed by the identity provider with a
//! shared secret.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: SecretString,

    /// Expected `iss` claim, checked when set
    pub issuer: Option<String>,

    /// Expected `aud` claim, checked when set
    pub audience: Option<String>,

    /// Clock skew allowance for `exp`
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(secret.into()),
            issuer: None,
            audience: None,
            leeway_secs: default_leeway(),
        }
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}
