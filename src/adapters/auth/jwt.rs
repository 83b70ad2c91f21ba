//! HS256 JWT session validator.
//!
//! Tokens are minted by the identity provider with a shared secret. This
//! adapter checks:
//!
//! - **Signature**: HS256 against the configured secret
//! - **Expiry (exp)**: required, with a small leeway
//! - **Issuer (iss)** and **Audience (aud)**: only when configured
//!
//! and maps `sub`, `email` and `role` onto an [`AuthenticatedUser`].

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AccountId, AuthError, AuthenticatedUser, Role};
use crate::ports::SessionValidator;

/// Claims this service reads from an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,

    #[serde(default)]
    pub email: Option<String>,

    pub exp: i64,

    #[serde(default)]
    pub role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match &config.issuer {
            Some(issuer) => validation.set_issuer(&[issuer]),
            None => validation.iss = None,
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!(error = %e, "Token issued for another service");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let id = AccountId::new(claims.sub).map_err(|_| {
            tracing::warn!("Token has an empty subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(
            id,
            claims.email.unwrap_or_default(),
            claims.role.unwrap_or_default(),
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.validation.iss)
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-with-enough-bytes-for-prod";

    fn sign(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: Option<Role>, exp_offset: i64) -> SessionClaims {
        SessionClaims {
            sub: "acc-42".to_string(),
            email: Some("asha@example.com".to_string()),
            exp: Utc::now().timestamp() + exp_offset,
            role,
            iss: None,
            aud: None,
        }
    }

    #[tokio::test]
    async fn valid_token_maps_to_user() {
        let validator = JwtSessionValidator::new(&AuthConfig::new(SECRET));
        let token = sign(&claims(Some(Role::Admin), 600), SECRET);

        let user = validator.validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "acc-42");
        assert_eq!(user.email, "asha@example.com");
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn missing_role_defaults_to_member() {
        let validator = JwtSessionValidator::new(&AuthConfig::new(SECRET));
        let token = sign(&claims(None, 600), SECRET);

        let user = validator.validate(&token).await.unwrap();
        assert_eq!(user.role, Role::Member);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let validator = JwtSessionValidator::new(&AuthConfig::new(SECRET));
        let token = sign(&claims(None, -3600), SECRET);

        assert_eq!(validator.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let validator = JwtSessionValidator::new(&AuthConfig::new(SECRET));
        let token = sign(&claims(None, 600), "some-other-secret");

        assert_eq!(validator.validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let validator = JwtSessionValidator::new(&AuthConfig::new(SECRET));
        assert_eq!(validator.validate("not-a-jwt").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn configured_issuer_must_match() {
        let config = AuthConfig {
            issuer: Some("https://id.example.com".to_string()),
            ..AuthConfig::new(SECRET)
        };
        let validator = JwtSessionValidator::new(&config);

        let mut foreign = claims(None, 600);
        foreign.iss = Some("https://elsewhere.example.com".to_string());
        assert_eq!(
            validator.validate(&sign(&foreign, SECRET)).await,
            Err(AuthError::InvalidToken)
        );

        let mut ours = claims(None, 600);
        ours.iss = Some("https://id.example.com".to_string());
        assert!(validator.validate(&sign(&ours, SECRET)).await.is_ok());
    }

    #[tokio::test]
    async fn configured_audience_must_match() {
        let config = AuthConfig {
            audience: Some("gym-api".to_string()),
            ..AuthConfig::new(SECRET)
        };
        let validator = JwtSessionValidator::new(&config);

        let mut token_claims = claims(None, 600);
        token_claims.aud = Some("billing-api".to_string());
        assert_eq!(
            validator.validate(&sign(&token_claims, SECRET)).await,
            Err(AuthError::InvalidToken)
        );
    }
}
