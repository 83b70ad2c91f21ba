//! Application configuration
//!
//! Settings come from environment variables (and a `.env` file in development)
//! under the `GYM_MEMBERSHIP` prefix, with `__` separating nested keys.
//!
//! ```no_run
//! use gym_membership::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod ledger;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use ledger::LedgerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bearer token verification
    pub auth: AuthConfig,

    /// Outbound mail (Mailjet)
    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// - `GYM_MEMBERSHIP__SERVER__PORT=5000` -> `server.port`
    /// - `GYM_MEMBERSHIP__DATABASE__URL=...` -> `database.url`
    /// - `GYM_MEMBERSHIP__AUTH__JWT_SECRET=...` -> `auth.jwt_secret`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GYM_MEMBERSHIP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.email.validate()?;
        self.ledger.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "GYM_MEMBERSHIP__DATABASE__URL",
        "GYM_MEMBERSHIP__DATABASE__IN_MEMORY",
        "GYM_MEMBERSHIP__AUTH__JWT_SECRET",
        "GYM_MEMBERSHIP__EMAIL__API_KEY_PUBLIC",
        "GYM_MEMBERSHIP__EMAIL__API_KEY_PRIVATE",
        "GYM_MEMBERSHIP__EMAIL__DRY_RUN",
        "GYM_MEMBERSHIP__SERVER__PORT",
        "GYM_MEMBERSHIP__SERVER__ENVIRONMENT",
        "GYM_MEMBERSHIP__LEDGER__REMINDER_LOOKAHEAD_DAYS",
    ];

    fn set_minimal_env() {
        env::set_var("GYM_MEMBERSHIP__DATABASE__URL", "postgresql://test@localhost/gym");
        env::set_var("GYM_MEMBERSHIP__AUTH__JWT_SECRET", "test-secret");
        env::set_var("GYM_MEMBERSHIP__EMAIL__API_KEY_PUBLIC", "mj-public");
        env::set_var("GYM_MEMBERSHIP__EMAIL__API_KEY_PRIVATE", "mj-private");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn loads_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/gym");
        assert_eq!(config.email.api_key_public, "mj-public");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults_apply_to_unset_sections() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.ledger.reminder_lookahead_days, 2);
        assert_eq!(config.email.sender_name, "Gym Management");
    }

    #[test]
    fn nested_overrides_are_read() {
        let config = load_with(&[
            ("GYM_MEMBERSHIP__SERVER__PORT", "3000"),
            ("GYM_MEMBERSHIP__LEDGER__REMINDER_LOOKAHEAD_DAYS", "5"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ledger.reminder_lookahead_days, 5);
    }

    #[test]
    fn production_rejects_short_jwt_secret() {
        let config = load_with(&[("GYM_MEMBERSHIP__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WeakJwtSecret));
    }

    #[test]
    fn missing_jwt_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("GYM_MEMBERSHIP__DATABASE__IN_MEMORY", "true");
        let result = AppConfig::load();
        clear_env();
        assert!(result.is_err());
    }
}
