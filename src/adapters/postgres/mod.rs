//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAccountRepository` - Accounts with version-checked updates
//! - `PostgresPackageRepository` - Package CRUD
//! - `PostgresPurchaseReader` - Purchase queries
//! - `PostgresLedgerStore` - Transactional purchase + account writes
//! - `PostgresContactMessageRepository` - Contact-form messages

mod account_repository;
mod contact_message_repository;
mod package_repository;
mod purchase_store;

pub use account_repository::PostgresAccountRepository;
pub use contact_message_repository::PostgresContactMessageRepository;
pub use package_repository::PostgresPackageRepository;
pub use purchase_store::{PostgresLedgerStore, PostgresPurchaseReader};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

/// Opens the connection pool and optionally applies `migrations/`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok(pool)
}
