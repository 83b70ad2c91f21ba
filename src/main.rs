//! Gym membership server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gym_membership::adapters::auth::JwtSessionValidator;
use gym_membership::adapters::http::{app_router, AppState};
use gym_membership::adapters::mail::{MailjetMailer, RecordingMailer};
use gym_membership::adapters::memory::InMemoryStore;
use gym_membership::adapters::postgres::{
    self, PostgresAccountRepository, PostgresContactMessageRepository, PostgresLedgerStore,
    PostgresPackageRepository, PostgresPurchaseReader,
};
use gym_membership::config::{AppConfig, ServerConfig};
use gym_membership::ports::Mailer;

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("Invalid configuration")?;

    let mailer: Arc<dyn Mailer> = if config.email.dry_run {
        info!("Email dry run enabled; messages are recorded, not sent");
        Arc::new(RecordingMailer::new())
    } else {
        Arc::new(MailjetMailer::new(&config.email).context("Failed to build mail client")?)
    };

    let sessions = Arc::new(JwtSessionValidator::new(&config.auth));
    let lookahead = config.ledger.reminder_lookahead_days;

    let state = if config.database.in_memory {
        info!("Using in-memory store; data is lost on exit");
        let store = Arc::new(InMemoryStore::new());
        AppState {
            accounts: store.clone(),
            packages: store.clone(),
            purchases: store.clone(),
            ledger: store.clone(),
            messages: store,
            mailer,
            sessions,
            reminder_lookahead_days: lookahead,
        }
    } else {
        let pool = postgres::connect(&config.database)
            .await
            .context("Failed to connect to PostgreSQL")?;
        info!(
            max_connections = config.database.max_connections,
            "Database pool ready"
        );
        AppState {
            accounts: Arc::new(PostgresAccountRepository::new(pool.clone())),
            packages: Arc::new(PostgresPackageRepository::new(pool.clone())),
            purchases: Arc::new(PostgresPurchaseReader::new(pool.clone())),
            ledger: Arc::new(PostgresLedgerStore::new(pool.clone())),
            messages: Arc::new(PostgresContactMessageRepository::new(pool)),
            mailer,
            sessions,
            reminder_lookahead_days: lookahead,
        }
    };

    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, environment = ?config.server.environment, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
