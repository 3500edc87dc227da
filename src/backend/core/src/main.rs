//! JobConnect Server - Main entry point

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use jobconnect_core::{
    api::{self, AppState},
    config::{Config, StorageBackend},
    notify::{LogNotifier, MailRelayNotifier, Notifier},
    store::{InMemoryStore, JobOfferStore, PostgresStore},
    telemetry,
};

#[derive(Debug, Parser)]
#[command(name = "jobconnect-server", version, about = "JobConnect job offer service")]
struct Cli {
    /// Configuration file; environment variables prefixed JOBCONNECT__ override it
    #[arg(short, long, env = "JOBCONNECT_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let metrics = telemetry::init_telemetry(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.storage.backend,
        "Starting JobConnect server"
    );

    let store: Arc<dyn JobOfferStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; records are lost on shutdown");
            Arc::new(InMemoryStore::new())
        }
        StorageBackend::Postgres => {
            let store = PostgresStore::connect(&config.database).await?;
            if config.database.run_migrations {
                store.migrate().await?;
                tracing::info!("Database migrations applied");
            }
            Arc::new(store)
        }
    };

    let notifier: Arc<dyn Notifier> = if config.mail.enabled {
        tracing::info!(relay = %config.mail.relay_url, "Mail notifications enabled");
        Arc::new(MailRelayNotifier::new(&config.mail)?)
    } else {
        Arc::new(LogNotifier)
    };

    let state = AppState::new(store, notifier, metrics, config.pagination.clone());
    let app = api::build_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!(address = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
