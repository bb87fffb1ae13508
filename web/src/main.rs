//! Ride-request HTTP server.
//!
//! Serves the driver, passenger and travel request API over an in-memory or
//! `PostgreSQL` entity store, selected by `STORAGE_BACKEND`.

use anyhow::Context;
use ride_request_core::{EntityStores, LinkBuilder, SystemClock};
use ride_request_postgres::PostgresEntityStore;
use ride_request_testing::in_memory_stores;
use ride_request_web::{build_router, AppState, Config, StorageBackend, DEFAULT_LOG_FILTER};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ride-request server");

    if let Some(raw) = &config.storage.unrecognized_backend {
        warn!(storage_backend = %raw, "Unknown storage backend, falling back to in-memory storage");
    }
    info!(
        bind_address = %config.bind_address(),
        storage_backend = %config.storage.backend,
        public_base_url = %config.public_base_url,
        "Configuration loaded"
    );

    let stores = build_stores(&config).await?;
    let state = AppState::new(
        stores,
        Arc::new(SystemClock),
        LinkBuilder::new(config.public_base_url.clone()),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "HTTP server listening");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut graceful_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = graceful_rx.changed().await;
    });

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout);
    let mut deadline_rx = shutdown_rx;
    let deadline = async move {
        let _ = deadline_rx.changed().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server.into_future() => result.context("HTTP server failed")?,
        () = deadline => {
            warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "Shutdown timeout elapsed, dropping in-flight requests"
            );
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Build the entity stores for the configured backend.
///
/// The postgres backend connects, then creates the schema if it is missing.
async fn build_stores(config: &Config) -> anyhow::Result<EntityStores> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory entity store; data is lost on restart");
            Ok(in_memory_stores())
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORAGE_BACKEND=postgres")?;

            info!("Connecting to entity store database...");
            let store = PostgresEntityStore::connect(url, config.storage.max_connections).await?;
            store.migrate().await?;
            info!("Entity store connected and migrated");

            Ok(EntityStores::from_backend(Arc::new(store)))
        }
    }
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
///
/// If a handler cannot be installed, that signal is never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
