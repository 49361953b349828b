//! Server startup and shutdown.
//!
//! `run_server` opens the database pool, optionally migrates, builds the
//! application state and router, then serves until a shutdown signal
//! arrives. The pool is closed once the server has drained.

use crate::config::Config;
use crate::db::{MappingStore, Repository};
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::services::{ShortCodeGenerator, ShortenerService};
use crate::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server with the given configuration.
///
/// # Errors
///
/// Fails if the database is unreachable, migrations fail, the address cannot
/// be bound, or the server stops with an I/O error.
pub async fn run_server(config: Config, should_migrate: bool) -> AppResult<()> {
    info!("Starting shrtn server...");
    info!(storage_service = %config.storage.url, "Storage service configured");

    info!("Connecting to database...");
    let repository = Repository::new(&config.database).await?;
    repository.ping().await?;
    info!("Database connection verified");

    if should_migrate {
        info!("Running database migrations...");
        repository.run_migrations().await?;
        info!("Migrations completed successfully");
    }

    let store: Arc<dyn MappingStore> = Arc::new(repository.clone());
    let shortener = ShortenerService::new(store.clone(), ShortCodeGenerator::new(), &config.shortener);
    let state = Arc::new(AppState { store, shortener });

    let app = routes::create_router(state, &config.http);

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)));

    repository.close().await;
    info!("Server shutdown complete");

    served
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
///
/// # Panics
///
/// Panics if the signal handlers cannot be installed; without them the
/// process could never shut down gracefully.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    info!("Shutdown signal received");
}
