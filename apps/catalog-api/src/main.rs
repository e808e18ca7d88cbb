//! # Catalog API
//!
//! HTTP server entry point.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env ──► CatalogConfig::load ──► tracing ──► Database::new (migrate)   │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │              axum::serve(0.0.0.0:PORT) ◄── create_router + CORS         │
//! │                      │                                                  │
//! │                      ▼ Ctrl+C / SIGTERM                                 │
//! │              graceful shutdown ──► Database::close                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_api::{cors_layer, create_router, AppState, CatalogConfig};
use catalog_db::{CatalogService, Database};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Load configuration
    let config = CatalogConfig::load()?;

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Catalog API server...");
    if !dotenv_loaded {
        warn!("No .env file found, using process environment only");
    }
    info!(
        port = config.port,
        database = %config.database_path.display(),
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    // Build router
    let state = AppState::new(CatalogService::new(db.clone()));
    let app = create_router(state).layer(cors_layer(&config.cors_origins)?);

    // Start server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
