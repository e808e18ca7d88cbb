//! # Catalog API
//!
//! HTTP server for browsing, searching and creating catalog products.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog API Server                              │
//! │                                                                         │
//! │  Browser ──► CORS ──► Router ──► routes.rs ──► CatalogService ──► SQLite│
//! │                          │                          │                   │
//! │                          │                          └─ ServiceError     │
//! │                          ▼                               │              │
//! │                    TraceLayer                            ▼              │
//! │                  (per-request spans)               ApiError (JSON)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (a `.env` file is honored):
//! - `PORT` - HTTP port (default: 5000)
//! - `DATABASE_PATH` - SQLite file (default: ./catalog.db)
//! - `CORS_ORIGIN` - Comma-separated allowed browser origins (default: http://localhost:3000)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT_SECS` - Pool acquire timeout (default: 30)
//! - `LOG_LEVEL` - Default log filter when `RUST_LOG` is unset (default: info)

pub mod config;
pub mod error;
pub mod routes;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use catalog_db::CatalogService;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::{CatalogConfig, ConfigError};
pub use error::{ApiError, ErrorCode};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        AppState { catalog }
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(routes::list_products).post(routes::create_product),
        )
        .route("/api/products/search", get(routes::search_products))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured browser origins.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| origin.as_ref().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::InvalidValue("CORS_ORIGIN".to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

// =============================================================================
// Router Tests
// =============================================================================
