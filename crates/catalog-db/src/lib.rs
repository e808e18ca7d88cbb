//! # catalog-db: Database Layer for the Product Catalog
//!
//! This crate provides the record store and the catalog operations built on
//! it. It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Catalog Data Flow                          │
//! │                                                                         │
//! │  HTTP handler (GET /api/products)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   catalog-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │CatalogService │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │ (service.rs)  │───►│ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │ list / search │    │ find / stats  │    │ 001_create_  │  │   │
//! │  │   │ create        │    │ insert        │    │  products    │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │                        ┌───────▼───────┐                        │   │
//! │  │                        │   Database    │                        │   │
//! │  │                        │   (pool.rs)   │                        │   │
//! │  │                        └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (DATABASE_PATH)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and service error types
//! - [`id`] - Product id assignment
//! - [`repository`] - Product repository
//! - [`service`] - List, search and create
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{CatalogService, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("catalog.db")).await?;
//! let catalog = CatalogService::new(db);
//!
//! let page = catalog.list_page(ListParams::default()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod id;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, ServiceError, ServiceResult};
pub use id::IdGenerator;
pub use pool::{Database, DbConfig};
pub use service::CatalogService;

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
