//! # catalog-core: Pure Business Logic for the Product Catalog
//!
//! This crate is the **heart** of the catalog service. It contains the query
//! composition and pagination rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Catalog Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  catalog-api (axum HTTP)                        │   │
//! │  │   GET /api/products   GET /api/products/search   POST ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   query   │  │pagination │  │validation │  │   │
//! │  │   │  Product  │  │  Filter   │  │   Page    │  │  limit    │  │   │
//! │  │   │ ProductId │  │  Clause   │  │   Stats   │  │  cursor   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │       SQLite store, pagination executor, stats aggregator       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, Category)
//! - [`query`] - Filter composition and LIKE escaping
//! - [`pagination`] - Keyset page assembly, stats, response body
//! - [`validation`] - Request and payload validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::query::ListParams;
//!
//! let params = ListParams {
//!     limit: Some("2".to_string()),
//!     category: Some("BOOKS".to_string()),
//!     cursor: None,
//! };
//! let query = params.into_query().unwrap();
//!
//! assert_eq!(query.limit, 2);
//! assert_eq!(query.filter.clauses().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pagination;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CatalogError, CatalogResult, InvalidProductId, ValidationError};
pub use pagination::{Page, PageInfo, PageResponse, Stats};
pub use query::{Clause, ListParams, PageQuery, ProductFilter, SearchParams, SortOrder};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Hard upper bound on page size. Larger requests are rejected.
pub const MAX_PAGE_LIMIT: u32 = 50;

/// Search text is truncated to this many characters after normalization.
pub const MAX_SEARCH_LEN: usize = 100;

/// Product names are truncated to this many characters.
pub const MAX_NAME_LEN: usize = 120;

/// Product descriptions are truncated to this many characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;
