//! # Repository Module
//!
//! Database repository implementations for the product catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CatalogService                                                        │
//! │       │                                                                 │
//! │       │  db.products().find(&filter, SortOrder::IdAsc, 11)             │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── find(&self, filter, sort, limit)                                  │
//! │  ├── count(&self, filter)                                              │
//! │  ├── stats(&self, filter)                                              │
//! │  ├── insert(&self, product)                                            │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query (bound parameters)                                   │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product pages, counts and inserts

pub mod product;
