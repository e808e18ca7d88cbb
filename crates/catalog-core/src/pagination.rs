//! # Pagination
//!
//! Pure page assembly for keyset (seek) pagination.
//!
//! ## The limit + 1 Trick
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  limit = 2, store asked for 3 rows (id > cursor ORDER BY id)           │
//! │                                                                         │
//! │  Store returned 3:  [A, B, C]                                          │
//! │                          │  └── probe row: proves more exist, dropped  │
//! │                          ▼                                              │
//! │  Page { records: [A, B], has_more: true, next_cursor: Some(B.id) }     │
//! │                                                                         │
//! │  Store returned 2:  [A, B]                                             │
//! │  Page { records: [A, B], has_more: false, next_cursor: None }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `next_cursor` is `Some` exactly when `has_more` is true. Keyset paging
//! stays correct under concurrent inserts (no skipped or repeated rows) at
//! the cost of forward-only traversal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductId};

// =============================================================================
// Page
// =============================================================================

/// One window of records plus the token to resume after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Product>,
    pub has_more: bool,
    pub next_cursor: Option<ProductId>,
}

impl Page {
    /// An empty, final page.
    pub fn empty() -> Self {
        Page {
            records: Vec::new(),
            has_more: false,
            next_cursor: None,
        }
    }

    /// Builds a page from a fetch of up to `limit + 1` rows in ascending id
    /// order, dropping the probe row if present.
    pub fn from_overfetch(mut records: Vec<Product>, limit: u32) -> Self {
        let limit = limit as usize;
        if records.len() <= limit {
            return Page {
                records,
                has_more: false,
                next_cursor: None,
            };
        }

        records.truncate(limit);
        let next_cursor = records.last().map(|p| p.id.clone());
        Page {
            // limit == 0 leaves nothing to resume from
            has_more: next_cursor.is_some(),
            records,
            next_cursor,
        }
    }

    /// Page metadata for the response body.
    pub fn info(&self) -> PageInfo {
        PageInfo {
            next_cursor: self.next_cursor.clone(),
            has_more: self.has_more,
        }
    }
}

/// Pagination block of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageInfo {
    pub next_cursor: Option<ProductId>,
    pub has_more: bool,
}

// =============================================================================
// Stats
// =============================================================================

/// Stock counts over the whole filtered population (cursor ignored).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Stats {
    #[ts(type = "number")]
    pub total: u64,
    /// `stock > 0`
    #[ts(type = "number")]
    pub in_stock: u64,
    /// `stock <= 0`
    #[ts(type = "number")]
    pub out_of_stock: u64,
}

impl Stats {
    /// Whether the three counts agree with each other.
    pub fn is_consistent(&self) -> bool {
        self.in_stock + self.out_of_stock == self.total
    }
}

// =============================================================================
// Response
// =============================================================================

/// Body returned by both list and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageResponse {
    pub data: Vec<Product>,
    pub pagination: PageInfo,
    pub stats: Stats,
}

impl PageResponse {
    pub fn new(page: Page, stats: Stats) -> Self {
        let pagination = page.info();
        PageResponse {
            data: page.records,
            pagination,
            stats,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
