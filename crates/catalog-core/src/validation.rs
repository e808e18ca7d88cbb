//! # Validation Module
//!
//! Input validation and normalization for catalog requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (catalog-api)                                 │
//! │  └── Query string / JSON decoded into raw structs (all strings)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── limit, category, cursor, search text                              │
//! │  └── product draft → NewProduct                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK constraints (price >= 0, stock >= 0, category)              │
//! │                                                                         │
//! │  Every client error is raised at layer 2, before any store call.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{parse_limit, sanitize_search_query};
//!
//! assert_eq!(parse_limit(None).unwrap(), 10);
//! assert_eq!(parse_limit(Some("25")).unwrap(), 25);
//! assert!(parse_limit(Some("100")).is_err());
//!
//! assert_eq!(sanitize_search_query(Some("  usb   hub ")).unwrap(), "usb hub");
//! ```

use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::types::{Category, NewProduct, ProductDraft, ProductId};
use crate::{
    DEFAULT_PAGE_LIMIT, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_PAGE_LIMIT, MAX_SEARCH_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Normalization
// =============================================================================

/// Trims, collapses internal whitespace runs to one space and truncates to
/// `max_chars` characters.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::normalize_text;
///
/// assert_eq!(normalize_text("  Blue \t\n  Shirt ", 120), "Blue Shirt");
/// assert_eq!(normalize_text("abcdef", 3), "abc");
/// ```
pub fn normalize_text(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

// =============================================================================
// Query Parameter Parsers
// =============================================================================

/// Parses the page size.
///
/// ## Rules
/// - Absent or empty: [`DEFAULT_PAGE_LIMIT`]
/// - Otherwise an integer in `1..=MAX_PAGE_LIMIT`
/// - Out-of-range values are rejected, never clamped
pub fn parse_limit(raw: Option<&str>) -> CatalogResult<u32> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_PAGE_LIMIT),
        Some(raw) => raw,
    };

    match raw.parse::<u32>() {
        Ok(limit) if (1..=MAX_PAGE_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(CatalogError::invalid_limit()),
    }
}

/// Parses an optional category filter. Unknown names are an error.
pub fn parse_category(raw: Option<&str>) -> CatalogResult<Option<Category>> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some),
    }
}

/// Parses an optional resume cursor.
///
/// A present cursor must decode to a [`ProductId`]; a malformed one is a
/// client error rather than "start from the beginning".
pub fn parse_cursor(raw: Option<&str>) -> CatalogResult<Option<ProductId>> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => ProductId::parse(raw)
            .map(Some)
            .map_err(|_| CatalogError::InvalidCursor(raw.to_string())),
    }
}

/// Normalizes the free-text search term.
///
/// ## Rules
/// - Required: absent or whitespace-only is `MissingSearchQuery`
/// - Whitespace collapsed, truncated to [`MAX_SEARCH_LEN`] characters
///
/// The result is still raw user text; [`crate::query::like_pattern`] escapes
/// it before it goes anywhere near the store.
pub fn sanitize_search_query(raw: Option<&str>) -> CatalogResult<String> {
    let normalized = normalize_text(raw.unwrap_or_default(), MAX_SEARCH_LEN);
    if normalized.is_empty() {
        return Err(CatalogError::MissingSearchQuery);
    }
    Ok(normalized)
}

// =============================================================================
// Product Payload
// =============================================================================

/// Validates and normalizes a raw create payload.
///
/// ## Flow
/// ```text
/// ProductDraft (all Option)
///      │
///      ├── name        → normalize(120)  → empty? "Product name is required"
///      ├── description → normalize(2000) → empty? "Product description is required"
///      ├── price       → finite && >= 0?
///      ├── stock       → whole && >= 0?
///      └── category    → present? known?
///      │
///      ▼
/// NewProduct (typed)
/// ```
pub fn validate_product_draft(draft: ProductDraft) -> CatalogResult<NewProduct> {
    let name = normalize_text(draft.name.as_deref().unwrap_or_default(), MAX_NAME_LEN);
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name",
            label: "Product name",
        }
        .into());
    }

    let description = normalize_text(
        draft.description.as_deref().unwrap_or_default(),
        MAX_DESCRIPTION_LEN,
    );
    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description",
            label: "Product description",
        }
        .into());
    }

    let price = validate_price(draft.price)?;
    let stock = validate_stock(draft.stock)?;
    let category = validate_category(draft.category.as_deref())?;

    Ok(NewProduct {
        name,
        description,
        price,
        stock,
        category,
    })
}

/// Price must be finite and non-negative. Zero is allowed.
pub fn validate_price(price: Option<f64>) -> ValidationResult<f64> {
    match price {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::NotNonNegativeNumber {
            field: "price",
            label: "Price",
        }),
    }
}

/// Stock must be a whole, non-negative number that fits in an `i64`.
pub fn validate_stock(stock: Option<f64>) -> ValidationResult<i64> {
    match stock {
        Some(stock)
            if stock.is_finite() && stock.fract() == 0.0 && (0.0..i64::MAX as f64).contains(&stock) =>
        {
            Ok(stock as i64)
        }
        _ => Err(ValidationError::NotNonNegativeInteger {
            field: "stock",
            label: "Stock",
        }),
    }
}

fn validate_category(raw: Option<&str>) -> ValidationResult<Category> {
    match raw.map(str::trim) {
        None | Some("") => Err(ValidationError::Required {
            field: "category",
            label: "Category",
        }),
        Some(raw) => raw
            .parse()
            .map_err(|_| ValidationError::UnknownCategory(raw.to_string())),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
