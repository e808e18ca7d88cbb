//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CatalogError     - Client input errors (limit, cursor, ...)       │
//! │  └── ValidationError  - Product field violations                       │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - CatalogError | StorageUnavailable              │
//! │                                                                         │
//! │  catalog-api errors (in app)                                           │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError → ServiceError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every input error is detected before the store is touched
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::MAX_PAGE_LIMIT;

// =============================================================================
// Catalog Error
// =============================================================================

/// Client input errors for catalog operations.
///
/// None of these are retried or swallowed: each one is surfaced to the
/// caller with its own message.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Limit is not an integer in `[1, max]`.
    #[error("Limit must be between 1 and {max}")]
    InvalidLimit { max: u32 },

    /// Category is not one of the closed enumeration.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Cursor does not decode to a product id.
    ///
    /// ## When This Occurs
    /// - Client tampered with or truncated `nextCursor`
    /// - Cursor copied from a different system
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Search requested with empty or whitespace-only text.
    #[error("Query parameter q is required")]
    MissingSearchQuery,

    /// A product field failed validation on create.
    #[error("{0}")]
    InvalidProductField(#[from] ValidationError),
}

impl CatalogError {
    /// Creates an InvalidLimit error against the hard page maximum.
    pub fn invalid_limit() -> Self {
        CatalogError::InvalidLimit {
            max: MAX_PAGE_LIMIT,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Product payload validation errors.
///
/// Each variant names the offending field so clients can highlight it.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The payload is not an object at all.
    #[error("Invalid product payload")]
    InvalidPayload,

    /// A required field is missing or empty after normalization.
    #[error("{label} is required")]
    Required { field: &'static str, label: &'static str },

    /// Numeric value must be finite and non-negative.
    #[error("{label} must be a non-negative number")]
    NotNonNegativeNumber { field: &'static str, label: &'static str },

    /// Numeric value must be a whole number and non-negative.
    #[error("{label} must be a non-negative integer")]
    NotNonNegativeInteger { field: &'static str, label: &'static str },

    /// Category given but not one of the closed enumeration.
    #[error("Invalid category: {0}")]
    UnknownCategory(String),
}

impl ValidationError {
    /// Returns the payload field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidPayload => None,
            ValidationError::UnknownCategory(_) => Some("category"),
            ValidationError::Required { field, .. }
            | ValidationError::NotNonNegativeNumber { field, .. }
            | ValidationError::NotNonNegativeInteger { field, .. } => Some(*field),
        }
    }
}

// =============================================================================
// Product Id Error
// =============================================================================

/// A string that is not a 24-digit hex product id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid product id")]
pub struct InvalidProductId(pub String);

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::invalid_limit().to_string(),
            "Limit must be between 1 and 50"
        );
        assert_eq!(
            CatalogError::MissingSearchQuery.to_string(),
            "Query parameter q is required"
        );
        assert_eq!(
            CatalogError::InvalidCategory("TOYS".to_string()).to_string(),
            "Invalid category: TOYS"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name",
            label: "Product name",
        };
        assert_eq!(err.to_string(), "Product name is required");
        assert_eq!(err.field(), Some("name"));

        let err = ValidationError::NotNonNegativeInteger {
            field: "stock",
            label: "Stock",
        };
        assert_eq!(err.to_string(), "Stock must be a non-negative integer");
    }

    #[test]
    fn test_validation_converts_to_catalog_error() {
        let err: CatalogError = ValidationError::InvalidPayload.into();
        assert!(matches!(err, CatalogError::InvalidProductField(_)));
        assert_eq!(err.to_string(), "Invalid product payload");
    }
}
