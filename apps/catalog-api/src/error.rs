//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Catalog API                        │
//! │                                                                         │
//! │  Handler                                                               │
//! │  Result<Json<T>, ApiError>                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ServiceError::Invalid(CatalogError) ──► 400 + specific code           │
//! │  ServiceError::StorageUnavailable    ──► 503 STORAGE_UNAVAILABLE       │
//! │  JsonRejection (bad create body)     ──► 400 INVALID_PRODUCT_FIELD     │
//! │  QueryRejection (bad query string)   ──► 400 INVALID_QUERY             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { "code": "INVALID_LIMIT", "message": "Limit must be between 1 and 50" }
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage details are logged here and never sent to the client.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::{CatalogError, ValidationError};
use catalog_db::ServiceError;
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_CURSOR",
///   "message": "Invalid cursor: not-an-id"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// `limit` outside 1..=50 or not an integer (400)
    InvalidLimit,

    /// Unknown `category` query value (400)
    InvalidCategory,

    /// `cursor` is not a product id (400)
    InvalidCursor,

    /// Search without usable `q` (400)
    MissingSearchQuery,

    /// Create payload rejected (400)
    InvalidProductField,

    /// Query string could not be decoded, e.g. a repeated parameter (400)
    InvalidQuery,

    /// Record store failed (503)
    StorageUnavailable,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidLimit
            | ErrorCode::InvalidCategory
            | ErrorCode::InvalidCursor
            | ErrorCode::MissingSearchQuery
            | ErrorCode::InvalidProductField
            | ErrorCode::InvalidQuery => StatusCode::BAD_REQUEST,
            ErrorCode::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

/// Converts client input errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let code = match &err {
            CatalogError::InvalidLimit { .. } => ErrorCode::InvalidLimit,
            CatalogError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            CatalogError::InvalidCursor(_) => ErrorCode::InvalidCursor,
            CatalogError::MissingSearchQuery => ErrorCode::MissingSearchQuery,
            CatalogError::InvalidProductField(_) => ErrorCode::InvalidProductField,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts service errors to API errors.
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(e) => e.into(),
            ServiceError::StorageUnavailable(e) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, "Storage unavailable");
                ApiError::new(ErrorCode::StorageUnavailable, "Storage unavailable")
            }
        }
    }
}

/// A create body that is not a JSON object of the expected shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected create payload");
        CatalogError::from(ValidationError::InvalidPayload).into()
    }
}

/// A query string that does not decode into the route's parameters.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected query string");
        ApiError::new(ErrorCode::InvalidQuery, "Invalid query string")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_db::DbError;

    #[test]
    fn test_catalog_errors_keep_their_message() {
        let err: ApiError = CatalogError::invalid_limit().into();
        assert_eq!(err.code, ErrorCode::InvalidLimit);
        assert_eq!(err.message, "Limit must be between 1 and 50");
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = CatalogError::InvalidCursor("zzz".to_string()).into();
        assert_eq!(err.code, ErrorCode::InvalidCursor);
        assert_eq!(err.message, "Invalid cursor: zzz");
    }

    #[test]
    fn test_storage_errors_are_not_echoed() {
        let err: ApiError =
            ServiceError::StorageUnavailable(DbError::QueryFailed("no such table".into())).into();
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert_eq!(err.code.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.message.contains("no such table"));
    }

    #[test]
    fn test_query_rejection_status() {
        assert_eq!(ErrorCode::InvalidQuery.status(), StatusCode::BAD_REQUEST);
        let json = serde_json::to_value(ErrorCode::InvalidQuery).unwrap();
        assert_eq!(json, "INVALID_QUERY");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::MissingSearchQuery, "Query parameter q is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "MISSING_SEARCH_QUERY");
        assert_eq!(json["message"], "Query parameter q is required");
    }
}
