//! # Product Routes
//!
//! HTTP handlers for listing, searching and creating products.
//!
//! ## Routes
//! ```text
//! GET  /api/products          ?cursor&limit&category      → 200 PageResponse
//! GET  /api/products/search   ?q&cursor&limit&category    → 200 PageResponse
//! POST /api/products          ProductDraft (JSON)         → 201 Product
//! GET  /health                                            → 200 | 503
//! ```
//!
//! Handlers only translate between HTTP and [`CatalogService`]; every rule
//! lives below this layer.
//!
//! [`CatalogService`]: catalog_db::CatalogService

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::{ListParams, PageResponse, Product, ProductDraft, SearchParams};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Lists one page of products.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError> {
    let Query(params) = params?;
    let response = state.catalog.list_page(params).await?;
    Ok(Json(response))
}

/// Searches product names; `q` is required.
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError> {
    let Query(params) = params?;
    let response = state.catalog.search_page(params).await?;
    Ok(Json(response))
}

/// Creates a product from a JSON payload.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(draft) = payload?;
    let product = state.catalog.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Liveness plus a store round-trip.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.catalog.database().health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}
