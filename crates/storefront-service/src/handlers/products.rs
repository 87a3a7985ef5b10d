//! Product catalog handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use storefront_core::{Product, ProductInput};
use storefront_store::schema::limits;

use super::{ensure_found, message, parse_object_id, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Query string for product search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Text matched literally and case-insensitively.
    pub q: String,
}

/// Create a product.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.documents.insert_product(&input).await?;

    tracing::info!(product_id = %product.id, category = %product.category, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// List products.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.documents.list_products(limits::DOCUMENT_LIST).await?;
    Ok(Json(products))
}

/// Get one product.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Product>, ApiError> {
    let oid = parse_object_id(&id, "product")?;
    state
        .documents
        .find_product(&oid)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(PRODUCT_NOT_FOUND.into()))
}

/// Overwrite a product's fields.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "product")?;
    let matched = state.documents.update_product(&oid, &input).await?;
    ensure_found(matched, PRODUCT_NOT_FOUND)?;

    tracing::info!(product_id = %id, "Product updated");

    Ok(message("Product updated successfully"))
}

/// Delete a product.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "product")?;
    let deleted = state.documents.delete_product(&oid).await?;
    ensure_found(deleted, PRODUCT_NOT_FOUND)?;

    tracing::info!(product_id = %id, "Product deleted");

    Ok(message("Product deleted successfully"))
}

/// Search products by name, description or tag.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .documents
        .search_products(&query.q, limits::DOCUMENT_LIST)
        .await?;

    tracing::debug!(query = %query.q, hits = products.len(), "Product search");

    Ok(Json(products))
}

/// List products in one category.
pub async fn products_by_category(
    State(state): State<Arc<AppState>>,
    ApiPath(category): ApiPath<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .documents
        .products_in_category(&category, limits::DOCUMENT_LIST)
        .await?;
    Ok(Json(products))
}
