//! Category handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use storefront_core::{Category, CategoryInput};
use storefront_store::schema::limits;

use super::{ensure_found, message, parse_object_id, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Create a category. `parent_id` is stored as given.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.documents.insert_category(&input).await?;

    tracing::info!(category_id = %category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// List categories.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .documents
        .list_categories(limits::DOCUMENT_LIST)
        .await?;
    Ok(Json(categories))
}

/// Get one category.
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Category>, ApiError> {
    let oid = parse_object_id(&id, "category")?;
    state
        .documents
        .find_category(&oid)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(CATEGORY_NOT_FOUND.into()))
}

/// Overwrite a category's fields.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "category")?;
    let matched = state.documents.update_category(&oid, &input).await?;
    ensure_found(matched, CATEGORY_NOT_FOUND)?;

    tracing::info!(category_id = %id, "Category updated");

    Ok(message("Category updated successfully"))
}

/// Delete a category.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "category")?;
    let deleted = state.documents.delete_category(&oid).await?;
    ensure_found(deleted, CATEGORY_NOT_FOUND)?;

    tracing::info!(category_id = %id, "Category deleted");

    Ok(message("Category deleted successfully"))
}
