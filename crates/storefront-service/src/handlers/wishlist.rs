//! Wishlist handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use storefront_core::{AddWishlistItem, Wishlist};

use super::{ensure_found, message, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// List a user's saved products.
pub async fn get_wishlist(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<Vec<Wishlist>>, ApiError> {
    let entries = state.documents.wishlist_for_user(user_id).await?;
    Ok(Json(entries))
}

/// Save a product. Repeated saves create repeated entries.
pub async fn add_to_wishlist(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(item): ApiJson<AddWishlistItem>,
) -> Result<(StatusCode, Json<Wishlist>), ApiError> {
    let entry = state
        .documents
        .insert_wishlist_item(user_id, &item.product_id)
        .await?;

    tracing::info!(user_id, product_id = %entry.product_id, "Wishlist item added");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Remove one saved entry for a product.
pub async fn remove_from_wishlist(
    State(state): State<Arc<AppState>>,
    ApiPath((user_id, product_id)): ApiPath<(i32, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .documents
        .delete_wishlist_item(user_id, &product_id)
        .await?;
    ensure_found(deleted, "Wishlist item not found")?;

    tracing::info!(user_id, product_id = %product_id, "Wishlist item removed");

    Ok(message("Item removed from wishlist"))
}
