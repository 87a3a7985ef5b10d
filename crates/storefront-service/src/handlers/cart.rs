//! Shopping cart handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use storefront_core::{AddCartItem, CartItem};
use storefront_store::schema::limits;

use super::{ensure_found, message, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// List a user's cart lines.
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let items = state
        .transactional
        .list_cart(user_id, limits::RELATIONAL_LIST)
        .await?;
    Ok(Json(items))
}

/// Add a product to a user's cart.
///
/// Merges into an existing line when the schema allows it; otherwise falls
/// back to inserting a new line.
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(item): ApiJson<AddCartItem>,
) -> Result<(StatusCode, Json<CartItem>), ApiError> {
    let line = match state.transactional.upsert_cart_item(user_id, &item).await {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(
                user_id,
                product_id = %item.product_id,
                error = %e,
                "Cart upsert failed, inserting a new line"
            );
            state.transactional.insert_cart_item(user_id, &item).await?
        }
    };

    tracing::info!(user_id, cart_item_id = line.id, "Cart item added");

    Ok((StatusCode::CREATED, Json(line)))
}

/// Remove one line from a user's cart.
pub async fn remove_from_cart(
    State(state): State<Arc<AppState>>,
    ApiPath((user_id, item_id)): ApiPath<(i32, i32)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state
        .transactional
        .remove_cart_item(user_id, item_id)
        .await?;
    ensure_found(affected, "Cart item not found")?;

    Ok(message("Item removed from cart"))
}

/// Empty a user's cart. Succeeds even when the cart is already empty.
pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.transactional.clear_cart(user_id).await?;

    tracing::info!(user_id, removed, "Cart cleared");

    Ok(message("Cart cleared successfully"))
}
