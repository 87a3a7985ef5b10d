//! Inventory handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use storefront_core::{Inventory, InventoryUpdate, RestockRequest};
use storefront_store::schema::limits;

use super::{ensure_found, message, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

const INVENTORY_NOT_FOUND: &str = "Inventory not found";

/// List inventory rows.
pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Inventory>>, ApiError> {
    let rows = state
        .analytics
        .list_inventory(limits::RELATIONAL_LIST)
        .await?;
    Ok(Json(rows))
}

/// Get the inventory row for a product.
pub async fn get_inventory(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<String>,
) -> Result<Json<Inventory>, ApiError> {
    state
        .analytics
        .get_inventory(&product_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(INVENTORY_NOT_FOUND.into()))
}

/// Set quantity and location for a product, creating the row if absent.
pub async fn update_inventory(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<String>,
    ApiJson(update): ApiJson<InventoryUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state
        .analytics
        .update_inventory(&product_id, &update)
        .await?;

    if affected == 0 {
        state
            .analytics
            .insert_inventory(&product_id, &update)
            .await?;
        tracing::info!(product_id = %product_id, quantity = update.quantity, "Inventory created");
    } else {
        tracing::info!(product_id = %product_id, quantity = update.quantity, "Inventory updated");
    }

    Ok(message("Inventory updated successfully"))
}

/// Add stock to an existing product. Never creates a row.
pub async fn restock_inventory(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<String>,
    ApiJson(restock): ApiJson<RestockRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state
        .analytics
        .restock_inventory(&product_id, restock.quantity)
        .await?;
    ensure_found(affected, INVENTORY_NOT_FOUND)?;

    tracing::info!(product_id = %product_id, added = restock.quantity, "Inventory restocked");

    Ok(message("Inventory restocked successfully"))
}

/// List every row at or below its low-stock threshold.
pub async fn low_stock(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Inventory>>, ApiError> {
    let rows = state.analytics.low_stock_inventory().await?;
    Ok(Json(rows))
}
