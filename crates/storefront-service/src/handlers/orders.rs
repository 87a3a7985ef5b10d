//! Order handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use storefront_core::{NewOrder, Order, UpdateOrderStatus, STATUS_CANCELLED};
use storefront_store::schema::limits;

use super::{ensure_found, message, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

const ORDER_NOT_FOUND: &str = "Order not found";

/// Create an order and its items in one transaction.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ApiJson(new_order): ApiJson<NewOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.transactional.create_order(&new_order).await?;

    tracing::info!(
        order_id = order.id,
        user_id = order.user_id,
        items = order.items.len(),
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders, without items.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .transactional
        .list_orders(limits::RELATIONAL_LIST)
        .await?;
    Ok(Json(orders))
}

/// Get one order with its items.
///
/// A failure reading the items still returns the header, with no items.
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Order>, ApiError> {
    let mut order = state
        .transactional
        .get_order(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(ORDER_NOT_FOUND.into()))?;

    match state.transactional.list_order_items(id).await {
        Ok(items) => order.items = items,
        Err(e) => tracing::warn!(order_id = id, error = %e, "Failed to load order items"),
    }

    Ok(Json(order))
}

/// Set an order's status.
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update): ApiJson<UpdateOrderStatus>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state
        .transactional
        .update_order_status(id, &update.status)
        .await?;
    ensure_found(affected, ORDER_NOT_FOUND)?;

    tracing::info!(order_id = id, status = %update.status, "Order status updated");

    Ok(message("Order status updated successfully"))
}

/// Mark an order cancelled.
pub async fn cancel_order(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state
        .transactional
        .update_order_status(id, STATUS_CANCELLED)
        .await?;
    ensure_found(affected, ORDER_NOT_FOUND)?;

    tracing::info!(order_id = id, "Order cancelled");

    Ok(message("Order cancelled successfully"))
}
