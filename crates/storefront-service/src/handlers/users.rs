//! User handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use storefront_core::{NewUser, Order, User, UserUpdate};
use storefront_store::schema::limits;

use super::{ensure_found, message, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// Register a user. The password is stored but never returned.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.transactional.create_user(&new_user).await?;

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// List users.
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .transactional
        .list_users(limits::RELATIONAL_LIST)
        .await?;
    Ok(Json(users))
}

/// Get one user.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<User>, ApiError> {
    state
        .transactional
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.into()))
}

/// Replace a user's profile fields.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.transactional.update_user(id, &update).await?;
    ensure_found(affected, USER_NOT_FOUND)?;

    tracing::info!(user_id = id, "User updated");

    Ok(message("User updated successfully"))
}

/// Delete a user.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.transactional.delete_user(id).await?;
    ensure_found(affected, USER_NOT_FOUND)?;

    tracing::info!(user_id = id, "User deleted");

    Ok(message("User deleted successfully"))
}

/// List a user's orders, without items.
pub async fn list_user_orders(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .transactional
        .list_orders_for_user(id, limits::RELATIONAL_LIST)
        .await?;
    Ok(Json(orders))
}
