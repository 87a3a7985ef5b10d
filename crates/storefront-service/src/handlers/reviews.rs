//! Review handlers.
//!
//! Reviews carry no ownership check: any caller may update or delete any
//! review by id.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use storefront_core::{NewReview, Review, ReviewUpdate};

use super::{ensure_found, message, parse_object_id, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

const REVIEW_NOT_FOUND: &str = "Review not found";

/// Post a review. The helpful count starts at zero.
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    ApiJson(new_review): ApiJson<NewReview>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state.documents.insert_review(&new_review).await?;

    tracing::info!(
        review_id = %review.id,
        product_id = %review.product_id,
        rating = review.rating,
        "Review created"
    );

    Ok((StatusCode::CREATED, Json(review)))
}

/// List every review of a product.
pub async fn product_reviews(
    State(state): State<Arc<AppState>>,
    ApiPath(product_id): ApiPath<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = state.documents.reviews_for_product(&product_id).await?;
    Ok(Json(reviews))
}

/// Get one review.
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Review>, ApiError> {
    let oid = parse_object_id(&id, "review")?;
    state
        .documents
        .find_review(&oid)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(REVIEW_NOT_FOUND.into()))
}

/// Overwrite a review's rating and comment.
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<ReviewUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "review")?;
    let matched = state.documents.update_review(&oid, &update).await?;
    ensure_found(matched, REVIEW_NOT_FOUND)?;

    tracing::info!(review_id = %id, rating = update.rating, "Review updated");

    Ok(message("Review updated successfully"))
}

/// Delete a review.
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "review")?;
    let deleted = state.documents.delete_review(&oid).await?;
    ensure_found(deleted, REVIEW_NOT_FOUND)?;

    tracing::info!(review_id = %id, "Review deleted");

    Ok(message("Review deleted successfully"))
}

/// Add one to a review's helpful count.
pub async fn mark_helpful(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let oid = parse_object_id(&id, "review")?;
    let matched = state.documents.increment_review_helpful(&oid).await?;
    ensure_found(matched, REVIEW_NOT_FOUND)?;

    tracing::debug!(review_id = %id, "Review marked helpful");

    Ok(message("Review marked as helpful"))
}
