//! API handlers.
//!
//! Handlers return the entity or collection as JSON on success and a
//! `{"message": ...}` acknowledgment for mutations without a body.

use axum::Json;
use serde::Serialize;

use storefront_store::ObjectId;

use crate::error::ApiError;

pub mod analytics;
pub mod cart;
pub mod categories;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;

/// Acknowledgment body for mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Build a `{"message": ...}` response.
pub(crate) fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

/// Parse a 24-character hex document id, naming the entity on failure.
pub(crate) fn parse_object_id(raw: &str, entity: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid {entity} ID")))
}

/// Map a zero affected-row count to `NotFound`.
pub(crate) fn ensure_found(affected: u64, not_found: &str) -> Result<(), ApiError> {
    if affected == 0 {
        Err(ApiError::NotFound(not_found.to_string()))
    } else {
        Ok(())
    }
}
