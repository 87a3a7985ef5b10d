//! Product review documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's review of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Store-generated identifier (hex).
    pub id: String,
    /// Reviewed product.
    pub product_id: String,
    /// Reviewing user.
    pub user_id: i32,
    /// Rating given.
    pub rating: i32,
    /// Review text.
    pub comment: String,
    /// How many times the review was marked helpful. Starts at 0.
    pub helpful: i32,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/reviews`.
///
/// Any `helpful` count supplied by the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewReview {
    /// Reviewed product.
    pub product_id: String,
    /// Reviewing user.
    pub user_id: i32,
    /// Rating given.
    pub rating: i32,
    /// Review text.
    pub comment: String,
}

/// Request body for `PUT /api/reviews/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewUpdate {
    /// New rating.
    pub rating: i32,
    /// New review text.
    pub comment: String,
}
