//! Wishlist documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product saved to a user's wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    /// Store-generated identifier (hex).
    pub id: String,
    /// Owning user.
    pub user_id: i32,
    /// Saved product.
    pub product_id: String,
    /// When the product was saved.
    pub added_at: DateTime<Utc>,
}

/// Request body for `POST /api/wishlist/{user_id}/items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddWishlistItem {
    /// Product to save.
    pub product_id: String,
}
