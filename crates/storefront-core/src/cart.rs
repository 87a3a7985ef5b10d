//! Shopping cart records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product in a user's cart.
///
/// Logically unique per `(user_id, product_id)`, but only when the store has a
/// uniqueness constraint backing it; otherwise duplicates may exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Serial identifier.
    pub id: i32,
    /// Owning user.
    pub user_id: i32,
    /// Product identifier.
    pub product_id: String,
    /// Quantity in the cart.
    pub quantity: i32,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/cart/{user_id}/items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddCartItem {
    /// Product identifier.
    pub product_id: String,
    /// Quantity to add.
    pub quantity: i32,
}
