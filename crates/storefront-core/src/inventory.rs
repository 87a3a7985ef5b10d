//! Inventory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Threshold applied to rows created without an explicit one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Stock level of one product in the operational store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Serial identifier.
    pub id: i32,
    /// Product identifier (unique per row).
    pub product_id: String,
    /// Units on hand. Expected non-negative, not enforced.
    pub quantity: i32,
    /// Warehouse location label.
    pub warehouse_location: String,
    /// When stock was last added.
    pub last_restocked: DateTime<Utc>,
    /// Quantity at or below which the product counts as low stock.
    pub low_stock_threshold: i32,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    /// Whether this row is at or below its low-stock threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

/// Request body for `PUT /api/inventory/{product_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryUpdate {
    /// New quantity (overwrites).
    pub quantity: i32,
    /// New warehouse location (overwrites).
    pub warehouse_location: String,
}

/// Request body for `POST /api/inventory/{product_id}/restock`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockRequest {
    /// Units to add to the current quantity.
    pub quantity: i32,
}
