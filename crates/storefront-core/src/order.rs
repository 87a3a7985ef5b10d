//! Order and order item records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned when a creation request omits one.
pub const STATUS_PENDING: &str = "pending";

/// Status forced by the cancel operation.
pub const STATUS_CANCELLED: &str = "cancelled";

/// An order placed by a user.
///
/// `items` is only populated on single-order reads and in the creation
/// response; list reads leave it empty and omit it from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Serial identifier.
    pub id: i32,
    /// Owning user.
    pub user_id: i32,
    /// Order total.
    pub total_amount: f64,
    /// Free-form status; transitions are not constrained.
    pub status: String,
    /// Payment method label.
    pub payment_method: String,
    /// Shipping address.
    pub shipping_address: String,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
    /// Line items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
}

/// A line item of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Serial identifier.
    pub id: i32,
    /// Owning order.
    pub order_id: i32,
    /// Product identifier (document-store id or SKU).
    pub product_id: String,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
}

/// Request body for creating an order with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOrder {
    /// Owning user.
    pub user_id: i32,
    /// Order total.
    pub total_amount: f64,
    /// Initial status.
    pub status: String,
    /// Payment method label.
    pub payment_method: String,
    /// Shipping address.
    pub shipping_address: String,
    /// Line items, zero or more.
    pub items: Vec<NewOrderItem>,
}

/// A line item in an order creation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOrderItem {
    /// Product identifier.
    pub product_id: String,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
}

/// Request body for `PATCH /api/orders/{id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOrderStatus {
    /// New status.
    pub status: String,
}

impl Default for NewOrder {
    fn default() -> Self {
        Self {
            user_id: 0,
            total_amount: 0.0,
            status: STATUS_PENDING.to_string(),
            payment_method: String::new(),
            shipping_address: String::new(),
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_defaults_status_and_items() {
        let order: NewOrder =
            serde_json::from_str(r#"{"user_id": 3, "total_amount": 10.5}"#).unwrap();
        assert_eq!(order.status, STATUS_PENDING);
        assert!(order.items.is_empty());
        assert!(order.payment_method.is_empty());
    }

    #[test]
    fn missing_fields_decode_as_zero_values() {
        let order: NewOrder = serde_json::from_str(r#"{"items":[{"product_id":"prod1"}]}"#).unwrap();
        assert_eq!(order.user_id, 0);
        assert!(order.total_amount.abs() < f64::EPSILON);
        assert_eq!(order.items[0].quantity, 0);

        let update: UpdateOrderStatus = serde_json::from_str("{}").unwrap();
        assert!(update.status.is_empty());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<NewOrder>(r#"{"user_id":"one"}"#).is_err());
    }

    #[test]
    fn new_order_decodes_items() {
        let order: NewOrder = serde_json::from_str(
            r#"{"user_id":1,"total_amount":59.98,"status":"pending","payment_method":"credit_card",
                "shipping_address":"1 Main St","items":[{"product_id":"prod1","quantity":2,"price":29.99}]}"#,
        )
        .unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, "prod1");
        assert_eq!(order.items[0].quantity, 2);
    }

    #[test]
    fn order_without_items_omits_items_field() {
        let order = Order {
            id: 1,
            user_id: 1,
            total_amount: 1.0,
            status: STATUS_PENDING.into(),
            payment_method: String::new(),
            shipping_address: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            items: Vec::new(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("items").is_none());
    }
}
