//! Sales analytics records and the aggregates computed from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One append-only sales record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalytics {
    /// Serial identifier.
    pub id: i32,
    /// Product identifier.
    pub product_id: String,
    /// Units sold.
    pub quantity_sold: i32,
    /// Revenue for the sale.
    pub revenue: f64,
    /// Calendar date of the sale.
    pub sale_date: NaiveDate,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/analytics/sales`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSale {
    /// Product identifier.
    pub product_id: String,
    /// Units sold.
    pub quantity_sold: i32,
    /// Revenue for the sale.
    pub revenue: f64,
    /// Sale date; today when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<NaiveDate>,
}

/// Per-product sales totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularProduct {
    /// Product identifier.
    pub product_id: String,
    /// Sum of units sold.
    pub total_sold: i64,
    /// Sum of revenue.
    pub total_revenue: f64,
}

/// Per-day revenue totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// Calendar date.
    pub date: NaiveDate,
    /// Sum of revenue on that date.
    pub daily_revenue: f64,
    /// Number of distinct products sold on that date.
    pub products_sold: i64,
}
