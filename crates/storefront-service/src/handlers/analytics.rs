//! Sales analytics handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Months, NaiveDate, Utc};
use serde::Deserialize;

use storefront_core::{DailyRevenue, NewSale, PopularProduct, SalesAnalytics};
use storefront_store::schema::limits;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

/// Query parameters for the sales listing. Dates are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    /// Inclusive lower bound (default: one month before today).
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound (default: today).
    pub end_date: Option<NaiveDate>,
}

impl SalesQuery {
    /// Resolve omitted bounds relative to `today`.
    #[must_use]
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.start_date.unwrap_or_else(|| {
            today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN)
        });
        let end = self.end_date.unwrap_or(today);
        (start, end)
    }
}

/// List sales within a date range.
pub async fn sales(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SalesQuery>,
) -> Result<Json<Vec<SalesAnalytics>>, ApiError> {
    let (start, end) = query.range(Utc::now().date_naive());
    let rows = state
        .analytics
        .sales_between(start, end, limits::SALES_RANGE)
        .await?;
    Ok(Json(rows))
}

/// Append a sales record, dated today unless the body says otherwise.
pub async fn record_sale(
    State(state): State<Arc<AppState>>,
    ApiJson(sale): ApiJson<NewSale>,
) -> Result<(StatusCode, Json<SalesAnalytics>), ApiError> {
    let sale_date = sale.sale_date.unwrap_or_else(|| Utc::now().date_naive());
    let recorded = state.analytics.record_sale(&sale, sale_date).await?;

    tracing::info!(
        sale_id = recorded.id,
        product_id = %recorded.product_id,
        sale_date = %recorded.sale_date,
        "Sale recorded"
    );

    Ok((StatusCode::CREATED, Json(recorded)))
}

/// Best-selling products by quantity.
pub async fn popular_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PopularProduct>>, ApiError> {
    let ranked = state
        .analytics
        .popular_products(limits::POPULAR_PRODUCTS)
        .await?;
    Ok(Json(ranked))
}

/// Daily revenue over the trailing window, newest first.
pub async fn revenue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DailyRevenue>>, ApiError> {
    let days = state
        .analytics
        .revenue_by_day(limits::REVENUE_WINDOW_DAYS)
        .await?;
    Ok(Json(days))
}
