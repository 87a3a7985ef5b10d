//! Analytics endpoint integration tests.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestHarness;
use serde_json::{json, Value};
use storefront_core::NewSale;
use storefront_store::AnalyticsStore;

async fn record(harness: &TestHarness, body: Value) -> Value {
    let response = harness.server.post("/api/analytics/sales").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn record_sale_defaults_to_today() {
    let harness = TestHarness::new();

    let sale = record(
        &harness,
        json!({ "product_id": "prod1", "quantity_sold": 2, "revenue": 40.0 }),
    )
    .await;

    let today = Utc::now().date_naive().to_string();
    assert_eq!(sale["sale_date"], today);
    assert_eq!(sale["quantity_sold"], 2);
}

#[tokio::test]
async fn sales_filters_by_inclusive_range() {
    let harness = TestHarness::new();
    for date in ["2024-01-01", "2024-01-15", "2024-02-01"] {
        record(
            &harness,
            json!({
                "product_id": "prod1",
                "quantity_sold": 1,
                "revenue": 10.0,
                "sale_date": date
            }),
        )
        .await;
    }

    let response = harness
        .server
        .get("/api/analytics/sales")
        .add_query_param("start_date", "2024-01-01")
        .add_query_param("end_date", "2024-01-15")
        .await;

    response.assert_status_ok();
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn sales_default_range_excludes_old_rows() {
    let harness = TestHarness::new();
    let old = (Utc::now().date_naive() - Duration::days(90)).to_string();
    record(
        &harness,
        json!({ "product_id": "old", "quantity_sold": 1, "revenue": 1.0, "sale_date": old }),
    )
    .await;
    record(
        &harness,
        json!({ "product_id": "new", "quantity_sold": 1, "revenue": 1.0 }),
    )
    .await;

    let rows: Vec<Value> = harness.server.get("/api/analytics/sales").await.json();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product_id"], "new");
}

#[tokio::test]
async fn malformed_date_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/api/analytics/sales")
        .add_query_param("start_date", "01/02/2024")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn popular_products_rank_by_quantity() {
    let harness = TestHarness::new();
    for (product, quantity) in [("slow", 1), ("fast", 5), ("fast", 4), ("medium", 3)] {
        record(
            &harness,
            json!({ "product_id": product, "quantity_sold": quantity, "revenue": 10.0 }),
        )
        .await;
    }

    let response = harness.server.get("/api/analytics/popular-products").await;

    response.assert_status_ok();
    let ranked: Vec<Value> = response.json();
    assert_eq!(ranked[0]["product_id"], "fast");
    assert_eq!(ranked[0]["total_sold"], 9);
    assert_eq!(ranked[0]["total_revenue"], 20.0);
    assert_eq!(ranked[1]["product_id"], "medium");
    assert_eq!(ranked[2]["product_id"], "slow");
}

#[tokio::test]
async fn revenue_groups_by_day_newest_first() {
    let harness = TestHarness::new();
    let today = Utc::now().date_naive();
    let yesterday = (today - Duration::days(1)).to_string();
    record(
        &harness,
        json!({ "product_id": "a", "quantity_sold": 1, "revenue": 5.0, "sale_date": yesterday }),
    )
    .await;
    record(&harness, json!({ "product_id": "a", "quantity_sold": 1, "revenue": 7.5 })).await;
    record(&harness, json!({ "product_id": "b", "quantity_sold": 1, "revenue": 2.5 })).await;

    let response = harness.server.get("/api/analytics/revenue").await;

    response.assert_status_ok();
    let days: Vec<Value> = response.json();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], today.to_string());
    assert_eq!(days[0]["daily_revenue"], 10.0);
    assert_eq!(days[0]["products_sold"], 2);
    assert_eq!(days[1]["date"], yesterday);
}

#[tokio::test]
async fn sales_range_is_capped_at_one_thousand() {
    let harness = TestHarness::new();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
    let sale = NewSale {
        product_id: "bulk".into(),
        quantity_sold: 1,
        revenue: 1.0,
        sale_date: None,
    };
    for _ in 0..1001 {
        harness.store.record_sale(&sale, date).await.expect("record sale");
    }

    let response = harness
        .server
        .get("/api/analytics/sales")
        .add_query_param("start_date", "2024-05-01")
        .add_query_param("end_date", "2024-05-01")
        .await;

    response.assert_status_ok();
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1000);
}

#[tokio::test]
async fn record_sale_without_fields_stores_zero_values() {
    let harness = TestHarness::new();

    let sale = record(&harness, json!({})).await;

    assert_eq!(sale["product_id"], "");
    assert_eq!(sale["quantity_sold"], 0);
}
