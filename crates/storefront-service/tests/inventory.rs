//! Inventory endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

async fn put_inventory(harness: &TestHarness, product_id: &str, quantity: i32) {
    let response = harness
        .server
        .put(&format!("/api/inventory/{product_id}"))
        .json(&json!({ "quantity": quantity, "warehouse_location": "WH-1" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Inventory updated successfully");
}

#[tokio::test]
async fn update_on_missing_product_creates_one_row() {
    let harness = TestHarness::new();

    put_inventory(&harness, "prodA", 25).await;

    let response = harness.server.get("/api/inventory/prodA").await;
    response.assert_status_ok();
    let row: Value = response.json();
    assert_eq!(row["quantity"], 25);
    assert_eq!(row["warehouse_location"], "WH-1");
    assert_eq!(row["low_stock_threshold"], 10);

    let all: Vec<Value> = harness.server.get("/api/inventory").await.json();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn update_on_existing_product_overwrites() {
    let harness = TestHarness::new();
    put_inventory(&harness, "prodA", 25).await;

    put_inventory(&harness, "prodA", 3).await;

    let all: Vec<Value> = harness.server.get("/api/inventory").await.json();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["quantity"], 3);
}

#[tokio::test]
async fn restock_without_row_is_not_found_and_creates_nothing() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/inventory/prodX/restock")
        .json(&json!({ "quantity": 5 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Inventory not found");

    let response = harness.server.get("/api/inventory/prodX").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restock_adds_to_quantity() {
    let harness = TestHarness::new();
    put_inventory(&harness, "prodA", 4).await;

    let response = harness
        .server
        .post("/api/inventory/prodA/restock")
        .json(&json!({ "quantity": 6 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Inventory restocked successfully");

    let row: Value = harness.server.get("/api/inventory/prodA").await.json();
    assert_eq!(row["quantity"], 10);
}

#[tokio::test]
async fn low_stock_returns_rows_at_or_below_threshold() {
    let harness = TestHarness::new();
    put_inventory(&harness, "under", 2).await;
    put_inventory(&harness, "exact", 10).await;
    put_inventory(&harness, "plenty", 11).await;

    let response = harness.server.get("/api/inventory/low-stock").await;

    response.assert_status_ok();
    let rows: Vec<Value> = response.json();
    let mut ids: Vec<&str> = rows
        .iter()
        .filter_map(|r| r["product_id"].as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["exact", "under"]);
}

#[tokio::test]
async fn restock_with_wrong_quantity_type_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/inventory/prodA/restock")
        .json(&json!({ "quantity": "five" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
