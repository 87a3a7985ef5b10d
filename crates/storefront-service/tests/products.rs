//! Product endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

#[tokio::test]
async fn create_product_assigns_hex_id() {
    let harness = TestHarness::new();

    let id = harness.create_product("Laptop Pro", "electronics").await;

    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let response = harness.server.get(&format!("/api/products/{id}")).await;
    response.assert_status_ok();
    let product: Value = response.json();
    assert_eq!(product["name"], "Laptop Pro");
    assert_eq!(product["tags"], json!(["sale"]));
}

#[tokio::test]
async fn malformed_product_id_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/products/not-an-object-id").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid product ID");
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/api/products/65f000000000000000000000")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Product not found");
}

#[tokio::test]
async fn update_and_delete_product() {
    let harness = TestHarness::new();
    let id = harness.create_product("Phone", "electronics").await;

    let response = harness
        .server
        .put(&format!("/api/products/{id}"))
        .json(&json!({ "name": "Phone 2", "price": 499.0, "category": "electronics" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Product updated successfully");

    let product: Value = harness.server.get(&format!("/api/products/{id}")).await.json();
    assert_eq!(product["name"], "Phone 2");
    assert_eq!(product["price"], 499.0);

    let response = harness.server.delete(&format!("/api/products/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Product deleted successfully");

    let response = harness.server.delete(&format!("/api/products/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let harness = TestHarness::new();
    harness.create_product("Gaming LAPTOP", "electronics").await;
    harness.create_product("Running Shoes", "apparel").await;

    let response = harness
        .server
        .get("/api/products/search")
        .add_query_param("q", "laptop")
        .await;

    response.assert_status_ok();
    let hits: Vec<Value> = response.json();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Gaming LAPTOP");
}

#[tokio::test]
async fn search_treats_query_literally() {
    let harness = TestHarness::new();
    harness.create_product("Widget", "tools").await;

    let response = harness
        .server
        .get("/api/products/search")
        .add_query_param("q", ".*")
        .await;

    response.assert_status_ok();
    let hits: Vec<Value> = response.json();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/products/search").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn products_by_category() {
    let harness = TestHarness::new();
    harness.create_product("Tablet", "electronics").await;
    harness.create_product("Novel", "books").await;
    harness.create_product("Camera", "electronics").await;

    let response = harness.server.get("/api/products/category/electronics").await;

    response.assert_status_ok();
    let products: Vec<Value> = response.json();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["category"] == "electronics"));
}
