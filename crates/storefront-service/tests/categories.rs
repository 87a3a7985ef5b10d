//! Category endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

async fn create_category(harness: &TestHarness, body: Value) -> Value {
    let response = harness.server.post("/api/categories").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn create_and_list_categories() {
    let harness = TestHarness::new();
    let parent = create_category(&harness, json!({ "name": "Electronics" })).await;
    let parent_id = parent["id"].as_str().expect("category id");

    let child = create_category(
        &harness,
        json!({ "name": "Laptops", "parent_id": parent_id }),
    )
    .await;
    assert_eq!(child["parent_id"], parent_id);

    let all: Vec<Value> = harness.server.get("/api/categories").await.json();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn parent_id_is_not_validated() {
    let harness = TestHarness::new();

    let orphan = create_category(
        &harness,
        json!({ "name": "Orphan", "parent_id": "does-not-exist" }),
    )
    .await;

    assert_eq!(orphan["parent_id"], "does-not-exist");
}

#[tokio::test]
async fn update_category_overwrites_fields() {
    let harness = TestHarness::new();
    let category = create_category(&harness, json!({ "name": "Books" })).await;
    let id = category["id"].as_str().expect("category id");

    let response = harness
        .server
        .put(&format!("/api/categories/{id}"))
        .json(&json!({ "name": "Books & Media", "description": "Reading" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Category updated successfully");

    let fetched: Value = harness
        .server
        .get(&format!("/api/categories/{id}"))
        .await
        .json();
    assert_eq!(fetched["name"], "Books & Media");
    assert_eq!(fetched["description"], "Reading");
}

#[tokio::test]
async fn delete_category_then_get_is_not_found() {
    let harness = TestHarness::new();
    let category = create_category(&harness, json!({ "name": "Toys" })).await;
    let id = category["id"].as_str().expect("category id");

    let response = harness.server.delete(&format!("/api/categories/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Category deleted successfully");

    let response = harness.server.get(&format!("/api/categories/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Category not found");
}

#[tokio::test]
async fn malformed_category_id_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness.server.delete("/api/categories/xyz").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid category ID");
}
