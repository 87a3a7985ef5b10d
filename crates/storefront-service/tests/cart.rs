//! Cart endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

async fn add(harness: &TestHarness, user_id: i64, product_id: &str, quantity: i32) -> Value {
    let response = harness
        .server
        .post(&format!("/api/cart/{user_id}/items"))
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn cart(harness: &TestHarness, user_id: i64) -> Vec<Value> {
    let response = harness.server.get(&format!("/api/cart/{user_id}")).await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn repeated_add_without_unique_constraint_duplicates_rows() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("shopper@example.com").await;

    add(&harness, user_id, "prod1", 1).await;
    add(&harness, user_id, "prod1", 2).await;

    let lines = cart(&harness, user_id).await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["quantity"], 1);
    assert_eq!(lines[1]["quantity"], 2);
}

#[tokio::test]
async fn repeated_add_with_unique_constraint_sums_quantity() {
    let harness = TestHarness::with_unique_cart();
    let user_id = harness.create_user("shopper@example.com").await;

    let first = add(&harness, user_id, "prod1", 1).await;
    let second = add(&harness, user_id, "prod1", 2).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["quantity"], 3);
    let lines = cart(&harness, user_id).await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 3);
}

#[tokio::test]
async fn add_for_unknown_user_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/cart/9/items")
        .json(&json!({ "product_id": "prod1", "quantity": 1 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn add_with_wrong_quantity_type_is_bad_request() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("shopper@example.com").await;

    let response = harness
        .server
        .post(&format!("/api/cart/{user_id}/items"))
        .json(&json!({ "product_id": "prod1", "quantity": "two" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_without_quantity_stores_zero() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("shopper@example.com").await;

    let response = harness
        .server
        .post(&format!("/api/cart/{user_id}/items"))
        .json(&json!({ "product_id": "prod1" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let line: Value = response.json();
    assert_eq!(line["quantity"], 0);
}

#[tokio::test]
async fn remove_item_is_scoped_to_user() {
    let harness = TestHarness::new();
    let owner = harness.create_user("owner@example.com").await;
    let other = harness.create_user("other@example.com").await;
    let line = add(&harness, owner, "prod1", 1).await;
    let item_id = line["id"].as_i64().expect("cart item id");

    let response = harness
        .server
        .delete(&format!("/api/cart/{other}/items/{item_id}"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Cart item not found");

    let response = harness
        .server
        .delete(&format!("/api/cart/{owner}/items/{item_id}"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Item removed from cart");
    assert!(cart(&harness, owner).await.is_empty());
}

#[tokio::test]
async fn clear_always_succeeds() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("shopper@example.com").await;
    add(&harness, user_id, "prod1", 1).await;
    add(&harness, user_id, "prod2", 1).await;

    for _ in 0..2 {
        let response = harness
            .server
            .delete(&format!("/api/cart/{user_id}/clear"))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Cart cleared successfully");
    }

    assert!(cart(&harness, user_id).await.is_empty());
}

#[tokio::test]
async fn user_with_cart_cannot_be_deleted() {
    let harness = TestHarness::new();
    let user_id = harness.create_user("shopper@example.com").await;
    add(&harness, user_id, "prod1", 1).await;

    let response = harness.server.delete(&format!("/api/users/{user_id}")).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
