//! User endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn create_user_returns_created_without_password() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/users")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter2",
            "address": "1 Main St",
            "phone": "555-0100"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password").is_none());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn create_user_with_wrong_field_type_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/users")
        .json(&json!({ "name": 42 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness.server.post("/api/users").text("name=ada").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_is_internal_error_with_store_text() {
    let harness = TestHarness::new();
    harness.create_user("dup@example.com").await;

    let response = harness
        .server
        .post("/api/users")
        .json(&json!({ "name": "Again", "email": "dup@example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("users_email_key"));
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn list_users_never_exposes_passwords() {
    let harness = TestHarness::new();
    harness.create_user("a@example.com").await;
    harness.create_user("b@example.com").await;

    let response = harness.server.get("/api/users").await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/users/99").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "User not found");
}

#[tokio::test]
async fn non_numeric_user_id_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/users/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_outage_is_internal_error() {
    let harness = TestHarness::new();
    harness.store.set_offline(true);

    let response = harness.server.get("/api/users").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("connection refused"));
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
async fn update_user_overwrites_fields() {
    let harness = TestHarness::new();
    let id = harness.create_user("old@example.com").await;

    let response = harness
        .server
        .put(&format!("/api/users/{id}"))
        .json(&json!({
            "name": "Renamed",
            "email": "new@example.com",
            "address": "2 Side St",
            "phone": "555-0199"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User updated successfully");

    let user: Value = harness.server.get(&format!("/api/users/{id}")).await.json();
    assert_eq!(user["name"], "Renamed");
    assert_eq!(user["email"], "new@example.com");
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .put("/api/users/5")
        .json(&json!({ "name": "Nobody" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_then_get_is_not_found() {
    let harness = TestHarness::new();
    let id = harness.create_user("gone@example.com").await;

    let response = harness.server.delete(&format!("/api/users/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User deleted successfully");

    let response = harness.server.get(&format!("/api/users/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = harness.server.delete(&format!("/api/users/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_orders_lists_only_that_users_orders() {
    let harness = TestHarness::new();
    let alice = harness.create_user("alice@example.com").await;
    let bob = harness.create_user("bob@example.com").await;

    for user_id in [alice, alice, bob] {
        harness
            .server
            .post("/api/orders")
            .json(&json!({ "user_id": user_id, "total_amount": 10.0 }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = harness.server.get(&format!("/api/users/{alice}/orders")).await;

    response.assert_status_ok();
    let orders: Vec<Value> = response.json();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["user_id"] == alice));
}

#[tokio::test]
async fn list_users_is_capped_at_one_hundred() {
    let harness = TestHarness::new();
    for n in 0..101 {
        harness.create_user(&format!("user{n}@example.com")).await;
    }

    let response = harness.server.get("/api/users").await;

    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 100);
}
