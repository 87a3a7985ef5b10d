//! Live store integration tests.
//!
//! These tests start the gateway in-process against real PostgreSQL, MySQL
//! and MongoDB servers, configured from the same environment variables as the
//! binary (`POSTGRES_HOST`, `MYSQL_HOST`, `MONGO_HOST`, ...).
//!
//! Run with: cargo test --test live_stores -- --nocapture --ignored

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use storefront_service::{create_router, AppState, ServiceConfig};
use storefront_store::Connectors;

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_gateway() -> (String, Connectors) {
    let config = ServiceConfig::from_env();
    let connectors = Connectors::connect(&config.stores)
        .await
        .expect("Failed to connect to stores");

    let app = create_router(AppState::from_connectors(&connectors, config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    (format!("http://{addr}"), connectors)
}

fn unique_email() -> String {
    format!("live-{}@example.com", Uuid::new_v4())
}

// ============================================================================
// Transactional
// ============================================================================

#[tokio::test]
#[ignore = "requires running PostgreSQL, MySQL and MongoDB"]
async fn live_order_round_trip() {
    let (base_url, connectors) = spawn_gateway().await;
    let client = Client::new();

    let response = client
        .post(format!("{base_url}/api/users"))
        .json(&json!({ "name": "Live", "email": unique_email(), "password": "pw" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let user: Value = response.json().await.unwrap();
    assert!(user.get("password").is_none());
    let user_id = user["id"].as_i64().unwrap();

    let response = client
        .post(format!("{base_url}/api/orders"))
        .json(&json!({
            "user_id": user_id,
            "total_amount": 59.98,
            "status": "pending",
            "payment_method": "credit_card",
            "shipping_address": "1 Main St",
            "items": [{ "product_id": "prod1", "quantity": 2, "price": 29.99 }]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let order: Value = response.json().await.unwrap();
    let order_id = order["id"].as_i64().unwrap();

    let fetched: Value = client
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    println!("Order: {fetched}");
    assert_eq!(fetched["items"][0]["product_id"], "prod1");
    assert_eq!(fetched["items"][0]["quantity"], 2);

    connectors.close().await;
}

#[tokio::test]
#[ignore = "requires running PostgreSQL, MySQL and MongoDB"]
async fn live_cart_fallback_inserts() {
    let (base_url, connectors) = spawn_gateway().await;
    let client = Client::new();

    let user: Value = client
        .post(format!("{base_url}/api/users"))
        .json(&json!({ "name": "Cart", "email": unique_email() }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_id = user["id"].as_i64().unwrap();

    for _ in 0..2 {
        let response = client
            .post(format!("{base_url}/api/cart/{user_id}/items"))
            .json(&json!({ "product_id": "prod1", "quantity": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let lines: Vec<Value> = client
        .get(format!("{base_url}/api/cart/{user_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    println!("Cart lines: {}", lines.len());
    assert!(!lines.is_empty());

    client
        .delete(format!("{base_url}/api/cart/{user_id}/clear"))
        .send()
        .await
        .unwrap();
    connectors.close().await;
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
#[ignore = "requires running PostgreSQL, MySQL and MongoDB"]
async fn live_inventory_restock() {
    let (base_url, connectors) = spawn_gateway().await;
    let client = Client::new();
    let product_id = format!("live-{}", Uuid::new_v4().simple());

    let response = client
        .post(format!("{base_url}/api/inventory/{product_id}/restock"))
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .put(format!("{base_url}/api/inventory/{product_id}"))
        .json(&json!({ "quantity": 1, "warehouse_location": "WH-LIVE" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .post(format!("{base_url}/api/inventory/{product_id}/restock"))
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let row: Value = client
        .get(format!("{base_url}/api/inventory/{product_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(row["quantity"], 6);

    let response = client
        .get(format!("{base_url}/api/analytics/revenue"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    connectors.close().await;
}

// ============================================================================
// Documents
// ============================================================================

#[tokio::test]
#[ignore = "requires running PostgreSQL, MySQL and MongoDB"]
async fn live_review_helpful_counter() {
    let (base_url, connectors) = spawn_gateway().await;
    let client = Client::new();

    let review: Value = client
        .post(format!("{base_url}/api/reviews"))
        .json(&json!({ "product_id": "prod1", "user_id": 1, "rating": 5, "comment": "live" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = review["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let response = client
            .post(format!("{base_url}/api/reviews/{id}/helpful"))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let fetched: Value = client
        .get(format!("{base_url}/api/reviews/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["helpful"], 2);

    client
        .delete(format!("{base_url}/api/reviews/{id}"))
        .send()
        .await
        .unwrap();
    connectors.close().await;
}
