//! Common test utilities for storefront integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use storefront_service::{create_router, AppState, ServiceConfig};
use storefront_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind all three store roles.
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    /// Create a new test harness with an empty store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Harness whose cart table enforces one row per `(user_id, product_id)`.
    pub fn with_unique_cart() -> Self {
        Self::with_store(MemoryStore::with_unique_cart())
    }

    fn with_store(store: MemoryStore) -> Self {
        let store = Arc::new(store);

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(store.clone(), store.clone(), store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Register a user and return its id.
    pub async fn create_user(&self, email: &str) -> i64 {
        let response = self
            .server
            .post("/api/users")
            .json(&json!({
                "name": "Test User",
                "email": email,
                "password": "secret",
                "address": "1 Main St",
                "phone": "555-0100"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        body["id"].as_i64().expect("user id")
    }

    /// Create a product and return its hex id.
    pub async fn create_product(&self, name: &str, category: &str) -> String {
        let response = self
            .server
            .post("/api/products")
            .json(&json!({
                "name": name,
                "description": format!("{name} description"),
                "price": 19.99,
                "category": category,
                "brand": "Acme",
                "tags": ["sale"]
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        body["id"].as_str().expect("product id").to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
