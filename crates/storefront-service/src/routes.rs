//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    analytics, cart, categories, health, inventory, orders, products, reviews, users, wishlist,
};
use crate::state::AppState;

/// Maximum concurrent requests across `/api` endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Liveness check
///
/// ## Transactional (PostgreSQL)
/// - `/api/users`, `/api/users/:id`, `/api/users/:id/orders`
/// - `/api/orders`, `/api/orders/:id`, `/api/orders/:id/status`, `/api/orders/:id/cancel`
/// - `/api/cart/:user_id`, `/api/cart/:user_id/items[/:item_id]`, `/api/cart/:user_id/clear`
///
/// ## Analytics (MySQL)
/// - `/api/inventory`, `/api/inventory/low-stock`, `/api/inventory/:product_id[/restock]`
/// - `/api/analytics/sales`, `/api/analytics/popular-products`, `/api/analytics/revenue`
///
/// ## Documents (MongoDB)
/// - `/api/products`, `/api/products/search`, `/api/products/category/:category`, `/api/products/:id`
/// - `/api/categories`, `/api/categories/:id`
/// - `/api/reviews`, `/api/reviews/product/:product_id`, `/api/reviews/:id[/helpful]`
/// - `/api/wishlist/:user_id`, `/api/wishlist/:user_id/items[/:product_id]`
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/orders", get(users::list_user_orders))
        // Products
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route("/products/search", get(products::search_products))
        .route(
            "/products/category/:category",
            get(products::products_by_category),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Orders
        .route(
            "/orders",
            post(orders::create_order).get(orders::list_orders),
        )
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/status", patch(orders::update_order_status))
        .route("/orders/:id/cancel", post(orders::cancel_order))
        // Inventory
        .route("/inventory", get(inventory::list_inventory))
        .route("/inventory/low-stock", get(inventory::low_stock))
        .route(
            "/inventory/:product_id",
            get(inventory::get_inventory).put(inventory::update_inventory),
        )
        .route(
            "/inventory/:product_id/restock",
            post(inventory::restock_inventory),
        )
        // Reviews
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/product/:product_id",
            get(reviews::product_reviews),
        )
        .route(
            "/reviews/:id",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/:id/helpful", post(reviews::mark_helpful))
        // Categories
        .route(
            "/categories",
            post(categories::create_category).get(categories::list_categories),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Cart
        .route("/cart/:user_id", get(cart::get_cart))
        .route("/cart/:user_id/items", post(cart::add_to_cart))
        .route(
            "/cart/:user_id/items/:item_id",
            delete(cart::remove_from_cart),
        )
        .route("/cart/:user_id/clear", delete(cart::clear_cart))
        // Analytics
        .route(
            "/analytics/sales",
            get(analytics::sales).post(analytics::record_sale),
        )
        .route(
            "/analytics/popular-products",
            get(analytics::popular_products),
        )
        .route("/analytics/revenue", get(analytics::revenue))
        // Wishlist
        .route("/wishlist/:user_id", get(wishlist::get_wishlist))
        .route("/wishlist/:user_id/items", post(wishlist::add_to_wishlist))
        .route(
            "/wishlist/:user_id/items/:product_id",
            delete(wishlist::remove_from_wishlist),
        )
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(origins)
    }
}
