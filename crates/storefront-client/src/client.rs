//! Storefront HTTP client implementation.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use storefront_core::{
    AddCartItem, CartItem, Category, CategoryInput, DailyRevenue, Inventory, InventoryUpdate,
    NewOrder, NewReview, NewUser, Order, PopularProduct, Product, ProductInput, RestockRequest,
    Review, SalesAnalytics, UpdateOrderStatus, User,
};

use crate::error::ClientError;
use crate::types::{Acknowledgment, HealthStatus};

/// Storefront gateway client.
///
/// Error responses are plain text; they surface as [`ClientError::Api`]
/// carrying the status and body.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

impl StorefrontClient {
    /// Create a client for the gateway at `base_url` (e.g. `"http://localhost:8080"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check gateway liveness.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get("/health").await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        self.send_json(Method::POST, "/api/users", Some(user)).await
    }

    /// List users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get("/api/users").await
    }

    /// Get one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_user(&self, id: i32) -> Result<User, ClientError> {
        self.get(&format!("/api/users/{id}")).await
    }

    /// List a user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn user_orders(&self, id: i32) -> Result<Vec<Order>, ClientError> {
        self.get(&format!("/api/users/{id}/orders")).await
    }

    // ========================================================================
    // Products & Categories
    // ========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_product(&self, product: &ProductInput) -> Result<Product, ClientError> {
        self.send_json(Method::POST, "/api/products", Some(product))
            .await
    }

    /// List products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get("/api/products").await
    }

    /// Get one product by hex id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        self.get(&format!("/api/products/{id}")).await
    }

    /// Search products by name, description or tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let response = self
            .client
            .get(self.url("/api/products/search"))
            .query(&[("q", query)])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_category(&self, category: &CategoryInput) -> Result<Category, ClientError> {
        self.send_json(Method::POST, "/api/categories", Some(category))
            .await
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get("/api/categories").await
    }

    // ========================================================================
    // Orders & Cart
    // ========================================================================

    /// Place an order with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        self.send_json(Method::POST, "/api/orders", Some(order)).await
    }

    /// List orders (without items).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get("/api/orders").await
    }

    /// Get one order with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_order(&self, id: i32) -> Result<Order, ClientError> {
        self.get(&format!("/api/orders/{id}")).await
    }

    /// Set an order's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update_order_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<Acknowledgment, ClientError> {
        let body = UpdateOrderStatus {
            status: status.to_string(),
        };
        self.send_json(
            Method::PATCH,
            &format!("/api/orders/{id}/status"),
            Some(&body),
        )
        .await
    }

    /// Add a product to a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn add_to_cart(
        &self,
        user_id: i32,
        item: &AddCartItem,
    ) -> Result<CartItem, ClientError> {
        self.send_json(
            Method::POST,
            &format!("/api/cart/{user_id}/items"),
            Some(item),
        )
        .await
    }

    // ========================================================================
    // Inventory & Analytics
    // ========================================================================

    /// List inventory rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_inventory(&self) -> Result<Vec<Inventory>, ClientError> {
        self.get("/api/inventory").await
    }

    /// Set quantity and location for a product, creating the row if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn update_inventory(
        &self,
        product_id: &str,
        update: &InventoryUpdate,
    ) -> Result<Acknowledgment, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/api/inventory/{product_id}"),
            Some(update),
        )
        .await
    }

    /// Add stock to an existing inventory row.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn restock(
        &self,
        product_id: &str,
        quantity: i32,
    ) -> Result<Acknowledgment, ClientError> {
        self.send_json(
            Method::POST,
            &format!("/api/inventory/{product_id}/restock"),
            Some(&RestockRequest { quantity }),
        )
        .await
    }

    /// List sales within an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn sales(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SalesAnalytics>, ClientError> {
        let response = self
            .client
            .get(self.url("/api/analytics/sales"))
            .query(&[
                ("start_date", start_date.to_string()),
                ("end_date", end_date.to_string()),
            ])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Best-selling products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn popular_products(&self) -> Result<Vec<PopularProduct>, ClientError> {
        self.get("/api/analytics/popular-products").await
    }

    /// Daily revenue over the trailing window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn revenue(&self) -> Result<Vec<DailyRevenue>, ClientError> {
        self.get("/api/analytics/revenue").await
    }

    // ========================================================================
    // Reviews
    // ========================================================================

    /// Post a review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_review(&self, review: &NewReview) -> Result<Review, ClientError> {
        self.send_json(Method::POST, "/api/reviews", Some(review))
            .await
    }

    /// List a product's reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn product_reviews(&self, product_id: &str) -> Result<Vec<Review>, ClientError> {
        self.get(&format!("/api/reviews/product/{product_id}"))
            .await
    }

    /// Mark a review as helpful.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn mark_review_helpful(&self, id: &str) -> Result<Acknowledgment, ClientError> {
        self.send_json::<(), _>(Method::POST, &format!("/api/reviews/{id}/helpful"), None)
            .await
    }

    // ========================================================================
    // Raw requests
    // ========================================================================

    /// Send a request and return only its status, discarding the body.
    ///
    /// `path_and_query` is appended to the base URL as-is.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    pub async fn send_raw(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<StatusCode, ClientError> {
        let mut request = self.client.request(method, self.url(path_and_query));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Ok(response.status())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Decode a success body or turn the plain-text error body into [`ClientError::Api`].
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout(timeout_seconds: u64) -> Self {
        Self { timeout_seconds }
    }
}
