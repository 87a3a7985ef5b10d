//! Storage layer for the storefront gateway.
//!
//! Three backing stores sit behind three traits:
//!
//! - [`TransactionalStore`]: users, orders, order items and cart lines in
//!   PostgreSQL ([`PgStore`])
//! - [`AnalyticsStore`]: inventory and sales analytics in MySQL
//!   ([`MySqlStore`])
//! - [`DocumentStore`]: products, categories, reviews and wishlists in
//!   MongoDB ([`MongoStore`])
//!
//! The traits expose primitive reads and writes. Mutations report the
//! number of affected rows or documents so callers decide what "not found"
//! means. Row caps are passed in by the caller; the defaults live in
//! [`schema::limits`].
//!
//! List reads skip individual records that fail to decode and log them at
//! `warn`; a failing query or cursor still surfaces as an error.
//!
//! # Example
//!
//! ```no_run
//! use storefront_store::{Connectors, StoreConfig, TransactionalStore};
//!
//! # async fn demo() -> storefront_store::Result<()> {
//! let connectors = Connectors::connect(&StoreConfig::default()).await?;
//! let users = connectors.postgres.list_users(100).await?;
//! connectors.close().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod connectors;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod mongo;
pub mod mysql;
pub mod postgres;
pub mod schema;

mod documents;

pub use bson::oid::ObjectId;
pub use config::{MongoConfig, MySqlConfig, PoolConfig, PostgresConfig, StoreConfig};
pub use connectors::Connectors;
pub use error::{Result, StoreError};
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use mysql::MySqlStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use storefront_core::{
    AddCartItem, CartItem, Category, CategoryInput, DailyRevenue, Inventory, InventoryUpdate,
    NewOrder, NewReview, NewSale, NewUser, Order, OrderItem, PopularProduct, Product,
    ProductInput, Review, ReviewUpdate, SalesAnalytics, User, UserUpdate, Wishlist,
};

/// Relational store for users, orders and carts.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a user and return it with its assigned id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error on constraint violations (duplicate email) or
    /// connectivity failures.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// List up to `limit` users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_users(&self, limit: i64) -> Result<Vec<User>>;

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn get_user(&self, id: i32) -> Result<Option<User>>;

    /// Replace a user's profile fields and bump `updated_at`.
    ///
    /// Returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn update_user(&self, id: i32, update: &UserUpdate) -> Result<u64>;

    /// Delete a user. Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails, including when orders or
    /// cart lines still reference the user.
    async fn delete_user(&self, id: i32) -> Result<u64>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Insert an order header and all of its items in one transaction.
    ///
    /// Either the header and every item are persisted, or nothing is.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement or the commit fails.
    async fn create_order(&self, order: &NewOrder) -> Result<Order>;

    /// List up to `limit` orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_orders(&self, limit: i64) -> Result<Vec<Order>>;

    /// List up to `limit` orders placed by one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_orders_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<Order>>;

    /// Get an order header by id, without items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn get_order(&self, id: i32) -> Result<Option<Order>>;

    /// List the items of an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_order_items(&self, order_id: i32) -> Result<Vec<OrderItem>>;

    /// Set an order's status and bump `updated_at`.
    ///
    /// Returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn update_order_status(&self, id: i32, status: &str) -> Result<u64>;

    // =========================================================================
    // Cart
    // =========================================================================

    /// List up to `limit` cart lines for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_cart(&self, user_id: i32, limit: i64) -> Result<Vec<CartItem>>;

    /// Insert a cart line, merging quantities into an existing line for the
    /// same product.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails, including when the schema
    /// has no unique constraint to merge on.
    async fn upsert_cart_item(&self, user_id: i32, item: &AddCartItem) -> Result<CartItem>;

    /// Insert a cart line unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn insert_cart_item(&self, user_id: i32, item: &AddCartItem) -> Result<CartItem>;

    /// Delete one cart line owned by `user_id`. Returns the number deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn remove_cart_item(&self, user_id: i32, item_id: i32) -> Result<u64>;

    /// Delete every cart line of a user. Returns the number deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn clear_cart(&self, user_id: i32) -> Result<u64>;
}

/// Relational store for inventory and sales analytics.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    // =========================================================================
    // Inventory
    // =========================================================================

    /// List up to `limit` inventory rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_inventory(&self, limit: i64) -> Result<Vec<Inventory>>;

    /// Get the inventory row for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn get_inventory(&self, product_id: &str) -> Result<Option<Inventory>>;

    /// Overwrite quantity and location for a product. Returns rows matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn update_inventory(&self, product_id: &str, update: &InventoryUpdate) -> Result<u64>;

    /// Insert a new inventory row with `last_restocked` set to now.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (duplicate product included).
    async fn insert_inventory(&self, product_id: &str, update: &InventoryUpdate) -> Result<()>;

    /// Add `quantity` to a product's stock and stamp `last_restocked`.
    ///
    /// Returns rows matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    async fn restock_inventory(&self, product_id: &str, quantity: i32) -> Result<u64>;

    /// List every row whose quantity is at or below its threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn low_stock_inventory(&self) -> Result<Vec<Inventory>>;

    // =========================================================================
    // Sales analytics
    // =========================================================================

    /// List up to `limit` sales with `start <= sale_date <= end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn sales_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> Result<Vec<SalesAnalytics>>;

    /// Record a sale on `sale_date` and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the read-back fails.
    async fn record_sale(&self, sale: &NewSale, sale_date: NaiveDate) -> Result<SalesAnalytics>;

    /// Products ranked by total quantity sold, highest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn popular_products(&self, limit: i64) -> Result<Vec<PopularProduct>>;

    /// Per-day revenue over the last `window_days` days, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn revenue_by_day(&self, window_days: i32) -> Result<Vec<DailyRevenue>>;
}

/// Document store for the catalog and user-generated content.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // =========================================================================
    // Products
    // =========================================================================

    /// Insert a product and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn insert_product(&self, product: &ProductInput) -> Result<Product>;

    /// List up to `limit` products.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_products(&self, limit: i64) -> Result<Vec<Product>>;

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_product(&self, id: &ObjectId) -> Result<Option<Product>>;

    /// Overwrite a product's fields. Returns documents matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn update_product(&self, id: &ObjectId, product: &ProductInput) -> Result<u64>;

    /// Delete a product. Returns documents deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    async fn delete_product(&self, id: &ObjectId) -> Result<u64>;

    /// Case-insensitive literal match on name, description or tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>>;

    /// List up to `limit` products in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn products_in_category(&self, category: &str, limit: i64) -> Result<Vec<Product>>;

    // =========================================================================
    // Categories
    // =========================================================================

    /// Insert a category and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn insert_category(&self, category: &CategoryInput) -> Result<Category>;

    /// List up to `limit` categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_categories(&self, limit: i64) -> Result<Vec<Category>>;

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_category(&self, id: &ObjectId) -> Result<Option<Category>>;

    /// Overwrite a category's fields. Returns documents matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn update_category(&self, id: &ObjectId, category: &CategoryInput) -> Result<u64>;

    /// Delete a category. Returns documents deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    async fn delete_category(&self, id: &ObjectId) -> Result<u64>;

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Insert a review with `helpful` set to 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn insert_review(&self, review: &NewReview) -> Result<Review>;

    /// List every review of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn reviews_for_product(&self, product_id: &str) -> Result<Vec<Review>>;

    /// Get a review by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_review(&self, id: &ObjectId) -> Result<Option<Review>>;

    /// Overwrite a review's rating and comment. Returns documents matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn update_review(&self, id: &ObjectId, update: &ReviewUpdate) -> Result<u64>;

    /// Delete a review. Returns documents deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    async fn delete_review(&self, id: &ObjectId) -> Result<u64>;

    /// Atomically add one to a review's `helpful` count. Returns documents matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    async fn increment_review_helpful(&self, id: &ObjectId) -> Result<u64>;

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// List every wishlist entry of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn wishlist_for_user(&self, user_id: i32) -> Result<Vec<Wishlist>>;

    /// Save a product to a user's wishlist with `added_at` set to now.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    async fn insert_wishlist_item(&self, user_id: i32, product_id: &str) -> Result<Wishlist>;

    /// Delete one entry matching `(user_id, product_id)`. Returns documents deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    async fn delete_wishlist_item(&self, user_id: i32, product_id: &str) -> Result<u64>;
}

/// Log a record that could not be decoded and drop it from a listing.
pub(crate) fn skip_undecodable<T, E: std::fmt::Display>(
    source: &'static str,
    decoded: std::result::Result<T, E>,
) -> Option<T> {
    match decoded {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(source = source, error = %err, "Skipping undecodable record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_undecodable_keeps_good_records() {
        let decoded: Vec<i32> = vec![Ok(1), Err("bad"), Ok(3)]
            .into_iter()
            .filter_map(|r| skip_undecodable("test", r))
            .collect();
        assert_eq!(decoded, vec![1, 3]);
    }
}
