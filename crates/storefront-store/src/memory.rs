//! In-memory implementation of every store trait.
//!
//! Mirrors the constraints of the bootstrapped schemas that callers can
//! observe: unique user emails, foreign keys from orders and cart lines to
//! users, the `VARCHAR(100)` product id on order items, unique inventory
//! product ids, and a cart table with no `(user_id, product_id)` unique
//! constraint unless built with [`MemoryStore::with_unique_cart`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};

use storefront_core::{
    AddCartItem, CartItem, Category, CategoryInput, DailyRevenue, Inventory, InventoryUpdate,
    NewOrder, NewReview, NewSale, NewUser, Order, OrderItem, PopularProduct, Product,
    ProductInput, Review, ReviewUpdate, SalesAnalytics, User, UserUpdate, Wishlist,
    DEFAULT_LOW_STOCK_THRESHOLD,
};

use crate::error::{Result, StoreError};
use crate::{AnalyticsStore, DocumentStore, ObjectId, TransactionalStore};

const PRODUCT_ID_MAX_LEN: usize = 100;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    cart: Vec<CartItem>,
    inventory: Vec<Inventory>,
    sales: Vec<SalesAnalytics>,
    products: Vec<Product>,
    categories: Vec<Category>,
    reviews: Vec<Review>,
    wishlist: Vec<Wishlist>,
    sequences: BTreeMap<&'static str, i32>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i32 {
        let id = self.sequences.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn user_exists(&self, id: i32) -> bool {
        self.users.iter().any(|u| u.id == id)
    }
}

/// Store backed by process memory.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    cart_unique: bool,
    offline: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with the bootstrap schema's cart table (no unique constraint).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            cart_unique: false,
            offline: AtomicBool::new(false),
        }
    }

    /// Empty store whose cart table has a `(user_id, product_id)` unique constraint.
    #[must_use]
    pub fn with_unique_cart() -> Self {
        Self {
            cart_unique: true,
            ..Self::new()
        }
    }

    /// When offline, every operation fails as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored orders, for asserting on transaction rollback.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.tables.lock().map(|t| t.orders.len()).unwrap_or(0)
    }

    /// Number of stored order items, for asserting on transaction rollback.
    #[must_use]
    pub fn order_item_count(&self) -> usize {
        self.tables.lock().map(|t| t.order_items.len()).unwrap_or(0)
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Database("connection refused".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

fn cap(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

fn foreign_key_violation(table: &str) -> StoreError {
    StoreError::Database(format!(
        "insert or update on table \"{table}\" violates foreign key constraint \"{table}_user_id_fkey\""
    ))
}

fn matches_id(hex: &str, id: &ObjectId) -> bool {
    hex == id.to_hex()
}

#[async_trait]
impl TransactionalStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Database(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            ));
        }
        let id = tables.next_id("users");
        let now = Utc::now();
        let created = User::from_new(id, user, now, now);
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn list_users(&self, limit: i64) -> Result<Vec<User>> {
        let tables = self.tables()?;
        Ok(tables.users.iter().take(cap(limit)).cloned().collect())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_user(&self, id: i32, update: &UserUpdate) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(0);
        };
        user.name.clone_from(&update.name);
        user.email.clone_from(&update.email);
        user.address.clone_from(&update.address);
        user.phone.clone_from(&update.phone);
        user.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_user(&self, id: i32) -> Result<u64> {
        let mut tables = self.tables()?;
        if tables.orders.iter().any(|o| o.user_id == id)
            || tables.cart.iter().any(|c| c.user_id == id)
        {
            return Err(StoreError::Database(
                "update or delete on table \"users\" violates foreign key constraint".into(),
            ));
        }
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok((before - tables.users.len()) as u64)
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let mut tables = self.tables()?;
        if !tables.user_exists(order.user_id) {
            return Err(foreign_key_violation("orders"));
        }
        // Validate every item before touching state, so a failure leaves nothing behind.
        if order
            .items
            .iter()
            .any(|item| item.product_id.chars().count() > PRODUCT_ID_MAX_LEN)
        {
            return Err(StoreError::Database(
                "value too long for type character varying(100)".into(),
            ));
        }

        let id = tables.next_id("orders");
        let now = Utc::now();
        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            items.push(OrderItem {
                id: tables.next_id("order_items"),
                order_id: id,
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.price,
            });
        }

        let created = Order {
            id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status.clone(),
            payment_method: order.payment_method.clone(),
            shipping_address: order.shipping_address.clone(),
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        };
        tables.orders.push(created.clone());
        tables.order_items.extend(items.iter().cloned());

        Ok(Order { items, ..created })
    }

    async fn list_orders(&self, limit: i64) -> Result<Vec<Order>> {
        let tables = self.tables()?;
        Ok(tables.orders.iter().take(cap(limit)).cloned().collect())
    }

    async fn list_orders_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<Order>> {
        let tables = self.tables()?;
        Ok(tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .take(cap(limit))
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: i32) -> Result<Option<Order>> {
        let tables = self.tables()?;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_order_items(&self, order_id: i32) -> Result<Vec<OrderItem>> {
        let tables = self.tables()?;
        Ok(tables
            .order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn update_order_status(&self, id: i32, status: &str) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(order) = tables.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(0);
        };
        order.status = status.to_string();
        order.updated_at = Utc::now();
        Ok(1)
    }

    async fn list_cart(&self, user_id: i32, limit: i64) -> Result<Vec<CartItem>> {
        let tables = self.tables()?;
        Ok(tables
            .cart
            .iter()
            .filter(|c| c.user_id == user_id)
            .take(cap(limit))
            .cloned()
            .collect())
    }

    async fn upsert_cart_item(&self, user_id: i32, item: &AddCartItem) -> Result<CartItem> {
        if !self.cart_unique {
            return Err(StoreError::Database(
                "there is no unique or exclusion constraint matching the ON CONFLICT specification"
                    .into(),
            ));
        }
        {
            let mut tables = self.tables()?;
            if let Some(existing) = tables
                .cart
                .iter_mut()
                .find(|c| c.user_id == user_id && c.product_id == item.product_id)
            {
                existing.quantity += item.quantity;
                existing.updated_at = Utc::now();
                return Ok(existing.clone());
            }
        }
        self.insert_cart_item(user_id, item).await
    }

    async fn insert_cart_item(&self, user_id: i32, item: &AddCartItem) -> Result<CartItem> {
        let mut tables = self.tables()?;
        if !tables.user_exists(user_id) {
            return Err(foreign_key_violation("cart"));
        }
        if self.cart_unique
            && tables
                .cart
                .iter()
                .any(|c| c.user_id == user_id && c.product_id == item.product_id)
        {
            return Err(StoreError::Database(
                "duplicate key value violates unique constraint \"cart_user_id_product_id_key\""
                    .into(),
            ));
        }
        let now = Utc::now();
        let created = CartItem {
            id: tables.next_id("cart"),
            user_id,
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            created_at: now,
            updated_at: now,
        };
        tables.cart.push(created.clone());
        Ok(created)
    }

    async fn remove_cart_item(&self, user_id: i32, item_id: i32) -> Result<u64> {
        let mut tables = self.tables()?;
        let before = tables.cart.len();
        tables
            .cart
            .retain(|c| !(c.id == item_id && c.user_id == user_id));
        Ok((before - tables.cart.len()) as u64)
    }

    async fn clear_cart(&self, user_id: i32) -> Result<u64> {
        let mut tables = self.tables()?;
        let before = tables.cart.len();
        tables.cart.retain(|c| c.user_id != user_id);
        Ok((before - tables.cart.len()) as u64)
    }
}

#[async_trait]
impl AnalyticsStore for MemoryStore {
    async fn list_inventory(&self, limit: i64) -> Result<Vec<Inventory>> {
        let tables = self.tables()?;
        Ok(tables.inventory.iter().take(cap(limit)).cloned().collect())
    }

    async fn get_inventory(&self, product_id: &str) -> Result<Option<Inventory>> {
        let tables = self.tables()?;
        Ok(tables
            .inventory
            .iter()
            .find(|i| i.product_id == product_id)
            .cloned())
    }

    async fn update_inventory(&self, product_id: &str, update: &InventoryUpdate) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(row) = tables
            .inventory
            .iter_mut()
            .find(|i| i.product_id == product_id)
        else {
            return Ok(0);
        };
        row.quantity = update.quantity;
        row.warehouse_location.clone_from(&update.warehouse_location);
        row.updated_at = Utc::now();
        Ok(1)
    }

    async fn insert_inventory(&self, product_id: &str, update: &InventoryUpdate) -> Result<()> {
        let mut tables = self.tables()?;
        if tables.inventory.iter().any(|i| i.product_id == product_id) {
            return Err(StoreError::Database(format!(
                "Duplicate entry '{product_id}' for key 'inventory.product_id'"
            )));
        }
        let now = Utc::now();
        let id = tables.next_id("inventory");
        tables.inventory.push(Inventory {
            id,
            product_id: product_id.to_string(),
            quantity: update.quantity,
            warehouse_location: update.warehouse_location.clone(),
            last_restocked: now,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn restock_inventory(&self, product_id: &str, quantity: i32) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(row) = tables
            .inventory
            .iter_mut()
            .find(|i| i.product_id == product_id)
        else {
            return Ok(0);
        };
        let now = Utc::now();
        row.quantity += quantity;
        row.last_restocked = now;
        row.updated_at = now;
        Ok(1)
    }

    async fn low_stock_inventory(&self) -> Result<Vec<Inventory>> {
        let tables = self.tables()?;
        Ok(tables
            .inventory
            .iter()
            .filter(|i| i.is_low_stock())
            .cloned()
            .collect())
    }

    async fn sales_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> Result<Vec<SalesAnalytics>> {
        let tables = self.tables()?;
        let mut sales: Vec<_> = tables
            .sales
            .iter()
            .filter(|s| s.sale_date >= start && s.sale_date <= end)
            .cloned()
            .collect();
        sales.sort_by_key(|s| (s.sale_date, s.id));
        sales.truncate(cap(limit));
        Ok(sales)
    }

    async fn record_sale(&self, sale: &NewSale, sale_date: NaiveDate) -> Result<SalesAnalytics> {
        let mut tables = self.tables()?;
        let recorded = SalesAnalytics {
            id: tables.next_id("sales_analytics"),
            product_id: sale.product_id.clone(),
            quantity_sold: sale.quantity_sold,
            revenue: sale.revenue,
            sale_date,
            created_at: Utc::now(),
        };
        tables.sales.push(recorded.clone());
        Ok(recorded)
    }

    async fn popular_products(&self, limit: i64) -> Result<Vec<PopularProduct>> {
        let tables = self.tables()?;
        let mut totals: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
        for sale in &tables.sales {
            let entry = totals.entry(sale.product_id.as_str()).or_default();
            entry.0 += i64::from(sale.quantity_sold);
            entry.1 += sale.revenue;
        }
        let mut ranked: Vec<_> = totals
            .into_iter()
            .map(|(product_id, (total_sold, total_revenue))| PopularProduct {
                product_id: product_id.to_string(),
                total_sold,
                total_revenue,
            })
            .collect();
        ranked.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));
        ranked.truncate(cap(limit));
        Ok(ranked)
    }

    async fn revenue_by_day(&self, window_days: i32) -> Result<Vec<DailyRevenue>> {
        let tables = self.tables()?;
        let since = Utc::now().date_naive() - Duration::days(i64::from(window_days));
        let mut days: BTreeMap<NaiveDate, (f64, BTreeSet<&str>)> = BTreeMap::new();
        for sale in tables.sales.iter().filter(|s| s.sale_date >= since) {
            let entry = days.entry(sale.sale_date).or_default();
            entry.0 += sale.revenue;
            entry.1.insert(sale.product_id.as_str());
        }
        Ok(days
            .into_iter()
            .rev()
            .map(|(date, (daily_revenue, products))| DailyRevenue {
                date,
                daily_revenue,
                products_sold: i64::try_from(products.len()).unwrap_or(i64::MAX),
            })
            .collect())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_product(&self, product: &ProductInput) -> Result<Product> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let created = Product {
            id: ObjectId::new().to_hex(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            brand: product.brand.clone(),
            image_url: product.image_url.clone(),
            rating: product.rating,
            tags: product.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.products.push(created.clone());
        Ok(created)
    }

    async fn list_products(&self, limit: i64) -> Result<Vec<Product>> {
        let tables = self.tables()?;
        Ok(tables.products.iter().take(cap(limit)).cloned().collect())
    }

    async fn find_product(&self, id: &ObjectId) -> Result<Option<Product>> {
        let tables = self.tables()?;
        Ok(tables
            .products
            .iter()
            .find(|p| matches_id(&p.id, id))
            .cloned())
    }

    async fn update_product(&self, id: &ObjectId, product: &ProductInput) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(stored) = tables.products.iter_mut().find(|p| matches_id(&p.id, id)) else {
            return Ok(0);
        };
        stored.name.clone_from(&product.name);
        stored.description.clone_from(&product.description);
        stored.price = product.price;
        stored.category.clone_from(&product.category);
        stored.brand.clone_from(&product.brand);
        stored.image_url.clone_from(&product.image_url);
        stored.rating = product.rating;
        stored.tags.clone_from(&product.tags);
        stored.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_product(&self, id: &ObjectId) -> Result<u64> {
        let mut tables = self.tables()?;
        let before = tables.products.len();
        tables.products.retain(|p| !matches_id(&p.id, id));
        Ok((before - tables.products.len()) as u64)
    }

    async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>> {
        let tables = self.tables()?;
        let needle = query.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);
        Ok(tables
            .products
            .iter()
            .filter(|p| hit(&p.name) || hit(&p.description) || p.tags.iter().any(|t| hit(t)))
            .take(cap(limit))
            .cloned()
            .collect())
    }

    async fn products_in_category(&self, category: &str, limit: i64) -> Result<Vec<Product>> {
        let tables = self.tables()?;
        Ok(tables
            .products
            .iter()
            .filter(|p| p.category == category)
            .take(cap(limit))
            .cloned()
            .collect())
    }

    async fn insert_category(&self, category: &CategoryInput) -> Result<Category> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let created = Category {
            id: ObjectId::new().to_hex(),
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id.clone(),
            image_url: category.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(created.clone());
        Ok(created)
    }

    async fn list_categories(&self, limit: i64) -> Result<Vec<Category>> {
        let tables = self.tables()?;
        Ok(tables.categories.iter().take(cap(limit)).cloned().collect())
    }

    async fn find_category(&self, id: &ObjectId) -> Result<Option<Category>> {
        let tables = self.tables()?;
        Ok(tables
            .categories
            .iter()
            .find(|c| matches_id(&c.id, id))
            .cloned())
    }

    async fn update_category(&self, id: &ObjectId, category: &CategoryInput) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(stored) = tables.categories.iter_mut().find(|c| matches_id(&c.id, id)) else {
            return Ok(0);
        };
        stored.name.clone_from(&category.name);
        stored.description.clone_from(&category.description);
        stored.parent_id.clone_from(&category.parent_id);
        stored.image_url.clone_from(&category.image_url);
        stored.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_category(&self, id: &ObjectId) -> Result<u64> {
        let mut tables = self.tables()?;
        let before = tables.categories.len();
        tables.categories.retain(|c| !matches_id(&c.id, id));
        Ok((before - tables.categories.len()) as u64)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<Review> {
        let mut tables = self.tables()?;
        let created = Review {
            id: ObjectId::new().to_hex(),
            product_id: review.product_id.clone(),
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment.clone(),
            helpful: 0,
            created_at: Utc::now(),
        };
        tables.reviews.push(created.clone());
        Ok(created)
    }

    async fn reviews_for_product(&self, product_id: &str) -> Result<Vec<Review>> {
        let tables = self.tables()?;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn find_review(&self, id: &ObjectId) -> Result<Option<Review>> {
        let tables = self.tables()?;
        Ok(tables
            .reviews
            .iter()
            .find(|r| matches_id(&r.id, id))
            .cloned())
    }

    async fn update_review(&self, id: &ObjectId, update: &ReviewUpdate) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(stored) = tables.reviews.iter_mut().find(|r| matches_id(&r.id, id)) else {
            return Ok(0);
        };
        stored.rating = update.rating;
        stored.comment.clone_from(&update.comment);
        Ok(1)
    }

    async fn delete_review(&self, id: &ObjectId) -> Result<u64> {
        let mut tables = self.tables()?;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| !matches_id(&r.id, id));
        Ok((before - tables.reviews.len()) as u64)
    }

    async fn increment_review_helpful(&self, id: &ObjectId) -> Result<u64> {
        let mut tables = self.tables()?;
        let Some(stored) = tables.reviews.iter_mut().find(|r| matches_id(&r.id, id)) else {
            return Ok(0);
        };
        stored.helpful += 1;
        Ok(1)
    }

    async fn wishlist_for_user(&self, user_id: i32) -> Result<Vec<Wishlist>> {
        let tables = self.tables()?;
        Ok(tables
            .wishlist
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_wishlist_item(&self, user_id: i32, product_id: &str) -> Result<Wishlist> {
        let mut tables = self.tables()?;
        let created = Wishlist {
            id: ObjectId::new().to_hex(),
            user_id,
            product_id: product_id.to_string(),
            added_at: Utc::now(),
        };
        tables.wishlist.push(created.clone());
        Ok(created)
    }

    async fn delete_wishlist_item(&self, user_id: i32, product_id: &str) -> Result<u64> {
        let mut tables = self.tables()?;
        let position = tables
            .wishlist
            .iter()
            .position(|w| w.user_id == user_id && w.product_id == product_id);
        match position {
            Some(index) => {
                tables.wishlist.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::NewOrderItem;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test".into(),
            email: email.into(),
            password: "pw".into(),
            ..NewUser::default()
        }
    }

    fn order_for(user_id: i32, product_ids: &[&str]) -> NewOrder {
        NewOrder {
            user_id,
            total_amount: 10.0,
            status: "pending".into(),
            payment_method: "card".into(),
            shipping_address: "1 Main St".into(),
            items: product_ids
                .iter()
                .map(|p| NewOrderItem {
                    product_id: (*p).to_string(),
                    quantity: 1,
                    price: 5.0,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.create_user(&new_user("a@example.com")).await.unwrap();
        let err = store
            .create_user(&new_user("a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn failed_order_item_leaves_no_trace() {
        let store = MemoryStore::new();
        let user = store.create_user(&new_user("b@example.com")).await.unwrap();

        let too_long = "x".repeat(101);
        let result = store
            .create_order(&order_for(user.id, &["ok", too_long.as_str()]))
            .await;

        assert!(result.is_err());
        assert_eq!(store.order_count(), 0);
        assert_eq!(store.order_item_count(), 0);
    }

    #[tokio::test]
    async fn order_items_are_linked_to_header() {
        let store = MemoryStore::new();
        let user = store.create_user(&new_user("c@example.com")).await.unwrap();

        let order = store
            .create_order(&order_for(user.id, &["p1", "p2"]))
            .await
            .unwrap();

        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|i| i.order_id == order.id));
        assert_eq!(store.list_order_items(order.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn user_with_orders_cannot_be_deleted() {
        let store = MemoryStore::new();
        let user = store.create_user(&new_user("d@example.com")).await.unwrap();
        store.create_order(&order_for(user.id, &[])).await.unwrap();

        assert!(store.delete_user(user.id).await.is_err());
    }

    #[tokio::test]
    async fn upsert_without_unique_constraint_fails() {
        let store = MemoryStore::new();
        let user = store.create_user(&new_user("e@example.com")).await.unwrap();
        let item = AddCartItem {
            product_id: "p1".into(),
            quantity: 1,
        };
        assert!(store.upsert_cart_item(user.id, &item).await.is_err());
    }

    #[tokio::test]
    async fn upsert_with_unique_constraint_merges_quantity() {
        let store = MemoryStore::with_unique_cart();
        let user = store.create_user(&new_user("f@example.com")).await.unwrap();
        let item = AddCartItem {
            product_id: "p1".into(),
            quantity: 2,
        };

        let first = store.upsert_cart_item(user.id, &item).await.unwrap();
        let second = store.upsert_cart_item(user.id, &item).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 4);
        assert_eq!(store.list_cart(user.id, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn popular_products_rank_by_quantity() {
        let store = MemoryStore::new();
        let today = Utc::now().date_naive();
        for (product, qty) in [("a", 1), ("b", 5), ("a", 2)] {
            store
                .record_sale(
                    &NewSale {
                        product_id: product.into(),
                        quantity_sold: qty,
                        revenue: 1.0,
                        sale_date: None,
                    },
                    today,
                )
                .await
                .unwrap();
        }

        let ranked = store.popular_products(20).await.unwrap();
        assert_eq!(ranked[0].product_id, "b");
        assert_eq!(ranked[1].total_sold, 3);
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(store.list_users(10).await.is_err());
        assert!(store.list_products(10).await.is_err());
        assert!(store.low_stock_inventory().await.is_err());
    }
}
