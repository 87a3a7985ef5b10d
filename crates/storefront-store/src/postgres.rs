//! PostgreSQL implementation of [`TransactionalStore`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow, PgSslMode};
use sqlx::FromRow;

use storefront_core::{
    AddCartItem, CartItem, NewOrder, NewUser, Order, OrderItem, User, UserUpdate,
};

use crate::config::{PoolConfig, PostgresConfig};
use crate::error::Result;
use crate::schema::{pg, POSTGRES_BOOTSTRAP};
use crate::{skip_undecodable, TransactionalStore};

const USER_COLUMNS: &str = "id, name, email, address, phone, created_at, updated_at";

const ORDER_COLUMNS: &str = "id, user_id, total_amount::FLOAT8 AS total_amount, status, \
     payment_method, shipping_address, created_at, updated_at";

const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, price::FLOAT8 AS price";

const CART_COLUMNS: &str = "id, user_id, product_id, quantity, created_at, updated_at";

/// Pooled PostgreSQL connector.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a pool and verify it with a liveness query.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or the liveness
    /// query fails.
    pub async fn connect(config: &PostgresConfig, pool: &PoolConfig) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .ssl_mode(PgSslMode::Disable);

        let pool = PgPoolOptions::new()
            .max_connections(pool.max_open)
            .min_connections(pool.warm_connections())
            .max_lifetime(pool.max_lifetime)
            .idle_timeout(pool.max_lifetime)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create missing tables. Failures are logged, not returned.
    pub async fn bootstrap(&self) {
        for ddl in POSTGRES_BOOTSTRAP {
            if let Err(e) = sqlx::query(ddl).execute(&self.pool).await {
                tracing::error!(error = %e, "PostgreSQL bootstrap statement failed");
            }
        }
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_orders(&self, sql: &str, user_id: Option<i32>, limit: i64) -> Result<Vec<Order>> {
        let mut query = sqlx::query(sql);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        let rows = query.bind(limit).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(pg::ORDERS, OrderRow::from_row(row)))
            .map(Order::from)
            .collect())
    }

    async fn insert_cart_row(&self, sql: &str, user_id: i32, item: &AddCartItem) -> Result<CartItem> {
        let row = sqlx::query(sql)
            .bind(user_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .fetch_one(&self.pool)
            .await?;

        Ok(CartRow::from_row(&row)?.into())
    }
}

// =============================================================================
// Row decoding
// =============================================================================

#[derive(FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    address: String,
    phone: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            phone: row.phone,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    total_amount: f64,
    status: String,
    payment_method: String,
    shipping_address: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            total_amount: row.total_amount,
            status: row.status,
            payment_method: row.payment_method,
            shipping_address: row.shipping_address,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
            items: Vec::new(),
        }
    }
}

#[derive(FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: String,
    quantity: i32,
    price: f64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            price: row.price,
        }
    }
}

#[derive(FromRow)]
struct CartRow {
    id: i32,
    user_id: i32,
    product_id: String,
    quantity: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<CartRow> for CartItem {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            quantity: row.quantity,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

fn decode_user(row: &PgRow) -> Result<User> {
    Ok(UserRow::from_row(row)?.into())
}

#[async_trait]
impl TransactionalStore for PgStore {
    // =========================================================================
    // Users
    // =========================================================================

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let (id, created_at, updated_at): (i32, NaiveDateTime, NaiveDateTime) = sqlx::query_as(
            r"INSERT INTO users (name, email, password, address, phone)
              VALUES ($1, $2, $3, $4, $5)
              RETURNING id, created_at, updated_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.address)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(User::from_new(
            id,
            user,
            created_at.and_utc(),
            updated_at.and_utc(),
        ))
    }

    async fn list_users(&self, limit: i64) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(pg::USERS, decode_user(row)))
            .collect())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| decode_user(&row))
            .transpose()
    }

    async fn update_user(&self, id: i32, update: &UserUpdate) -> Result<u64> {
        let result = sqlx::query(
            r"UPDATE users
              SET name = $1, email = $2, address = $3, phone = $4, updated_at = CURRENT_TIMESTAMP
              WHERE id = $5",
        )
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.address)
        .bind(&update.phone)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;

        let (id, created_at, updated_at): (i32, NaiveDateTime, NaiveDateTime) = sqlx::query_as(
            r"INSERT INTO orders (user_id, total_amount, status, payment_method, shipping_address)
              VALUES ($1, $2, $3, $4, $5)
              RETURNING id, created_at, updated_at",
        )
        .bind(order.user_id)
        .bind(order.total_amount)
        .bind(&order.status)
        .bind(&order.payment_method)
        .bind(&order.shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let (item_id,): (i32,) = sqlx::query_as(
                r"INSERT INTO order_items (order_id, product_id, quantity, price)
                  VALUES ($1, $2, $3, $4)
                  RETURNING id",
            )
            .bind(id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem {
                id: item_id,
                order_id: id,
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.price,
            });
        }

        tx.commit().await?;

        Ok(Order {
            id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status.clone(),
            payment_method: order.payment_method.clone(),
            shipping_address: order.shipping_address.clone(),
            created_at: created_at.and_utc(),
            updated_at: updated_at.and_utc(),
            items,
        })
    }

    async fn list_orders(&self, limit: i64) -> Result<Vec<Order>> {
        self.fetch_orders(
            &format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id LIMIT $1"),
            None,
            limit,
        )
        .await
    }

    async fn list_orders_for_user(&self, user_id: i32, limit: i64) -> Result<Vec<Order>> {
        self.fetch_orders(
            &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id LIMIT $2"),
            Some(user_id),
            limit,
        )
        .await
    }

    async fn get_order(&self, id: i32) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(OrderRow::from_row(&row)?.into())),
            None => Ok(None),
        }
    }

    async fn list_order_items(&self, order_id: i32) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(pg::ORDER_ITEMS, OrderItemRow::from_row(row)))
            .map(OrderItem::from)
            .collect())
    }

    async fn update_order_status(&self, id: i32, status: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    async fn list_cart(&self, user_id: i32, limit: i64) -> Result<Vec<CartItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {CART_COLUMNS} FROM cart WHERE user_id = $1 ORDER BY id LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(pg::CART, CartRow::from_row(row)))
            .map(CartItem::from)
            .collect())
    }

    async fn upsert_cart_item(&self, user_id: i32, item: &AddCartItem) -> Result<CartItem> {
        self.insert_cart_row(
            &format!(
                r"INSERT INTO cart (user_id, product_id, quantity)
                  VALUES ($1, $2, $3)
                  ON CONFLICT (user_id, product_id)
                  DO UPDATE SET quantity = cart.quantity + EXCLUDED.quantity,
                                updated_at = CURRENT_TIMESTAMP
                  RETURNING {CART_COLUMNS}"
            ),
            user_id,
            item,
        )
        .await
    }

    async fn insert_cart_item(&self, user_id: i32, item: &AddCartItem) -> Result<CartItem> {
        self.insert_cart_row(
            &format!(
                r"INSERT INTO cart (user_id, product_id, quantity)
                  VALUES ($1, $2, $3)
                  RETURNING {CART_COLUMNS}"
            ),
            user_id,
            item,
        )
        .await
    }

    async fn remove_cart_item(&self, user_id: i32, item_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cart WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn clear_cart(&self, user_id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
