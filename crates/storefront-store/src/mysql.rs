//! MySQL implementation of [`AnalyticsStore`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::FromRow;

use storefront_core::{
    DailyRevenue, Inventory, InventoryUpdate, NewSale, PopularProduct, SalesAnalytics,
};

use crate::config::{MySqlConfig, PoolConfig};
use crate::error::Result;
use crate::schema::{mysql as tables, MYSQL_BOOTSTRAP};
use crate::{skip_undecodable, AnalyticsStore};

const INVENTORY_COLUMNS: &str = "id, product_id, quantity, warehouse_location, last_restocked, \
     low_stock_threshold, created_at, updated_at";

const SALES_COLUMNS: &str = "id, product_id, quantity_sold, revenue, \
     sale_date, created_at";

/// Pooled MySQL connector.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Open a pool and verify it with a liveness query.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or the liveness
    /// query fails.
    pub async fn connect(config: &MySqlConfig, pool: &PoolConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
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
            "Connected to MySQL"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create missing tables. Failures are logged, not returned.
    pub async fn bootstrap(&self) {
        for ddl in MYSQL_BOOTSTRAP {
            if let Err(e) = sqlx::query(ddl).execute(&self.pool).await {
                tracing::error!(error = %e, "MySQL bootstrap statement failed");
            }
        }
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_inventory(&self, sql: &str, limit: Option<i64>) -> Result<Vec<Inventory>> {
        let mut query = sqlx::query(sql);
        if let Some(limit) = limit {
            query = query.bind(limit);
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(tables::INVENTORY, InventoryRow::from_row(row)))
            .map(Inventory::from)
            .collect())
    }
}

// =============================================================================
// Row decoding
// =============================================================================

#[derive(FromRow)]
struct InventoryRow {
    id: i32,
    product_id: String,
    quantity: i32,
    warehouse_location: String,
    last_restocked: DateTime<Utc>,
    low_stock_threshold: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            warehouse_location: row.warehouse_location,
            last_restocked: row.last_restocked,
            low_stock_threshold: row.low_stock_threshold,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `DECIMAL(10,2)` amounts always fit an `f64`.
fn money(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

#[derive(FromRow)]
struct SalesRow {
    id: i32,
    product_id: String,
    quantity_sold: i32,
    revenue: Decimal,
    sale_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<SalesRow> for SalesAnalytics {
    fn from(row: SalesRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            quantity_sold: row.quantity_sold,
            revenue: money(row.revenue),
            sale_date: row.sale_date,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct PopularRow {
    product_id: String,
    total_sold: i64,
    total_revenue: Decimal,
}

#[derive(FromRow)]
struct DailyRevenueRow {
    date: NaiveDate,
    daily_revenue: Decimal,
    products_sold: i64,
}

#[async_trait]
impl AnalyticsStore for MySqlStore {
    // =========================================================================
    // Inventory
    // =========================================================================

    async fn list_inventory(&self, limit: i64) -> Result<Vec<Inventory>> {
        self.fetch_inventory(
            &format!("SELECT {INVENTORY_COLUMNS} FROM inventory ORDER BY id LIMIT ?"),
            Some(limit),
        )
        .await
    }

    async fn get_inventory(&self, product_id: &str) -> Result<Option<Inventory>> {
        let row = sqlx::query(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory WHERE product_id = ?"
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(InventoryRow::from_row(&row)?.into())),
            None => Ok(None),
        }
    }

    async fn update_inventory(&self, product_id: &str, update: &InventoryUpdate) -> Result<u64> {
        // The driver reports matched rows, so an unchanged row still counts.
        let result = sqlx::query(
            r"UPDATE inventory
              SET quantity = ?, warehouse_location = ?, updated_at = NOW()
              WHERE product_id = ?",
        )
        .bind(update.quantity)
        .bind(&update.warehouse_location)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn insert_inventory(&self, product_id: &str, update: &InventoryUpdate) -> Result<()> {
        sqlx::query(
            r"INSERT INTO inventory (product_id, quantity, warehouse_location, last_restocked)
              VALUES (?, ?, ?, NOW())",
        )
        .bind(product_id)
        .bind(update.quantity)
        .bind(&update.warehouse_location)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn restock_inventory(&self, product_id: &str, quantity: i32) -> Result<u64> {
        let result = sqlx::query(
            r"UPDATE inventory
              SET quantity = quantity + ?, last_restocked = NOW(), updated_at = NOW()
              WHERE product_id = ?",
        )
        .bind(quantity)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn low_stock_inventory(&self) -> Result<Vec<Inventory>> {
        self.fetch_inventory(
            &format!(
                "SELECT {INVENTORY_COLUMNS} FROM inventory \
                 WHERE quantity <= low_stock_threshold ORDER BY id"
            ),
            None,
        )
        .await
    }

    // =========================================================================
    // Sales analytics
    // =========================================================================

    async fn sales_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> Result<Vec<SalesAnalytics>> {
        let rows = sqlx::query(&format!(
            "SELECT {SALES_COLUMNS} FROM sales_analytics \
             WHERE sale_date BETWEEN ? AND ? ORDER BY sale_date, id LIMIT ?"
        ))
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(tables::SALES_ANALYTICS, SalesRow::from_row(row)))
            .map(SalesAnalytics::from)
            .collect())
    }

    async fn record_sale(&self, sale: &NewSale, sale_date: NaiveDate) -> Result<SalesAnalytics> {
        let result = sqlx::query(
            r"INSERT INTO sales_analytics (product_id, quantity_sold, revenue, sale_date)
              VALUES (?, ?, ?, ?)",
        )
        .bind(&sale.product_id)
        .bind(sale.quantity_sold)
        .bind(sale.revenue)
        .bind(sale_date)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(&format!(
            "SELECT {SALES_COLUMNS} FROM sales_analytics WHERE id = ?"
        ))
        .bind(result.last_insert_id())
        .fetch_one(&self.pool)
        .await?;

        Ok(SalesRow::from_row(&row)?.into())
    }

    async fn popular_products(&self, limit: i64) -> Result<Vec<PopularProduct>> {
        let rows = sqlx::query(
            r"SELECT product_id,
                     CAST(SUM(quantity_sold) AS SIGNED) AS total_sold,
                     SUM(revenue) AS total_revenue
              FROM sales_analytics
              GROUP BY product_id
              ORDER BY total_sold DESC
              LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| skip_undecodable(tables::SALES_ANALYTICS, PopularRow::from_row(row)))
            .map(|row| PopularProduct {
                product_id: row.product_id,
                total_sold: row.total_sold,
                total_revenue: money(row.total_revenue),
            })
            .collect())
    }

    async fn revenue_by_day(&self, window_days: i32) -> Result<Vec<DailyRevenue>> {
        let rows = sqlx::query(
            r"SELECT DATE(sale_date) AS date,
                     SUM(revenue) AS daily_revenue,
                     COUNT(DISTINCT product_id) AS products_sold
              FROM sales_analytics
              WHERE sale_date >= DATE_SUB(CURDATE(), INTERVAL ? DAY)
              GROUP BY DATE(sale_date)
              ORDER BY date DESC",
        )
        .bind(window_days)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                skip_undecodable(tables::SALES_ANALYTICS, DailyRevenueRow::from_row(row))
            })
            .map(|row| DailyRevenue {
                date: row.date,
                daily_revenue: money(row.daily_revenue),
                products_sold: row.products_sold,
            })
            .collect())
    }
}
