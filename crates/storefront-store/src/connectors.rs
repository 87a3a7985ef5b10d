//! Process-wide connector set.

use std::sync::Arc;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::{MongoStore, MySqlStore, PgStore};

/// Bound on closing each connector at shutdown.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// One pooled connector per backing store.
///
/// Created once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct Connectors {
    /// Users, orders and carts.
    pub postgres: Arc<PgStore>,
    /// Inventory and sales analytics.
    pub mysql: Arc<MySqlStore>,
    /// Catalog documents.
    pub mongo: Arc<MongoStore>,
}

impl Connectors {
    /// Connect to all three stores, then bootstrap their schemas.
    ///
    /// Bootstrap failures are logged and do not abort startup.
    ///
    /// # Errors
    ///
    /// Returns the first connection failure.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let postgres = PgStore::connect(&config.postgres, &config.pool).await?;
        let mysql = MySqlStore::connect(&config.mysql, &config.pool).await?;
        let mongo = MongoStore::connect(&config.mongo, &config.pool).await?;

        postgres.bootstrap().await;
        mysql.bootstrap().await;
        mongo.bootstrap().await;

        tracing::info!("All stores connected");

        Ok(Self {
            postgres: Arc::new(postgres),
            mysql: Arc::new(mysql),
            mongo: Arc::new(mongo),
        })
    }

    /// Close every connector, each bounded by [`SHUTDOWN_TIMEOUT`].
    pub async fn close(&self) {
        let postgres = async {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, self.postgres.close())
                .await
                .is_err()
            {
                tracing::warn!("PostgreSQL pool close timed out");
            }
        };
        let mysql = async {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, self.mysql.close())
                .await
                .is_err()
            {
                tracing::warn!("MySQL pool close timed out");
            }
        };

        tokio::join!(postgres, mysql, self.mongo.close(SHUTDOWN_TIMEOUT));
        tracing::info!("All stores closed");
    }
}
