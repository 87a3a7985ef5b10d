//! Connection targets for the three stores.

use std::fmt;
use std::time::Duration;

/// Pool sizing shared by the relational stores and the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum open connections per pool (default: 25).
    pub max_open: u32,

    /// Idle connections per pool (default: 5).
    ///
    /// Neither sqlx nor the MongoDB driver caps idle connections, so this is
    /// applied as the pool minimum: up to this many connections stay open
    /// even when unused. See [`PoolConfig::warm_connections`].
    pub max_idle: u32,

    /// Maximum connection lifetime (default: 5 minutes).
    pub max_lifetime: Duration,
}

impl PoolConfig {
    /// Minimum pool size handed to the drivers, never above `max_open`.
    #[must_use]
    pub fn warm_connections(&self) -> u32 {
        self.max_idle.min(self.max_open)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_open: 25,
            max_idle: 5,
            max_lifetime: Duration::from_secs(300),
        }
    }
}

/// PostgreSQL connection target.
#[derive(Clone)]
pub struct PostgresConfig {
    /// Server host (default: "localhost").
    pub host: String,
    /// Server port (default: 5432).
    pub port: u16,
    /// Login role (default: "postgres").
    pub user: String,
    /// Login password (default: "postgres").
    pub password: String,
    /// Database name (default: "ecommerce").
    pub database: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: "postgres".into(),
            database: "ecommerce".into(),
        }
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// MySQL connection target.
#[derive(Clone)]
pub struct MySqlConfig {
    /// Server host (default: "localhost").
    pub host: String,
    /// Server port (default: 3306).
    pub port: u16,
    /// Login user (default: "root").
    pub user: String,
    /// Login password (default: "root").
    pub password: String,
    /// Database name (default: "ecommerce").
    pub database: String,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3306,
            user: "root".into(),
            password: "root".into(),
            database: "ecommerce".into(),
        }
    }
}

impl fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// MongoDB connection target.
#[derive(Clone)]
pub struct MongoConfig {
    /// Server host (default: "localhost").
    pub host: String,
    /// Server port (default: 27017).
    pub port: u16,
    /// Login user. Credentials are only sent when user and password are both set.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database holding the catalog collections (default: "ecommerce").
    pub database: String,
}

impl MongoConfig {
    /// Whether both halves of the credential are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty() && !self.password.is_empty()
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 27017,
            user: String::new(),
            password: String::new(),
            database: "ecommerce".into(),
        }
    }
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Everything needed to open all three connectors.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Transactional store.
    pub postgres: PostgresConfig,
    /// Analytics store.
    pub mysql: MySqlConfig,
    /// Document store.
    pub mongo: MongoConfig,
    /// Pool sizing applied to every connector.
    pub pool: PoolConfig,
}
