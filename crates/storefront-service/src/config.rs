//! Service configuration.

use std::str::FromStr;
use std::time::Duration;

use storefront_store::{MongoConfig, MySqlConfig, PoolConfig, PostgresConfig, StoreConfig};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080", port from `PORT`).
    pub listen_addr: String,

    /// Connection targets for the three stores.
    pub stores: StoreConfig,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();
        let pool_defaults = PoolConfig::default();

        let listen_addr = env.var("LISTEN_ADDR").unwrap_or_else(|| {
            let port = env.text("PORT", "8080");
            format!("0.0.0.0:{port}")
        });

        let stores = StoreConfig {
            postgres: PostgresConfig {
                host: env.text("POSTGRES_HOST", "localhost"),
                port: env.parsed("POSTGRES_PORT").unwrap_or(5432),
                user: env.text("POSTGRES_USER", "postgres"),
                password: env.text("POSTGRES_PASSWORD", "postgres"),
                database: env.text("POSTGRES_DB", "ecommerce"),
            },
            mysql: MySqlConfig {
                host: env.text("MYSQL_HOST", "localhost"),
                port: env.parsed("MYSQL_PORT").unwrap_or(3306),
                user: env.text("MYSQL_USER", "root"),
                password: env.text("MYSQL_PASSWORD", "root"),
                database: env.text("MYSQL_DB", "ecommerce"),
            },
            mongo: MongoConfig {
                host: env.text("MONGO_HOST", "localhost"),
                port: env.parsed("MONGO_PORT").unwrap_or(27017),
                user: env.text("MONGO_USER", ""),
                password: env.text("MONGO_PASSWORD", ""),
                database: env.text("MONGO_DB", "ecommerce"),
            },
            pool: PoolConfig {
                max_open: env.parsed("DB_MAX_OPEN_CONNS").unwrap_or(pool_defaults.max_open),
                max_idle: env.parsed("DB_MAX_IDLE_CONNS").unwrap_or(pool_defaults.max_idle),
                max_lifetime: env
                    .parsed("DB_CONN_MAX_LIFETIME_SECONDS")
                    .map_or(pool_defaults.max_lifetime, Duration::from_secs),
            },
        };

        Self {
            listen_addr,
            stores,
            cors_origins: env
                .text("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            max_body_bytes: env.parsed("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env
                .parsed("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

/// Environment lookup that treats blank values as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn text(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.into())
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.var(key).and_then(|v| v.trim().parse().ok())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            stores: StoreConfig::default(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024, // 1MB
            request_timeout_seconds: 30,
        }
    }
}
