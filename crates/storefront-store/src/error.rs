//! Error types for storefront storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed (connectivity, query, constraint, transaction).
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization of a record failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Connection target could not be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
