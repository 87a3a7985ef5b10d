//! Application state.

use std::sync::Arc;

use storefront_store::{AnalyticsStore, Connectors, DocumentStore, TransactionalStore};

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Users, orders and carts.
    pub transactional: Arc<dyn TransactionalStore>,

    /// Inventory and sales analytics.
    pub analytics: Arc<dyn AnalyticsStore>,

    /// Products, categories, reviews and wishlists.
    pub documents: Arc<dyn DocumentStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create application state from explicit store handles.
    #[must_use]
    pub fn new(
        transactional: Arc<dyn TransactionalStore>,
        analytics: Arc<dyn AnalyticsStore>,
        documents: Arc<dyn DocumentStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            transactional,
            analytics,
            documents,
            config,
        }
    }

    /// Create application state backed by live connectors.
    #[must_use]
    pub fn from_connectors(connectors: &Connectors, config: ServiceConfig) -> Self {
        Self::new(
            connectors.postgres.clone(),
            connectors.mysql.clone(),
            connectors.mongo.clone(),
            config,
        )
    }
}
