//! MongoDB implementation of [`DocumentStore`].

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Cursor, Database, IndexModel};
use serde::de::DeserializeOwned;

use storefront_core::{
    Category, CategoryInput, NewReview, Product, ProductInput, Review, ReviewUpdate, Wishlist,
};

use crate::config::{MongoConfig, PoolConfig};
use crate::documents::{CategoryDocument, ProductDocument, ReviewDocument, WishlistDocument};
use crate::error::{Result, StoreError};
use crate::schema::{all_collections, collection, COLLECTION_INDEXES};
use crate::{skip_undecodable, DocumentStore};

/// Bound on the initial connect and ping.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pooled MongoDB connector bound to one database.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect, verify the deployment with a ping, and bind the configured database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI cannot be built, the server cannot be
    /// reached within the connect timeout, or the ping fails.
    pub async fn connect(config: &MongoConfig, pool: &PoolConfig) -> Result<Self> {
        let mut options =
            ClientOptions::parse(format!("mongodb://{}:{}", config.host, config.port)).await?;

        options.app_name = Some("storefront-gateway".into());
        options.max_pool_size = Some(pool.max_open);
        options.min_pool_size = Some(pool.warm_connections());
        options.max_idle_time = Some(pool.max_lifetime);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        if config.has_credentials() {
            options.credential = Some(
                Credential::builder()
                    .username(config.user.clone())
                    .password(config.password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        tokio::time::timeout(
            CONNECT_TIMEOUT,
            database.run_command(doc! { "ping": 1 }).into_future(),
        )
        .await
        .map_err(|_| StoreError::Database("timed out pinging MongoDB".into()))??;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to MongoDB"
        );

        Ok(Self { client, database })
    }

    /// Handle to the configured database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Create missing collections and the lookup indexes. Failures are
    /// logged, not returned.
    pub async fn bootstrap(&self) {
        let existing = match self.database.list_collection_names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list MongoDB collections");
                return;
            }
        };

        for name in all_collections() {
            if existing.iter().any(|n| n == name) {
                continue;
            }
            if let Err(e) = self.database.create_collection(name).await {
                tracing::error!(collection = name, error = %e, "Failed to create collection");
            }
        }

        for (name, field) in COLLECTION_INDEXES {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            let index = IndexModel::builder().keys(keys).build();
            if let Err(e) = self.collection(name).create_index(index).await {
                tracing::error!(collection = name, field = field, error = %e, "Failed to create index");
            }
        }
    }

    /// Disconnect, waiting at most `timeout` for in-flight operations.
    pub async fn close(&self, timeout: Duration) {
        if tokio::time::timeout(timeout, self.client.clone().shutdown().into_future())
            .await
            .is_err()
        {
            tracing::warn!("MongoDB shutdown timed out");
        }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    async fn insert<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let document = bson::to_document(value)?;
        self.collection(name).insert_one(document).await?;
        Ok(())
    }

    async fn find_by_id<T, M>(&self, name: &'static str, id: &ObjectId) -> Result<Option<M>>
    where
        T: DeserializeOwned + Into<M>,
    {
        match self.collection(name).find_one(doc! { "_id": *id }).await? {
            Some(raw) => Ok(Some(bson::from_document::<T>(raw)?.into())),
            None => Ok(None),
        }
    }

    async fn find_many<T, M>(
        &self,
        name: &'static str,
        filter: Document,
        limit: Option<i64>,
    ) -> Result<Vec<M>>
    where
        T: DeserializeOwned + Into<M>,
    {
        let collection = self.collection(name);
        let cursor = match limit {
            Some(limit) => collection.find(filter).limit(limit).await?,
            None => collection.find(filter).await?,
        };
        decode_cursor::<T, M>(name, cursor).await
    }

    async fn update_by_id(&self, name: &str, id: &ObjectId, update: Document) -> Result<u64> {
        let result = self
            .collection(name)
            .update_one(doc! { "_id": *id }, update)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, name: &str, id: &ObjectId) -> Result<u64> {
        let result = self.collection(name).delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count)
    }
}

/// Drain a cursor, dropping documents that do not decode into `T`.
async fn decode_cursor<T, M>(name: &'static str, mut cursor: Cursor<Document>) -> Result<Vec<M>>
where
    T: DeserializeOwned + Into<M>,
{
    let mut out = Vec::new();
    while let Some(raw) = cursor.try_next().await? {
        out.extend(decode_document::<T, M>(name, raw));
    }
    Ok(out)
}

fn decode_document<T, M>(name: &'static str, raw: Document) -> Option<M>
where
    T: DeserializeOwned + Into<M>,
{
    skip_undecodable(name, bson::from_document::<T>(raw)).map(Into::into)
}

/// Filter matching `query` literally and case-insensitively in name,
/// description or any tag.
fn search_filter(query: &str) -> Document {
    let pattern = regex::escape(query);
    doc! {
        "$or": [
            { "name": { "$regex": pattern.as_str(), "$options": "i" } },
            { "description": { "$regex": pattern.as_str(), "$options": "i" } },
            { "tags": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    // =========================================================================
    // Products
    // =========================================================================

    async fn insert_product(&self, product: &ProductInput) -> Result<Product> {
        let document = ProductDocument::new(product);
        self.insert(collection::PRODUCTS, &document).await?;
        Ok(document.into())
    }

    async fn list_products(&self, limit: i64) -> Result<Vec<Product>> {
        self.find_many::<ProductDocument, _>(collection::PRODUCTS, doc! {}, Some(limit))
            .await
    }

    async fn find_product(&self, id: &ObjectId) -> Result<Option<Product>> {
        self.find_by_id::<ProductDocument, _>(collection::PRODUCTS, id)
            .await
    }

    async fn update_product(&self, id: &ObjectId, product: &ProductInput) -> Result<u64> {
        self.update_by_id(
            collection::PRODUCTS,
            id,
            ProductDocument::set_fields(product),
        )
        .await
    }

    async fn delete_product(&self, id: &ObjectId) -> Result<u64> {
        self.delete_by_id(collection::PRODUCTS, id).await
    }

    async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>> {
        self.find_many::<ProductDocument, _>(collection::PRODUCTS, search_filter(query), Some(limit))
            .await
    }

    async fn products_in_category(&self, category: &str, limit: i64) -> Result<Vec<Product>> {
        self.find_many::<ProductDocument, _>(
            collection::PRODUCTS,
            doc! { "category": category },
            Some(limit),
        )
        .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    async fn insert_category(&self, category: &CategoryInput) -> Result<Category> {
        let document = CategoryDocument::new(category);
        self.insert(collection::CATEGORIES, &document).await?;
        Ok(document.into())
    }

    async fn list_categories(&self, limit: i64) -> Result<Vec<Category>> {
        self.find_many::<CategoryDocument, _>(collection::CATEGORIES, doc! {}, Some(limit))
            .await
    }

    async fn find_category(&self, id: &ObjectId) -> Result<Option<Category>> {
        self.find_by_id::<CategoryDocument, _>(collection::CATEGORIES, id)
            .await
    }

    async fn update_category(&self, id: &ObjectId, category: &CategoryInput) -> Result<u64> {
        self.update_by_id(
            collection::CATEGORIES,
            id,
            CategoryDocument::set_fields(category),
        )
        .await
    }

    async fn delete_category(&self, id: &ObjectId) -> Result<u64> {
        self.delete_by_id(collection::CATEGORIES, id).await
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    async fn insert_review(&self, review: &NewReview) -> Result<Review> {
        let document = ReviewDocument::new(review);
        self.insert(collection::REVIEWS, &document).await?;
        Ok(document.into())
    }

    async fn reviews_for_product(&self, product_id: &str) -> Result<Vec<Review>> {
        self.find_many::<ReviewDocument, _>(
            collection::REVIEWS,
            doc! { "product_id": product_id },
            None,
        )
        .await
    }

    async fn find_review(&self, id: &ObjectId) -> Result<Option<Review>> {
        self.find_by_id::<ReviewDocument, _>(collection::REVIEWS, id)
            .await
    }

    async fn update_review(&self, id: &ObjectId, update: &ReviewUpdate) -> Result<u64> {
        self.update_by_id(collection::REVIEWS, id, ReviewDocument::set_fields(update))
            .await
    }

    async fn delete_review(&self, id: &ObjectId) -> Result<u64> {
        self.delete_by_id(collection::REVIEWS, id).await
    }

    async fn increment_review_helpful(&self, id: &ObjectId) -> Result<u64> {
        self.update_by_id(collection::REVIEWS, id, doc! { "$inc": { "helpful": 1 } })
            .await
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    async fn wishlist_for_user(&self, user_id: i32) -> Result<Vec<Wishlist>> {
        self.find_many::<WishlistDocument, _>(
            collection::WISHLIST,
            doc! { "user_id": user_id },
            None,
        )
        .await
    }

    async fn insert_wishlist_item(&self, user_id: i32, product_id: &str) -> Result<Wishlist> {
        let document = WishlistDocument::new(user_id, product_id);
        self.insert(collection::WISHLIST, &document).await?;
        Ok(document.into())
    }

    async fn delete_wishlist_item(&self, user_id: i32, product_id: &str) -> Result<u64> {
        let result = self
            .collection(collection::WISHLIST)
            .delete_one(doc! { "user_id": user_id, "product_id": product_id })
            .await?;
        Ok(result.deleted_count)
    }
}
