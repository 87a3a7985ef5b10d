//! Catalog product documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-generated identifier (hex).
    pub id: String,
    /// Product name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Category name (free text, not a category id).
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Image URL.
    pub image_url: String,
    /// Average rating.
    pub rating: f64,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    /// Product name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Category name.
    pub category: String,
    /// Brand name.
    pub brand: String,
    /// Image URL.
    pub image_url: String,
    /// Average rating.
    pub rating: f64,
    /// Free-form tags.
    pub tags: Vec<String>,
}
