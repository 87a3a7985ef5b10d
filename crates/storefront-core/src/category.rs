//! Catalog category documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog category. Categories form a tree through `parent_id`, which is
/// neither validated nor checked for cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Store-generated identifier (hex).
    pub id: String,
    /// Category name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Parent category id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Image URL.
    pub image_url: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryInput {
    /// Category name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Parent category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Image URL.
    pub image_url: String,
}
