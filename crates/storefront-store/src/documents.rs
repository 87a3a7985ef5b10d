//! BSON shapes of the catalog collections.
//!
//! Document ids are generated client-side before insert and rendered as
//! 24-character hex strings in the domain models.

use bson::oid::ObjectId;
use bson::{doc, DateTime, Document};
use serde::{Deserialize, Serialize};

use storefront_core::{
    Category, CategoryInput, NewReview, Product, ProductInput, Review, ReviewUpdate, Wishlist,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProductDocument {
    pub fn new(input: &ProductInput) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            category: input.category.clone(),
            brand: input.brand.clone(),
            image_url: input.image_url.clone(),
            rating: input.rating,
            tags: input.tags.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// `$set` body overwriting every client-editable field.
    pub fn set_fields(input: &ProductInput) -> Document {
        doc! {
            "$set": {
                "name": input.name.as_str(),
                "description": input.description.as_str(),
                "price": input.price,
                "category": input.category.as_str(),
                "brand": input.brand.as_str(),
                "image_url": input.image_url.as_str(),
                "rating": input.rating,
                "tags": input.tags.clone(),
                "updated_at": DateTime::now(),
            }
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            description: doc.description,
            price: doc.price,
            category: doc.category,
            brand: doc.brand,
            image_url: doc.image_url,
            rating: doc.rating,
            tags: doc.tags,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CategoryDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub image_url: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CategoryDocument {
    pub fn new(input: &CategoryInput) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: input.name.clone(),
            description: input.description.clone(),
            parent_id: input.parent_id.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_fields(input: &CategoryInput) -> Document {
        doc! {
            "$set": {
                "name": input.name.as_str(),
                "description": input.description.as_str(),
                "parent_id": input.parent_id.clone(),
                "image_url": input.image_url.as_str(),
                "updated_at": DateTime::now(),
            }
        }
    }
}

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            description: doc.description,
            parent_id: doc.parent_id,
            image_url: doc.image_url,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReviewDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub user_id: i32,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub helpful: i32,
    pub created_at: DateTime,
}

impl ReviewDocument {
    pub fn new(input: &NewReview) -> Self {
        Self {
            id: ObjectId::new(),
            product_id: input.product_id.clone(),
            user_id: input.user_id,
            rating: input.rating,
            comment: input.comment.clone(),
            helpful: 0,
            created_at: DateTime::now(),
        }
    }

    pub fn set_fields(update: &ReviewUpdate) -> Document {
        doc! {
            "$set": {
                "rating": update.rating,
                "comment": update.comment.as_str(),
            }
        }
    }
}

impl From<ReviewDocument> for Review {
    fn from(doc: ReviewDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            product_id: doc.product_id,
            user_id: doc.user_id,
            rating: doc.rating,
            comment: doc.comment,
            helpful: doc.helpful,
            created_at: doc.created_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WishlistDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub user_id: i32,
    #[serde(default)]
    pub product_id: String,
    pub added_at: DateTime,
}

impl WishlistDocument {
    pub fn new(user_id: i32, product_id: &str) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            product_id: product_id.to_string(),
            added_at: DateTime::now(),
        }
    }
}

impl From<WishlistDocument> for Wishlist {
    fn from(doc: WishlistDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            user_id: doc.user_id,
            product_id: doc.product_id,
            added_at: doc.added_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_round_trips_through_bson() {
        let input = ProductInput {
            name: "Laptop".into(),
            price: 999.99,
            tags: vec!["computers".into()],
            ..ProductInput::default()
        };
        let document = bson::to_document(&ProductDocument::new(&input)).unwrap();
        assert!(document.get_object_id("_id").is_ok());

        let product: Product = bson::from_document::<ProductDocument>(document)
            .unwrap()
            .into();
        assert_eq!(product.id.len(), 24);
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.tags, vec!["computers".to_string()]);
    }

    #[test]
    fn document_without_timestamps_fails_to_decode() {
        let raw = doc! { "_id": ObjectId::new(), "name": "Broken" };
        assert!(bson::from_document::<ProductDocument>(raw).is_err());
    }

    #[test]
    fn new_review_starts_with_zero_helpful() {
        let review = ReviewDocument::new(&NewReview {
            product_id: "p1".into(),
            user_id: 4,
            rating: 5,
            comment: "great".into(),
        });
        assert_eq!(review.helpful, 0);
    }

    #[test]
    fn review_update_never_touches_helpful() {
        let update = ReviewDocument::set_fields(&ReviewUpdate {
            rating: 2,
            comment: "meh".into(),
        });
        let set = update.get_document("$set").unwrap();
        assert!(!set.contains_key("helpful"));
        assert_eq!(set.get_i32("rating").unwrap(), 2);
    }

    #[test]
    fn root_category_stores_no_parent() {
        let document = bson::to_document(&CategoryDocument::new(&CategoryInput {
            name: "Electronics".into(),
            ..CategoryInput::default()
        }))
        .unwrap();
        assert!(!document.contains_key("parent_id"));
    }
}
