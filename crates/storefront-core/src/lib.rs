//! Core types for the storefront gateway.
//!
//! This crate provides the entity records shared by the store connectors, the
//! HTTP service and the client SDK:
//!
//! - **Transactional** (PostgreSQL): `User`, `Order`, `OrderItem`, `CartItem`
//! - **Operational** (MySQL): `Inventory`, `SalesAnalytics` and the aggregate
//!   read shapes `PopularProduct`, `DailyRevenue`
//! - **Documents** (MongoDB): `Product`, `Category`, `Review`, `Wishlist`
//!
//! Request bodies that only carry a subset of an entity's fields have their
//! own small types (`NewUser`, `UpdateOrderStatus`, `RestockRequest`, ...), so
//! every handler decodes exactly the fields it reads.
//!
//! # Identifiers
//!
//! Relational entities use store-generated `i32` serial keys. Document
//! entities use store-generated ObjectIds, carried here as their 24-character
//! hex rendering.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analytics;
pub mod cart;
pub mod category;
pub mod inventory;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use analytics::{DailyRevenue, NewSale, PopularProduct, SalesAnalytics};
pub use cart::{AddCartItem, CartItem};
pub use category::{Category, CategoryInput};
pub use inventory::{
    Inventory, InventoryUpdate, RestockRequest, DEFAULT_LOW_STOCK_THRESHOLD,
};
pub use order::{
    NewOrder, NewOrderItem, Order, OrderItem, UpdateOrderStatus, STATUS_CANCELLED,
    STATUS_PENDING,
};
pub use product::{Product, ProductInput};
pub use review::{NewReview, Review, ReviewUpdate};
pub use user::{NewUser, User, UserUpdate};
pub use wishlist::{AddWishlistItem, Wishlist};
