//! Storefront HTTP API gateway.
//!
//! This crate exposes one REST surface over three backing stores:
//!
//! - Users, orders and carts (PostgreSQL)
//! - Inventory and sales analytics (MySQL)
//! - Products, categories, reviews and wishlists (MongoDB)
//!
//! Handlers decode requests, call the store traits from `storefront-store`
//! and map outcomes to HTTP results. Errors are returned as plain-text
//! bodies; successful responses are JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handler needs async for routing

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
