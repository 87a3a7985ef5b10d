//! Storefront client SDK.
//!
//! This crate provides a typed client for the storefront gateway and the
//! load generator built on it.
//!
//! # Example
//!
//! ```no_run
//! use storefront_client::StorefrontClient;
//! use storefront_core::NewUser;
//!
//! # async fn example() -> Result<(), storefront_client::ClientError> {
//! let client = StorefrontClient::new("http://localhost:8080")?;
//!
//! let user = client
//!     .create_user(&NewUser {
//!         name: "Ada".to_string(),
//!         email: "ada@example.com".to_string(),
//!         password: "hunter2".to_string(),
//!         ..NewUser::default()
//!     })
//!     .await?;
//!
//! println!("Registered user {}", user.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
pub mod loadgen;
mod types;

pub use client::{ClientOptions, StorefrontClient};
pub use error::ClientError;
pub use types::*;
