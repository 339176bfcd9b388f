//! Discover Zimbabwe client library.
//!
//! Typed access to the hosted data backend plus the small amount of client
//! state around it:
//!
//! - [`store`] - Request model, response envelope, REST and in-memory stores
//! - [`table`] - Generic accessors, one per operation shape
//! - [`db`] - Per-entity repositories
//! - [`session`] - Explicit session capability
//! - [`gate`] - Route access decisions
//! - [`tracker`] - Multi-step progress dialog state
//! - [`services`] - Checkout workflow
//!
//! # Errors
//!
//! Every accessor returns `Result<T, DataError>` and logs the failure once.
//! Callers that only want data use `unwrap_or_default()`:
//!
//! ```rust,ignore
//! let cart = CartRepository::new(state.store()).user_cart(user_id).await.unwrap_or_default();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod table;
pub mod tracker;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::{ClientConfig, ConfigError};
pub use error::{BackendError, DataError};
pub use state::ClientState;
