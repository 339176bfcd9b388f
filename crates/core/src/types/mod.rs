//! Core types for Discover Zimbabwe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use role::{MessageRole, RoleName};
pub use status::*;
