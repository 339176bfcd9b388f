//! Discover Zimbabwe Core - Shared types library.
//!
//! This crate provides common types used across all Discover Zimbabwe components:
//! - `client` - Typed access to the hosted data backend, session, gate and tracker
//! - `cli` - Command-line tool for browsing backend content
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, roles, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
