//! Multi-step workflows built on the repositories.
//!
//! # Services
//!
//! - `checkout` - Turn a user's cart into pending bookings

pub mod checkout;

pub use checkout::{CheckoutError, CheckoutService, CheckoutStep, CheckoutSummary};
