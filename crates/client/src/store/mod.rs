//! Remote data store boundary.
//!
//! # Architecture
//!
//! - The hosted backend is the source of truth - no local sync, no caching
//! - Every call is one [`Request`] answered by one [`Envelope`]
//! - [`RestStore`] talks to the hosted backend over HTTP (`PostgREST` conventions)
//! - [`MemoryStore`] answers the same requests in-process for tests and demos
//!
//! # Example
//!
//! ```rust,ignore
//! use discover_zimbabwe_client::store::{Direction, RemoteStore, Request, RestStore};
//!
//! let store = RestStore::new(&config.backend, session.token_receiver())?;
//! let envelope = store
//!     .execute(Request::table("events").order("event_date", Direction::Ascending))
//!     .await;
//! ```

mod memory;
mod request;
mod rest;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BackendError;

pub use memory::MemoryStore;
pub use request::{Cardinality, Direction, Embed, Filter, FilterOp, Method, Order, Request};
pub use rest::{RestStore, RestStoreError};

/// Response of one remote call: a data payload or an error, never both
/// meaningfully populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Returned rows (array), row (object) or `null`.
    pub data: Option<Value>,
    /// Error indicator.
    pub error: Option<BackendError>,
}

impl Envelope {
    /// Successful envelope.
    #[must_use]
    pub const fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope.
    #[must_use]
    pub const fn err(error: BackendError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Split into the payload or the error. An error wins over any data.
    ///
    /// # Errors
    ///
    /// Returns the envelope's `BackendError` if one is set.
    pub fn into_result(self) -> Result<Value, BackendError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

/// A query-builder-style remote collection store.
///
/// Implementations are responsible only for transporting the request and
/// shaping the envelope; schema enforcement, access policy and durability
/// belong to the backend.
pub trait RemoteStore: Send + Sync {
    /// Execute one request.
    fn execute(&self, request: Request) -> impl Future<Output = Envelope> + Send;
}

impl<S: RemoteStore> RemoteStore for Arc<S> {
    fn execute(&self, request: Request) -> impl Future<Output = Envelope> + Send {
        (**self).execute(request)
    }
}

impl<S: RemoteStore> RemoteStore for &S {
    fn execute(&self, request: Request) -> impl Future<Output = Envelope> + Send {
        (**self).execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_error_wins() {
        let envelope = Envelope {
            data: Some(Value::Array(vec![])),
            error: Some(BackendError::transport("timeout")),
        };
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn test_envelope_missing_data_is_null() {
        let envelope = Envelope {
            data: None,
            error: None,
        };
        assert_eq!(envelope.into_result(), Ok(Value::Null));
    }
}
