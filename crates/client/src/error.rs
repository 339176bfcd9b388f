//! Error types for remote store access.
//!
//! Exactly one failure kind comes back from the hosted backend: the error
//! half of an [`Envelope`](crate::store::Envelope), modelled as
//! [`BackendError`]. Repositories wrap it in [`DataError`] together with the
//! local failures that can happen while shaping requests and rows.

use serde::Deserialize;
use thiserror::Error;

/// Error code used when the request never reached the backend.
pub const TRANSPORT_ERROR_CODE: &str = "transport";

/// `PostgREST` code for "JSON object requested, multiple (or no) rows returned".
pub const SINGLE_ROW_ERROR_CODE: &str = "PGRST116";

/// Error half of a response envelope.
///
/// Mirrors the `{code, message, details, hint}` body the hosted backend
/// returns, plus the HTTP status when one was received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{}", display_backend_error(self))]
pub struct BackendError {
    /// HTTP status, absent for transport failures and in-memory stores.
    #[serde(skip)]
    pub status: Option<u16>,
    /// Backend error code (e.g. `PGRST116`, `23505`).
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Additional detail supplied by the backend.
    #[serde(default)]
    pub details: Option<String>,
    /// Hint supplied by the backend.
    #[serde(default)]
    pub hint: Option<String>,
}

impl BackendError {
    /// Create an error with a code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: Some(code.into()),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    /// Create an error for a request that failed before a response arrived.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_ERROR_CODE, message)
    }

    /// Attach the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach backend detail text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn display_backend_error(err: &BackendError) -> String {
    let mut out = String::new();
    if let Some(status) = err.status {
        out.push_str(&format!("HTTP {status} "));
    }
    if let Some(code) = &err.code {
        out.push_str(&format!("[{code}] "));
    }
    if err.message.is_empty() {
        out.push_str("(no message)");
    } else {
        out.push_str(&err.message);
    }
    if let Some(details) = &err.details {
        out.push_str(&format!(" ({details})"));
    }
    out
}

/// Errors returned by accessors and repositories.
#[derive(Debug, Error)]
pub enum DataError {
    /// The remote call failed.
    #[error("remote call failed: {0}")]
    Remote(#[from] BackendError),

    /// A returned row did not match the expected record shape.
    #[error("unexpected row shape from {table}: {source}")]
    Decode {
        /// Table the row came from.
        table: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A request payload could not be serialized.
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DataError {
    /// Backend error code, if the failure came from the remote store.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote(err) => err.code.as_deref(),
            Self::Decode { .. } | Self::Encode(_) => None,
        }
    }
}

/// Result type alias for [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::new("23505", "duplicate key value")
            .with_status(409)
            .with_details("Key (id) already exists.");
        assert_eq!(
            err.to_string(),
            "HTTP 409 [23505] duplicate key value (Key (id) already exists.)"
        );
    }

    #[test]
    fn test_backend_error_display_without_message() {
        let err = BackendError {
            status: None,
            code: None,
            message: String::new(),
            details: None,
            hint: None,
        };
        assert_eq!(err.to_string(), "(no message)");
    }

    #[test]
    fn test_backend_error_parses_postgrest_body() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let err: BackendError = serde_json::from_str(body).expect("parse");
        assert_eq!(err.code.as_deref(), Some(SINGLE_ROW_ERROR_CODE));
        assert_eq!(err.details.as_deref(), Some("The result contains 0 rows"));
        assert!(err.hint.is_none());
    }

    #[test]
    fn test_data_error_code() {
        let err = DataError::from(BackendError::transport("connection refused"));
        assert_eq!(err.code(), Some(TRANSPORT_ERROR_CODE));
        assert_eq!(err.to_string(), "remote call failed: [transport] connection refused");
    }
}
