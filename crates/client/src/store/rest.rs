//! HTTP store speaking `PostgREST` conventions.
//!
//! Each [`Request`] maps to one HTTP call against `{backend}/rest/v1/{table}`:
//! reads are `GET`, inserts `POST`, updates `PATCH` and deletes `DELETE`.
//! Filters, ordering and the column list travel as query parameters.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;
use tracing::instrument;
use url::Url;

use super::{Cardinality, Direction, Envelope, FilterOp, Method, RemoteStore, Request};
use crate::config::{BackendConfig, bearer};
use crate::error::{BackendError, SINGLE_ROW_ERROR_CODE};

const OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// Errors raised while building a [`RestStore`].
#[derive(Debug, Error)]
pub enum RestStoreError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid API key header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Remote store backed by the hosted backend's REST interface.
///
/// Cheap to clone; clones share the HTTP connection pool. The bearer token is
/// read from the session's token channel on every request, falling back to
/// the anon key while nobody is signed in.
#[derive(Clone)]
pub struct RestStore {
    inner: Arc<RestStoreInner>,
}

struct RestStoreInner {
    client: reqwest::Client,
    rest_url: Url,
    anon_key: SecretString,
    token: watch::Receiver<Option<SecretString>>,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("rest_url", &self.inner.rest_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestStore {
    /// Create a store for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `RestStoreError` if the HTTP client cannot be built or the
    /// API key is not a valid header value.
    pub fn new(
        config: &BackendConfig,
        token: watch::Receiver<Option<SecretString>>,
    ) -> Result<Self, RestStoreError> {
        let mut api_key = HeaderValue::from_str(config.anon_key.expose_secret())?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestStoreInner {
                client,
                rest_url: config.url.join("rest/v1/")?,
                anon_key: config.anon_key.clone(),
                token,
            }),
        })
    }

    /// Full URL (path and query) a request is sent to.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the table name cannot be joined onto the
    /// base URL.
    pub fn request_url(&self, request: &Request) -> Result<Url, url::ParseError> {
        build_url(&self.inner.rest_url, request)
    }

    fn authorization(&self) -> String {
        // Clone out of the watch guard; it must not be held across an await.
        let token = self.inner.token.borrow().clone();
        token.map_or_else(|| bearer(&self.inner.anon_key), |token| bearer(&token))
    }

    async fn send(&self, request: &Request) -> Result<Value, BackendError> {
        let url = self
            .request_url(request)
            .map_err(|e| BackendError::transport(format!("invalid request URL: {e}")))?;

        let builder = match request.method() {
            Method::Select => self.inner.client.get(url),
            Method::Insert(body) => self.inner.client.post(url).json(body),
            Method::Update(body) => self.inner.client.patch(url).json(body),
            Method::Delete => self.inner.client.delete(url),
        };

        let mut builder = builder.header(AUTHORIZATION, self.authorization());
        if !matches!(request.method(), Method::Select) {
            let prefer = if request.returns_rows() {
                "return=representation"
            } else {
                "return=minimal"
            };
            builder = builder.header("Prefer", prefer);
        }
        if request.cardinality() == Cardinality::Single {
            builder = builder.header(ACCEPT, OBJECT_MEDIA_TYPE);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(
                table = request.table_name(),
                status = status.as_u16(),
                "Backend returned non-success status"
            );
            return Err(parse_error_body(status.as_u16(), &body, retry_after));
        }

        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| {
                BackendError::new("decode", format!("invalid JSON response: {e}"))
                    .with_status(status.as_u16())
            })?
        };

        if request.cardinality() == Cardinality::MaybeSingle {
            return collapse_maybe_single(data);
        }
        Ok(data)
    }
}

impl RemoteStore for RestStore {
    #[instrument(skip(self, request), fields(table = request.table_name(), method = request.method().name()))]
    async fn execute(&self, request: Request) -> Envelope {
        match self.send(&request).await {
            Ok(data) => Envelope::ok(data),
            Err(error) => Envelope::err(error),
        }
    }
}

/// Render a request as a `PostgREST` URL under `rest_url`.
fn build_url(rest_url: &Url, request: &Request) -> Result<Url, url::ParseError> {
    let mut url = rest_url.join(request.table_name())?;
    {
        let mut query = url.query_pairs_mut();

        if request.returns_rows() {
            query.append_pair("select", &select_clause(request));
        }

        for filter in request.filters() {
            let value = match &filter.op {
                FilterOp::Eq(Value::Null) => "is.null".to_string(),
                FilterOp::Eq(Value::String(s)) => format!("eq.{s}"),
                FilterOp::Eq(other) => format!("eq.{other}"),
                FilterOp::ILike(pattern) => format!("ilike.{pattern}"),
                FilterOp::IMatch(pattern) => format!("imatch.{pattern}"),
            };
            query.append_pair(&filter.column, &value);
        }

        if let Some(order) = request.ordering() {
            let direction = match order.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            query.append_pair("order", &format!("{}.{direction}", order.column));
        }
    }

    // Drop the dangling `?` left by an empty query.
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url)
}

fn select_clause(request: &Request) -> String {
    let mut clause = request.columns().to_string();
    for embed in request.embeds() {
        clause.push_str(&format!(
            ",{}:{}!{}({})",
            embed.alias, embed.table, embed.foreign_key, embed.columns
        ));
    }
    clause
}

fn parse_error_body(status: u16, body: &str, retry_after: Option<String>) -> BackendError {
    let mut error = serde_json::from_str::<BackendError>(body).unwrap_or_else(|_| {
        let message: String = body.chars().take(200).collect();
        BackendError {
            status: None,
            code: None,
            message,
            details: None,
            hint: None,
        }
    });
    error.details = error
        .details
        .or_else(|| retry_after.map(|seconds| format!("retry after {seconds}s")));
    error.with_status(status)
}

/// Shape an array response as zero-or-one row.
fn collapse_maybe_single(data: Value) -> Result<Value, BackendError> {
    match data {
        Value::Array(mut rows) => match rows.len() {
            0 => Ok(Value::Null),
            1 => Ok(rows.pop().unwrap_or(Value::Null)),
            n => Err(BackendError::new(
                SINGLE_ROW_ERROR_CODE,
                "JSON object requested, multiple (or no) rows returned",
            )
            .with_status(406)
            .with_details(format!("The result contains {n} rows"))),
        },
        other => Ok(other),
    }
}
