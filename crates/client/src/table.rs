//! Generic accessors over one remote collection.
//!
//! Every per-entity repository function is expressed through [`Table`], which
//! provides one parametrized accessor per operation shape:
//!
//! | Shape            | Method                                 |
//! |------------------|----------------------------------------|
//! | Filtered list    | [`Table::list`], [`Table::fetch_all`]  |
//! | Single by column | [`Table::find_by`], [`Table::fetch_optional`] |
//! | Insert-returning | [`Table::insert`]                      |
//! | Update-returning | [`Table::update_one`], [`Table::update_many`] |
//! | Delete-returning | [`Table::delete_one`], [`Table::delete_where`] |
//!
//! Each accessor issues exactly one request, logs a failure once with
//! `tracing::error!`, and returns it as [`DataError`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DataError, Result};
use crate::store::{Direction, Filter, RemoteStore, Request};

/// A typed row stored in a named collection.
pub trait Record: DeserializeOwned {
    /// Collection name on the backend.
    const TABLE: &'static str;
}

/// Accessor bound to one collection of a store.
#[derive(Debug)]
pub struct Table<'a, S> {
    store: &'a S,
    name: &'static str,
}

impl<S> Clone for Table<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Table<'_, S> {}

impl<'a, S: RemoteStore> Table<'a, S> {
    /// Bind to `name`.
    #[must_use]
    pub const fn new(store: &'a S, name: &'static str) -> Self {
        Self { store, name }
    }

    /// Bind to the collection holding `R`.
    #[must_use]
    pub const fn of<R: Record>(store: &'a S) -> Self {
        Self::new(store, R::TABLE)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Start a request against this collection.
    #[must_use]
    pub fn request(&self) -> Request {
        Request::table(self.name)
    }

    /// List rows matching an optional filter, in an optional order.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails or a row does not decode.
    pub async fn list<T: DeserializeOwned>(
        &self,
        filter: Option<Filter>,
        order: Option<(&str, Direction)>,
    ) -> Result<Vec<T>> {
        let mut request = self.request();
        if let Some(filter) = filter {
            request = request.filter(filter);
        }
        if let Some((column, direction)) = order {
            request = request.order(column, direction);
        }
        self.fetch_all(request).await
    }

    /// Execute a prepared list request.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails or a row does not decode.
    pub async fn fetch_all<T: DeserializeOwned>(&self, request: Request) -> Result<Vec<T>> {
        let op = request.method().name();
        match self.run(request).await? {
            Value::Null => Ok(Vec::new()),
            data => self.decode(op, data),
        }
    }

    /// The row whose `column` equals `value`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails, more than one row matches, or
    /// the row does not decode.
    pub async fn find_by<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Option<T>> {
        self.fetch_optional(self.request().eq(column, value)).await
    }

    /// Execute a prepared request expecting zero or one row.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails, more than one row matches, or
    /// the row does not decode.
    pub async fn fetch_optional<T: DeserializeOwned>(&self, request: Request) -> Result<Option<T>> {
        let op = request.method().name();
        match self.run(request.maybe_single()).await? {
            Value::Null => Ok(None),
            data => self.decode(op, data).map(Some),
        }
    }

    /// Insert one row and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the payload does not encode, the call fails, or
    /// the returned row does not decode.
    pub async fn insert<T: DeserializeOwned>(&self, row: &impl Serialize) -> Result<T> {
        let body = self.encode(row)?;
        let data = self
            .run(self.request().insert(body).select("*").single())
            .await?;
        self.decode("insert", data)
    }

    /// Patch the row whose `column` equals `value` and return it, or `None`
    /// when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the payload does not encode, the call fails, or
    /// the returned row does not decode.
    pub async fn update_one<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
        patch: &impl Serialize,
    ) -> Result<Option<T>> {
        let body = self.encode(patch)?;
        let request = self
            .request()
            .update(body)
            .eq(column, value)
            .select("*")
            .maybe_single();
        match self.run(request).await? {
            Value::Null => Ok(None),
            data => self.decode("update", data).map(Some),
        }
    }

    /// Patch every row whose `column` equals `value` and return them.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the payload does not encode, the call fails, or
    /// a returned row does not decode.
    pub async fn update_many<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
        patch: &impl Serialize,
    ) -> Result<Vec<T>> {
        let body = self.encode(patch)?;
        let request = self.request().update(body).eq(column, value).select("*");
        match self.run(request).await? {
            Value::Null => Ok(Vec::new()),
            data => self.decode("update", data),
        }
    }

    /// Delete every row whose `column` equals `value` and return them.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails or a removed row does not decode.
    pub async fn delete_where<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<T>> {
        let request = self.request().delete().eq(column, value).select("*");
        match self.run(request).await? {
            Value::Null => Ok(Vec::new()),
            data => self.decode("delete", data),
        }
    }

    /// Delete the row whose `column` equals `value` and return it, or `None`
    /// when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails, more than one row matches, or
    /// the removed row does not decode.
    pub async fn delete_one<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Option<T>> {
        let request = self
            .request()
            .delete()
            .eq(column, value)
            .select("*")
            .maybe_single();
        match self.run(request).await? {
            Value::Null => Ok(None),
            data => self.decode("delete", data).map(Some),
        }
    }

    async fn run(&self, request: Request) -> Result<Value> {
        let op = request.method().name();
        tracing::debug!(table = self.name, op, "Executing remote request");

        self.store.execute(request).await.into_result().map_err(|error| {
            tracing::error!(
                table = self.name,
                op,
                code = error.code.as_deref().unwrap_or_default(),
                error = %error,
                "Remote call failed"
            );
            DataError::Remote(error)
        })
    }

    fn decode<T: DeserializeOwned>(&self, op: &str, data: Value) -> Result<T> {
        serde_json::from_value(data).map_err(|source| {
            tracing::error!(table = self.name, op, error = %source, "Unexpected row shape");
            DataError::Decode {
                table: self.name.to_string(),
                source,
            }
        })
    }

    fn encode(&self, payload: &impl Serialize) -> Result<Value> {
        serde_json::to_value(payload).map_err(|source| {
            tracing::error!(table = self.name, error = %source, "Failed to encode payload");
            DataError::Encode(source)
        })
    }
}
