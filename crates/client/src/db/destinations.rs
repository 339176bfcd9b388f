//! Destination listings.

use tracing::instrument;

use discover_zimbabwe_core::DestinationId;

use crate::error::Result;
use crate::models::{Destination, DestinationInput};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for destination operations.
pub struct DestinationRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> DestinationRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn table(&self) -> Table<'a, S> {
        Table::of::<Destination>(self.store)
    }

    /// All destinations, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Destination>> {
        self.table()
            .list(None, Some(("name", Direction::Ascending)))
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Destination>> {
        self.table()
            .list(
                Some(Filter::eq("is_featured", true)),
                Some(("rating", Direction::Descending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn by_id(&self, id: DestinationId) -> Result<Option<Destination>> {
        self.table().find_by("id", id).await
    }

    /// Destinations whose name contains `query`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Destination>> {
        self.table()
            .list(
                Some(Filter::contains("name", query)),
                Some(("name", Direction::Ascending)),
            )
            .await
    }

    /// Destinations whose location contains `location`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn by_location(&self, location: &str) -> Result<Vec<Destination>> {
        self.table()
            .list(
                Some(Filter::contains("location", location)),
                Some(("name", Direction::Ascending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &DestinationInput) -> Result<Destination> {
        self.table().insert(input).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: DestinationId,
        input: &DestinationInput,
    ) -> Result<Option<Destination>> {
        self.table().update_one("id", id, input).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: DestinationId) -> Result<Option<Destination>> {
        self.table().delete_one("id", id).await
    }
}
