//! Accommodation listings.

use tracing::instrument;

use discover_zimbabwe_core::AccommodationId;

use crate::error::Result;
use crate::models::{Accommodation, AccommodationInput};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for accommodation operations.
pub struct AccommodationRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> AccommodationRepository<'a, S> {
    /// Create a new accommodation repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn table(&self) -> Table<'a, S> {
        Table::of::<Accommodation>(self.store)
    }

    /// All accommodations, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Accommodation>> {
        self.table()
            .list(None, Some(("created_at", Direction::Descending)))
            .await
    }

    /// Featured accommodations, best rated first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Accommodation>> {
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
    pub async fn by_id(&self, id: AccommodationId) -> Result<Option<Accommodation>> {
        self.table().find_by("id", id).await
    }

    /// Accommodations whose name contains `query` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Accommodation>> {
        self.table()
            .list(
                Some(Filter::contains("name", query)),
                Some(("name", Direction::Ascending)),
            )
            .await
    }

    /// Accommodations whose location contains `location` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn by_location(&self, location: &str) -> Result<Vec<Accommodation>> {
        self.table()
            .list(
                Some(Filter::contains("location", location)),
                Some(("rating", Direction::Descending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &AccommodationInput) -> Result<Accommodation> {
        self.table().insert(input).await
    }

    /// Patch an accommodation; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: AccommodationId,
        input: &AccommodationInput,
    ) -> Result<Option<Accommodation>> {
        self.table().update_one("id", id, input).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AccommodationId) -> Result<Option<Accommodation>> {
        self.table().delete_one("id", id).await
    }
}
