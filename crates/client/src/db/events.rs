//! Event listings.

use tracing::instrument;

use discover_zimbabwe_core::EventId;

use crate::error::Result;
use crate::models::{Event, EventInput};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for event operations.
pub struct EventRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> EventRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn table(&self) -> Table<'a, S> {
        Table::of::<Event>(self.store)
    }

    /// All events, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.table()
            .list(None, Some(("event_date", Direction::Ascending)))
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Event>> {
        self.table()
            .list(
                Some(Filter::eq("is_featured", true)),
                Some(("event_date", Direction::Ascending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn by_id(&self, id: EventId) -> Result<Option<Event>> {
        self.table().find_by("id", id).await
    }

    /// Events whose title contains `query`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Event>> {
        self.table()
            .list(
                Some(Filter::contains("title", query)),
                Some(("event_date", Direction::Ascending)),
            )
            .await
    }

    /// Events whose location contains `location`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn by_location(&self, location: &str) -> Result<Vec<Event>> {
        self.table()
            .list(
                Some(Filter::contains("location", location)),
                Some(("event_date", Direction::Ascending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &EventInput) -> Result<Event> {
        self.table().insert(input).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: EventId, input: &EventInput) -> Result<Option<Event>> {
        self.table().update_one("id", id, input).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EventId) -> Result<Option<Event>> {
        self.table().delete_one("id", id).await
    }
}
