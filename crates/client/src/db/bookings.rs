//! Booking operations.

use tracing::instrument;

use discover_zimbabwe_core::{BookingId, BookingStatus, UserId};

use crate::error::Result;
use crate::models::booking::StatusPatch;
use crate::models::{Booking, NewBooking};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for booking operations.
pub struct BookingRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> BookingRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn table(&self) -> Table<'a, S> {
        Table::of::<Booking>(self.store)
    }

    /// A user's bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        self.table()
            .list(
                Some(Filter::eq("user_id", user_id)),
                Some(("created_at", Direction::Descending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, booking))]
    pub async fn create(&self, booking: &NewBooking) -> Result<Booking> {
        self.table().insert(booking).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        self.table()
            .update_one("id", id, &StatusPatch { status })
            .await
    }
}
