//! Shopping cart operations.

use chrono::NaiveDate;
use serde_json::json;
use tracing::instrument;

use discover_zimbabwe_core::{CartItemId, UserId};

use crate::error::Result;
use crate::models::{CartItem, Destination, Event, NewCartItem};
use crate::store::{Direction, Embed, RemoteStore};
use crate::table::{Record, Table};

/// Repository for cart operations.
pub struct CartRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn table(&self) -> Table<'a, S> {
        Table::of::<CartItem>(self.store)
    }

    /// A user's cart, newest first, with the referenced destination and
    /// event embedded.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn user_cart(&self, user_id: UserId) -> Result<Vec<CartItem>> {
        let table = self.table();
        let request = table
            .request()
            .embed(Embed::one("destination", Destination::TABLE, "destination_id"))
            .embed(Embed::one("event", Event::TABLE, "event_id"))
            .eq("user_id", user_id)
            .order("created_at", Direction::Descending);
        table.fetch_all(request).await
    }

    /// Add an item and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, item))]
    pub async fn add(&self, item: &NewCartItem) -> Result<CartItem> {
        self.table().insert(item).await
    }

    /// Set an item's quantity; `None` when the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: CartItemId, quantity: u32) -> Result<Option<CartItem>> {
        self.table()
            .update_one("id", id, &json!({ "quantity": quantity }))
            .await
    }

    /// Set or clear an item's preferred date.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn update_preferred_date(
        &self,
        id: CartItemId,
        date: Option<NaiveDate>,
    ) -> Result<Option<CartItem>> {
        self.table()
            .update_one("id", id, &json!({ "preferred_date": date }))
            .await
    }

    /// Remove one item, returning it without embeds, or `None` if it was
    /// already gone.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: CartItemId) -> Result<Option<CartItem>> {
        self.table().delete_one("id", id).await
    }

    /// Remove every item in a user's cart and return what was removed.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<Vec<CartItem>> {
        self.table().delete_where("user_id", user_id).await
    }
}
