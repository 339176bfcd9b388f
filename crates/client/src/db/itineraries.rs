//! Itinerary operations.

use tracing::instrument;

use discover_zimbabwe_core::{ItineraryId, ItineraryItemId, UserId};

use crate::error::Result;
use crate::models::{Itinerary, ItineraryInput, ItineraryItem, NewItineraryItem};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for itineraries and their items.
pub struct ItineraryRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> ItineraryRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn itineraries(&self) -> Table<'a, S> {
        Table::of::<Itinerary>(self.store)
    }

    const fn items_table(&self) -> Table<'a, S> {
        Table::of::<ItineraryItem>(self.store)
    }

    /// A user's itineraries, earliest trip first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Itinerary>> {
        self.itineraries()
            .list(
                Some(Filter::eq("user_id", user_id)),
                Some(("start_date", Direction::Ascending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn by_id(&self, id: ItineraryId) -> Result<Option<Itinerary>> {
        self.itineraries().find_by("id", id).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ItineraryInput) -> Result<Itinerary> {
        self.itineraries().insert(input).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ItineraryId, input: &ItineraryInput) -> Result<Option<Itinerary>> {
        self.itineraries().update_one("id", id, input).await
    }

    /// Delete an itinerary and return it. Its items are removed by the backend.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItineraryId) -> Result<Option<Itinerary>> {
        self.itineraries().delete_one("id", id).await
    }

    /// Items of an itinerary, by day.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn items(&self, itinerary_id: ItineraryId) -> Result<Vec<ItineraryItem>> {
        self.items_table()
            .list(
                Some(Filter::eq("itinerary_id", itinerary_id)),
                Some(("day_number", Direction::Ascending)),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, item))]
    pub async fn add_item(&self, item: &NewItineraryItem) -> Result<ItineraryItem> {
        self.items_table().insert(item).await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: ItineraryItemId) -> Result<Option<ItineraryItem>> {
        self.items_table().delete_one("id", id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use discover_zimbabwe_core::DestinationId;

    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_items_ordered_by_day() {
        let store = MemoryStore::new();
        let repo = ItineraryRepository::new(&store);
        let itinerary = repo
            .create(&ItineraryInput {
                user_id: Some(UserId::generate()),
                title: Some("Falls and Hwange".to_string()),
                start_date: NaiveDate::from_ymd_opt(2026, 8, 1),
                ..ItineraryInput::default()
            })
            .await
            .unwrap();

        for day in [3, 1, 2] {
            repo.add_item(&NewItineraryItem {
                itinerary_id: itinerary.id,
                destination_id: Some(DestinationId::generate()),
                event_id: None,
                accommodation_id: None,
                day_number: day,
                notes: None,
            })
            .await
            .unwrap();
        }

        let days: Vec<_> = repo
            .items(itinerary.id)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|item| item.day_number)
            .collect();
        assert_eq!(days, [1, 2, 3]);

        let items = repo.items(itinerary.id).await.unwrap();
        let second = items.get(1).unwrap();
        let removed = repo.remove_item(second.id).await.unwrap().unwrap();
        assert_eq!(removed.day_number, Some(2));
        assert!(repo.remove_item(second.id).await.unwrap().is_none());
        assert_eq!(repo.items(itinerary.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let repo = ItineraryRepository::new(&store);
        let itinerary = repo
            .create(&ItineraryInput {
                user_id: Some(UserId::generate()),
                title: Some("Draft".to_string()),
                ..ItineraryInput::default()
            })
            .await
            .unwrap();

        let renamed = repo
            .update(
                itinerary.id,
                &ItineraryInput {
                    title: Some("Lake Kariba weekend".to_string()),
                    ..ItineraryInput::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.title.as_deref(), Some("Lake Kariba weekend"));

        let deleted = repo.delete(itinerary.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, itinerary.id);
        assert!(repo.by_id(itinerary.id).await.unwrap().is_none());
        assert!(repo.delete(itinerary.id).await.unwrap().is_none());
    }
}
