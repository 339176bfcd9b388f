//! Notification operations.

use serde::de::IgnoredAny;
use tracing::instrument;

use discover_zimbabwe_core::{NotificationId, UserId};

use crate::error::Result;
use crate::models::notification::ReadPatch;
use crate::models::{NewNotification, Notification};
use crate::store::{Direction, Filter, RemoteStore};
use crate::table::Table;

/// Repository for notification operations.
pub struct NotificationRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> NotificationRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    const fn table(&self) -> Table<'a, S> {
        Table::of::<Notification>(self.store)
    }

    /// A user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Notification>> {
        self.table()
            .list(
                Some(Filter::eq("user_id", user_id)),
                Some(("created_at", Direction::Descending)),
            )
            .await
    }

    /// Number of unread notifications.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: UserId) -> Result<usize> {
        let table = self.table();
        let request = table
            .request()
            .select("id")
            .eq("user_id", user_id)
            .eq("is_read", false);
        let rows: Vec<IgnoredAny> = table.fetch_all(request).await?;
        Ok(rows.len())
    }

    /// Mark one notification as read; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn mark_as_read(&self, id: NotificationId) -> Result<Option<Notification>> {
        self.table()
            .update_one("id", id, &ReadPatch { is_read: true })
            .await
    }

    /// Mark every notification of a user as read and return them.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self))]
    pub async fn mark_all_as_read(&self, user_id: UserId) -> Result<Vec<Notification>> {
        self.table()
            .update_many("user_id", user_id, &ReadPatch { is_read: true })
            .await
    }

    /// # Errors
    ///
    /// Returns `DataError` if the call fails.
    #[instrument(skip(self, notification))]
    pub async fn create(&self, notification: &NewNotification) -> Result<Notification> {
        self.table().insert(notification).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_unread_count_and_mark_as_read() {
        let store = MemoryStore::new();
        let repo = NotificationRepository::new(&store);
        let user = UserId::generate();

        let first = repo
            .create(&NewNotification::new(user, "Booking confirmed").with_type("booking"))
            .await
            .unwrap();
        repo.create(&NewNotification::new(user, "Rainy season deals"))
            .await
            .unwrap();
        repo.create(&NewNotification::new(UserId::generate(), "Someone else"))
            .await
            .unwrap();
        assert!(!first.is_read);
        assert_eq!(first.notification_type.as_deref(), Some("booking"));
        assert_eq!(repo.unread_count(user).await.unwrap(), 2);

        let read = repo.mark_as_read(first.id).await.unwrap().unwrap();
        assert!(read.is_read);
        assert_eq!(repo.unread_count(user).await.unwrap(), 1);

        let all = repo.mark_all_as_read(user).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(repo.unread_count(user).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_for_user_newest_first() {
        let store = MemoryStore::new();
        let user = UserId::generate();
        store
            .seed(
                "notifications",
                [
                    serde_json::json!({"id": NotificationId::generate(), "user_id": user, "title": "older", "created_at": "2026-01-01T08:00:00Z"}),
                    serde_json::json!({"id": NotificationId::generate(), "user_id": user, "title": "newer", "created_at": "2026-02-01T08:00:00Z"}),
                ],
            )
            .await;
        let repo = NotificationRepository::new(&store);

        let titles: Vec<_> = repo
            .for_user(user)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|n| n.title)
            .collect();
        assert_eq!(titles, ["newer", "older"]);
    }
}
