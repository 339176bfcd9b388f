//! Integration tests for failed remote calls.
//!
//! Every accessor returns the failure as `Err`, logs exactly one error
//! diagnostic, and falls back to an empty value with `unwrap_or_default`.

use discover_zimbabwe_client::BackendError;
use discover_zimbabwe_client::db::{
    AccommodationRepository, CartRepository, ChatRepository, DestinationRepository,
    EventRepository, LocationRepository, NotificationRepository, RoleRepository,
};
use discover_zimbabwe_client::models::NewCartItem;
use discover_zimbabwe_client::store::MemoryStore;
use discover_zimbabwe_core::{
    AccommodationId, CartItemId, ConversationId, DestinationId, EventId, MessageRole,
    NotificationId, UserId,
};
use discover_zimbabwe_integration_tests::{ErrorCount, catalogue, count_errors};

async fn failing_store() -> MemoryStore {
    let store = catalogue().await;
    store
        .fail_all(BackendError::new("PGRST301", "JWT expired").with_status(401))
        .await;
    store
}

fn assert_one_more(errors: &ErrorCount, before: &mut usize) {
    *before += 1;
    assert_eq!(errors.get(), *before);
}

#[tokio::test]
async fn test_listing_functions_fall_back_to_empty() {
    let (_guard, errors) = count_errors();
    let store = failing_store().await;
    let user = UserId::generate();
    let mut seen = 0;

    assert!(AccommodationRepository::new(&store).list().await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert!(DestinationRepository::new(&store).search("ruins").await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert!(EventRepository::new(&store).featured().await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert!(CartRepository::new(&store).user_cart(user).await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert!(ChatRepository::new(&store).messages(ConversationId::generate()).await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert!(NotificationRepository::new(&store).for_user(user).await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert!(LocationRepository::new(&store).all_cities_with_content().await.unwrap_or_default().is_empty());
    assert_one_more(&errors, &mut seen);
    assert_eq!(NotificationRepository::new(&store).unread_count(user).await.unwrap_or_default(), 0);
    assert_one_more(&errors, &mut seen);
}

#[tokio::test]
async fn test_single_item_functions_fall_back_to_none_or_false() {
    let (_guard, errors) = count_errors();
    let store = failing_store().await;
    let user = UserId::generate();
    let mut seen = 0;

    assert!(AccommodationRepository::new(&store).by_id(AccommodationId::generate()).await.unwrap_or_default().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(EventRepository::new(&store).by_id(EventId::generate()).await.unwrap_or_default().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(CartRepository::new(&store).add(&NewCartItem::destination(user, DestinationId::generate(), 1)).await.ok().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(CartRepository::new(&store).update_quantity(CartItemId::generate(), 3).await.unwrap_or_default().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(CartRepository::new(&store).remove(CartItemId::generate()).await.is_err());
    assert_one_more(&errors, &mut seen);
    assert!(CartRepository::new(&store).clear(user).await.is_err());
    assert_one_more(&errors, &mut seen);
    assert!(ChatRepository::new(&store).add_message(ConversationId::generate(), &MessageRole::user(), "hi").await.ok().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(ChatRepository::new(&store).get_or_create_conversation(user).await.ok().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(NotificationRepository::new(&store).mark_as_read(NotificationId::generate()).await.unwrap_or_default().is_none());
    assert_one_more(&errors, &mut seen);
    assert!(!RoleRepository::new(&store).is_admin(user).await.unwrap_or_default());
    assert_one_more(&errors, &mut seen);
}

#[tokio::test]
async fn test_error_carries_backend_detail() {
    let (_guard, _errors) = count_errors();
    let store = failing_store().await;

    let err = DestinationRepository::new(&store)
        .list()
        .await
        .expect_err("store is failing");
    assert_eq!(err.code(), Some("PGRST301"));
    assert!(err.to_string().contains("HTTP 401"));
}

#[tokio::test]
async fn test_empty_and_failed_are_distinguishable() {
    let (_guard, errors) = count_errors();
    let store = MemoryStore::new();
    let repo = DestinationRepository::new(&store);

    assert!(repo.list().await.expect("empty table").is_empty());
    assert_eq!(errors.get(), 0);

    store.fail_table("destinations", BackendError::transport("timeout")).await;
    assert!(repo.list().await.is_err());
    assert_eq!(errors.get(), 1);
}
