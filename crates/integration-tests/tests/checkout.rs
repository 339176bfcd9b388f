//! Integration tests for the checkout workflow.

use std::time::Duration;

use rust_decimal::Decimal;
use discover_zimbabwe_client::BackendError;
use discover_zimbabwe_client::config::ProgressConfig;
use discover_zimbabwe_client::db::{BookingRepository, CartRepository, NotificationRepository};
use discover_zimbabwe_client::models::NewCartItem;
use discover_zimbabwe_client::services::{CheckoutError, CheckoutService};
use discover_zimbabwe_client::store::MemoryStore;
use discover_zimbabwe_client::tracker::ProcessTracker;
use discover_zimbabwe_core::{BookingStatus, DestinationId, EventId, UserId};
use discover_zimbabwe_integration_tests::{destination, event};

struct Fixture {
    store: MemoryStore,
    user: UserId,
}

async fn fixture() -> Fixture {
    let store = MemoryStore::new();
    let ruins = DestinationId::generate();
    let festival = EventId::generate();
    store
        .seed("destinations", [destination(ruins, "Khami Ruins", "Bulawayo", "12.50")])
        .await;
    store
        .seed("events", [event(festival, "Bulawayo Music Festival", "Bulawayo", "18.00")])
        .await;

    let user = UserId::generate();
    let cart = CartRepository::new(&store);
    cart.add(&NewCartItem::destination(user, ruins, 2))
        .await
        .expect("add destination");
    cart.add(&NewCartItem::event(user, festival, 1))
        .await
        .expect("add event");

    Fixture { store, user }
}

fn tracker() -> ProcessTracker {
    ProcessTracker::new(ProgressConfig {
        auto_hide: Duration::from_secs(1),
    })
}

#[tokio::test(start_paused = true)]
async fn test_checkout_books_clears_and_notifies() {
    let Fixture { store, user } = fixture().await;
    let tracker = tracker();

    let summary = CheckoutService::new(&store, &tracker)
        .checkout(user)
        .await
        .expect("checkout");

    assert_eq!(summary.bookings.len(), 2);
    assert_eq!(summary.total.amount, Decimal::new(4300, 2));
    assert!(
        summary
            .bookings
            .iter()
            .all(|b| b.status == BookingStatus::Pending)
    );

    let stored = BookingRepository::new(&store).for_user(user).await.expect("bookings");
    assert_eq!(stored.len(), 2);
    assert!(CartRepository::new(&store).user_cart(user).await.expect("cart").is_empty());

    let notifications = NotificationRepository::new(&store)
        .for_user(user)
        .await
        .expect("notifications");
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        NotificationRepository::new(&store).unread_count(user).await.expect("count"),
        1
    );

    let state = tracker.snapshot();
    assert!(state.is_open);
    assert_eq!(state.current_label(), Some("Sending confirmation"));

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(!tracker.snapshot().is_open);
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let store = MemoryStore::new();
    let tracker = tracker();

    let result = CheckoutService::new(&store, &tracker)
        .checkout(UserId::generate())
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(!tracker.snapshot().is_open);
}

#[tokio::test]
async fn test_failed_booking_keeps_cart() {
    let Fixture { store, user } = fixture().await;
    store
        .fail_table("bookings", BackendError::new("23514", "check constraint violated"))
        .await;
    let tracker = tracker();

    let result = CheckoutService::new(&store, &tracker).checkout(user).await;

    assert!(matches!(result, Err(CheckoutError::Data(_))));
    assert_eq!(CartRepository::new(&store).user_cart(user).await.expect("cart").len(), 2);
    assert!(store.rows("notifications").await.is_empty());
    assert!(!tracker.snapshot().is_open);
    assert!(store.rows("bookings").await.is_empty());
}
