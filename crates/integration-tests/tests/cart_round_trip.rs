//! Integration tests for the cart lifecycle.

use discover_zimbabwe_client::db::CartRepository;
use discover_zimbabwe_client::models::NewCartItem;
use discover_zimbabwe_client::store::MemoryStore;
use discover_zimbabwe_core::{DestinationId, UserId};
use discover_zimbabwe_integration_tests::destination;

#[tokio::test]
async fn test_add_then_read_then_remove() {
    let store = MemoryStore::new();
    let destination_id = DestinationId::generate();
    store
        .seed(
            "destinations",
            [destination(destination_id, "Hwange National Park", "Hwange", "30.00")],
        )
        .await;
    let cart = CartRepository::new(&store);
    let user = UserId::generate();

    let added = cart
        .add(&NewCartItem::destination(user, destination_id, 2))
        .await
        .expect("add to cart");

    let items = cart.user_cart(user).await.expect("read cart");
    assert_eq!(items.len(), 1);
    let item = items.first().expect("one item");
    assert_eq!(item.id, added.id);
    assert_eq!(item.destination_id, Some(destination_id));
    assert_eq!(item.quantity, Some(2));
    assert_eq!(item.title(), "Hwange National Park");

    let removed = cart.remove(added.id).await.expect("remove");
    assert_eq!(removed.map(|i| i.id), Some(added.id));
    let items = cart.user_cart(user).await.expect("read cart");
    assert!(items.iter().all(|i| i.id != added.id));

    let again = cart.remove(added.id).await.expect("remove again");
    assert!(again.is_none());
}

#[tokio::test]
async fn test_cart_newest_first() {
    let store = MemoryStore::new();
    let cart = CartRepository::new(&store);
    let user = UserId::generate();

    let first = cart
        .add(&NewCartItem::destination(user, DestinationId::generate(), 1))
        .await
        .expect("add");
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = cart
        .add(&NewCartItem::destination(user, DestinationId::generate(), 1))
        .await
        .expect("add");

    let ids: Vec<_> = cart
        .user_cart(user)
        .await
        .expect("read cart")
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, [second.id, first.id]);
}
