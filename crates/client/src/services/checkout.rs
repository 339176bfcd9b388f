//! Checkout service.
//!
//! This service handles the complete flow of:
//! 1. Reading the user's cart
//! 2. Creating one pending booking per cart item
//! 3. Clearing the cart
//! 4. Writing a confirmation notification
//!
//! Progress is reported through a [`ProcessTracker`]. Steps run in order and
//! stop at the first failure; bookings already created are not rolled back.

use tracing::{info, instrument};

use discover_zimbabwe_core::{BookingStatus, CartItemId, CurrencyCode, Price, UserId};

use crate::db::{BookingRepository, CartRepository, NotificationRepository};
use crate::error::DataError;
use crate::models::{Booking, CartItem, NewBooking, NewNotification, Notification};
use crate::store::RemoteStore;
use crate::tracker::{ProcessSteps, ProcessTracker};

/// Errors that can occur during checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// A line or the order total does not fit in a decimal amount.
    #[error("price of cart item {item} is out of range")]
    PriceOverflow { item: CartItemId },

    /// A backend call failed.
    #[error("checkout failed: {0}")]
    Data(#[from] DataError),
}

/// Checkout workflow steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    ReviewingCart,
    CreatingBookings,
    ClearingCart,
    SendingConfirmation,
}

impl ProcessSteps for CheckoutStep {
    const TITLE: &'static str = "Processing your booking";
    const ALL: &'static [Self] = &[
        Self::ReviewingCart,
        Self::CreatingBookings,
        Self::ClearingCart,
        Self::SendingConfirmation,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ReviewingCart => "Reviewing cart",
            Self::CreatingBookings => "Creating bookings",
            Self::ClearingCart => "Clearing cart",
            Self::SendingConfirmation => "Sending confirmation",
        }
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub bookings: Vec<Booking>,
    pub total: Price,
    pub notification: Notification,
}

/// Service for checking out a cart.
pub struct CheckoutService<'a, S> {
    store: &'a S,
    tracker: &'a ProcessTracker,
    currency: CurrencyCode,
}

impl<'a, S: RemoteStore> CheckoutService<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S, tracker: &'a ProcessTracker) -> Self {
        Self {
            store,
            tracker,
            currency: CurrencyCode::USD,
        }
    }

    #[must_use]
    pub const fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Check out the user's cart.
    ///
    /// The tracker completes on success and closes on any failure.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no items, or
    /// `CheckoutError::Data` if a backend call fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn checkout(&self, user_id: UserId) -> Result<CheckoutSummary, CheckoutError> {
        self.tracker
            .start_process::<CheckoutStep>(Some("Please keep this window open."));

        match self.run(user_id).await {
            Ok(summary) => {
                self.tracker.complete();
                info!(
                    bookings = summary.bookings.len(),
                    total = %summary.total,
                    "Checkout completed"
                );
                Ok(summary)
            }
            Err(e) => {
                self.tracker.close();
                Err(e)
            }
        }
    }

    async fn run(&self, user_id: UserId) -> Result<CheckoutSummary, CheckoutError> {
        self.tracker.advance_to(CheckoutStep::ReviewingCart);
        let cart = CartRepository::new(self.store).user_cart(user_id).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Price everything before the first write.
        let mut pending = Vec::with_capacity(cart.len());
        let mut total = Price::zero(self.currency);
        for item in &cart {
            let overflow = || CheckoutError::PriceOverflow { item: item.id };
            let line = item.line_total(self.currency).ok_or_else(overflow)?;
            total = total.checked_add(line).ok_or_else(overflow)?;
            pending.push(Self::booking_for(user_id, item, line));
        }

        self.tracker.advance_to(CheckoutStep::CreatingBookings);
        let bookings_repo = BookingRepository::new(self.store);
        let mut bookings = Vec::with_capacity(pending.len());
        for booking in &pending {
            bookings.push(bookings_repo.create(booking).await?);
        }

        self.tracker.advance_to(CheckoutStep::ClearingCart);
        CartRepository::new(self.store).clear(user_id).await?;

        self.tracker.advance_to(CheckoutStep::SendingConfirmation);
        let notification = NotificationRepository::new(self.store)
            .create(
                &NewNotification::new(user_id, "Booking received")
                    .with_description(confirmation_text(bookings.len(), total))
                    .with_type("booking"),
            )
            .await?;

        Ok(CheckoutSummary {
            bookings,
            total,
            notification,
        })
    }

    fn booking_for(user_id: UserId, item: &CartItem, line: Price) -> NewBooking {
        NewBooking {
            user_id,
            destination_id: item.destination_id,
            event_id: item.event_id,
            quantity: item.quantity_or_one(),
            booking_date: item.preferred_date,
            total_price: line.amount,
            status: BookingStatus::Pending,
        }
    }
}

fn confirmation_text(count: usize, total: Price) -> String {
    let (noun, verb) = if count == 1 {
        ("booking", "is")
    } else {
        ("bookings", "are")
    };
    format!("{count} {noun} totalling {total} {verb} pending confirmation.")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use discover_zimbabwe_core::{DestinationId, EventId};

    use super::*;
    use crate::error::BackendError;
    use crate::models::NewCartItem;
    use crate::store::MemoryStore;

    async fn store_with_cart(user: UserId) -> MemoryStore {
        let store = MemoryStore::new();
        let destination = DestinationId::generate();
        let event = EventId::generate();
        store
            .seed("destinations", [json!({"id": destination, "name": "Great Zimbabwe", "price": "15.00"})])
            .await;
        store
            .seed("events", [json!({"id": event, "title": "Shoko Festival", "price": 20})])
            .await;
        let cart = CartRepository::new(&store);
        cart.add(&NewCartItem::destination(user, destination, 2)).await.unwrap();
        cart.add(&NewCartItem::event(user, event, 1)).await.unwrap();
        store
    }

    #[test]
    fn test_steps_are_ordered() {
        let labels: Vec<_> = CheckoutStep::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            [
                "Reviewing cart",
                "Creating bookings",
                "Clearing cart",
                "Sending confirmation"
            ]
        );
        assert_eq!(CheckoutStep::ClearingCart.index(), 2);
    }

    #[test]
    fn test_confirmation_text() {
        let total = Price::new(Decimal::new(50, 0), CurrencyCode::USD);
        assert_eq!(
            confirmation_text(1, total),
            "1 booking totalling $50.00 is pending confirmation."
        );
        assert_eq!(
            confirmation_text(3, total),
            "3 bookings totalling $50.00 are pending confirmation."
        );
    }

    #[tokio::test]
    async fn test_checkout_books_every_item_and_empties_cart() {
        let user = UserId::generate();
        let store = store_with_cart(user).await;
        let tracker = ProcessTracker::default();

        let summary = CheckoutService::new(&store, &tracker)
            .checkout(user)
            .await
            .unwrap();

        assert_eq!(summary.bookings.len(), 2);
        assert!(summary.bookings.iter().all(|b| b.status == BookingStatus::Pending));
        assert_eq!(summary.total.amount, Decimal::new(50, 0));
        assert!(CartRepository::new(&store).user_cart(user).await.unwrap().is_empty());
        assert_eq!(store.rows("notifications").await.len(), 1);

        let state = tracker.snapshot();
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.current_label(), Some("Sending confirmation"));
    }

    #[tokio::test]
    async fn test_empty_cart_closes_tracker() {
        let store = MemoryStore::new();
        let tracker = ProcessTracker::default();

        let result = CheckoutService::new(&store, &tracker)
            .checkout(UserId::generate())
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(!tracker.snapshot().is_open);
        assert!(store.rows("bookings").await.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_price_writes_nothing() {
        let user = UserId::generate();
        let store = store_with_cart(user).await;
        let pricey = DestinationId::generate();
        store
            .seed("destinations", [json!({"id": pricey, "name": "Gold Reef", "price": Decimal::MAX.to_string()})])
            .await;
        CartRepository::new(&store)
            .add(&NewCartItem::destination(user, pricey, 1))
            .await
            .unwrap();
        let tracker = ProcessTracker::default();

        let result = CheckoutService::new(&store, &tracker).checkout(user).await;

        assert!(matches!(result, Err(CheckoutError::PriceOverflow { .. })));
        assert!(store.rows("bookings").await.is_empty());
        assert_eq!(CartRepository::new(&store).user_cart(user).await.unwrap().len(), 3);
        assert!(!tracker.snapshot().is_open);
    }

    #[tokio::test]
    async fn test_failed_booking_stops_before_clearing_cart() {
        let user = UserId::generate();
        let store = store_with_cart(user).await;
        store
            .fail_table("bookings", BackendError::new("42501", "permission denied"))
            .await;
        let tracker = ProcessTracker::default();

        let result = CheckoutService::new(&store, &tracker).checkout(user).await;

        assert!(matches!(result, Err(CheckoutError::Data(_))));
        let state = tracker.snapshot();
        assert!(!state.is_open);
        assert_eq!(state.current_label(), Some("Creating bookings"));
        assert_eq!(CartRepository::new(&store).user_cart(user).await.unwrap().len(), 2);
    }
}
