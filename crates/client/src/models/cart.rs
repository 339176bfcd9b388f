//! Shopping cart rows.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{CartItemId, CurrencyCode, DestinationId, EventId, Price, UserId};

use super::{Destination, Event};
use crate::table::Record;

/// A destination or event a user intends to book.
///
/// Reads embed the referenced destination and event; either may be `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub destination_id: Option<DestinationId>,
    pub event_id: Option<EventId>,
    pub quantity: Option<u32>,
    pub preferred_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
}

impl Record for CartItem {
    const TABLE: &'static str = "cart_items";
}

impl CartItem {
    /// Quantity, treating a missing value as one.
    #[must_use]
    pub fn quantity_or_one(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Unit price of the embedded destination, else of the embedded event.
    #[must_use]
    pub fn unit_price(&self) -> Option<Decimal> {
        self.destination
            .as_ref()
            .and_then(|d| d.price)
            .or_else(|| self.event.as_ref().and_then(|e| e.price))
    }

    /// Unit price times quantity; zero when no price is known and `None`
    /// when the product overflows.
    #[must_use]
    pub fn line_total(&self, currency: CurrencyCode) -> Option<Price> {
        self.unit_price().map_or_else(
            || Some(Price::zero(currency)),
            |amount| Price::new(amount, currency).checked_times(self.quantity_or_one()),
        )
    }

    /// Display name of whatever the item refers to.
    #[must_use]
    pub fn title(&self) -> &str {
        self.destination
            .as_ref()
            .and_then(|d| d.name.as_deref())
            .or_else(|| self.event.as_ref().and_then(|e| e.title.as_deref()))
            .unwrap_or("Untitled item")
    }
}

/// Payload for adding an item to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCartItem {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<DestinationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
}

impl NewCartItem {
    /// One or more places at a destination.
    #[must_use]
    pub const fn destination(user_id: UserId, destination_id: DestinationId, quantity: u32) -> Self {
        Self {
            user_id,
            destination_id: Some(destination_id),
            event_id: None,
            quantity,
            preferred_date: None,
        }
    }

    /// One or more tickets for an event.
    #[must_use]
    pub const fn event(user_id: UserId, event_id: EventId, quantity: u32) -> Self {
        Self {
            user_id,
            destination_id: None,
            event_id: Some(event_id),
            quantity,
            preferred_date: None,
        }
    }

    #[must_use]
    pub const fn with_preferred_date(mut self, date: NaiveDate) -> Self {
        self.preferred_date = Some(date);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(destination_price: Option<i64>, event_price: Option<i64>, quantity: Option<u32>) -> CartItem {
        let mut json = serde_json::json!({
            "id": CartItemId::generate(),
            "user_id": UserId::generate(),
            "quantity": quantity,
        });
        if let Some(price) = destination_price {
            json["destination"] = serde_json::json!({"id": DestinationId::generate(), "name": "Matobo Hills", "price": price});
        }
        if let Some(price) = event_price {
            json["event"] = serde_json::json!({"id": EventId::generate(), "title": "HIFA", "price": price});
        }
        serde_json::from_value(json).expect("deserialize")
    }

    #[test]
    fn test_line_total_uses_destination_price() {
        let item = item(Some(30), Some(99), Some(3));
        assert_eq!(item.line_total(CurrencyCode::USD).unwrap().amount, Decimal::new(90, 0));
        assert_eq!(item.title(), "Matobo Hills");
    }

    #[test]
    fn test_line_total_falls_back_to_event_and_quantity_one() {
        let item = item(None, Some(25), None);
        assert_eq!(item.line_total(CurrencyCode::USD).unwrap().amount, Decimal::new(25, 0));
        assert_eq!(item.title(), "HIFA");
    }

    #[test]
    fn test_line_total_without_price_is_zero() {
        let item = item(None, None, Some(2));
        assert_eq!(item.line_total(CurrencyCode::USD), Some(Price::zero(CurrencyCode::USD)));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let item: CartItem = serde_json::from_value(serde_json::json!({
            "id": CartItemId::generate(),
            "user_id": UserId::generate(),
            "quantity": 2,
            "destination": {"id": DestinationId::generate(), "price": Decimal::MAX.to_string()},
        }))
        .unwrap();
        assert!(item.line_total(CurrencyCode::USD).is_none());
    }

    #[test]
    fn test_new_cart_item_omits_absent_references() {
        let new_item = NewCartItem::event(UserId::generate(), EventId::generate(), 2);
        let json = serde_json::to_value(&new_item).expect("serialize");
        assert!(json.get("destination_id").is_none());
        assert_eq!(json["quantity"], 2);
    }
}
