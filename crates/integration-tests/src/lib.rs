//! Integration tests for Discover Zimbabwe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p discover-zimbabwe-integration-tests
//! ```
//!
//! Every scenario runs against [`MemoryStore`], so no backend is needed.
//!
//! # Test Categories
//!
//! - `cart_round_trip` - Add, read and remove cart items
//! - `locations` - City index derived from destinations and events
//! - `error_envelopes` - Failure results and one diagnostic per call
//! - `checkout` - Cart to bookings workflow with progress tracking
//! - `session_gate` - Session lifecycle driving the access gate

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::{Value, json};

use discover_zimbabwe_client::store::MemoryStore;
use discover_zimbabwe_core::{DestinationId, EventId};

pub use discover_zimbabwe_client::testing::{ErrorCount, count_errors};

#[must_use]
pub fn destination(id: DestinationId, name: &str, city: &str, price: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "location": city,
        "price": price,
        "is_featured": false,
    })
}

#[must_use]
pub fn event(id: EventId, title: &str, city: &str, price: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "location": city,
        "price": price,
        "event_date": "2026-09-12T10:00:00Z",
    })
}

/// A store with destinations in Harare and Bulawayo and events in Bulawayo
/// and Mutare.
pub async fn catalogue() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .seed(
            "destinations",
            [
                destination(DestinationId::generate(), "National Heroes Acre", "Harare", "10.00"),
                destination(DestinationId::generate(), "Khami Ruins", "Bulawayo", "12.50"),
            ],
        )
        .await;
    store
        .seed(
            "events",
            [
                event(EventId::generate(), "Bulawayo Music Festival", "Bulawayo", "18.00"),
                event(EventId::generate(), "Vumba Trail Run", "Mutare", "25.00"),
            ],
        )
        .await;
    store
}
