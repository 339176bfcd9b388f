//! Accommodation listings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{AccommodationId, CurrencyCode};

use crate::table::Record;

/// A lodge, hotel or camp offered for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: AccommodationId,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Lodge, hotel, camp, guesthouse...
    pub accommodation_type: Option<String>,
    pub price_per_night: Option<Decimal>,
    pub currency: Option<CurrencyCode>,
    /// Free-text location, usually the nearest city.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub additional_images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub room_types: Option<Vec<RoomType>>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub is_featured: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Accommodation {
    const TABLE: &'static str = "accommodations";
}

impl Accommodation {
    /// Cheapest room price, falling back to the nightly price.
    #[must_use]
    pub fn starting_price(&self) -> Option<Decimal> {
        self.room_types
            .iter()
            .flatten()
            .filter_map(|room| room.price)
            .min()
            .or(self.price_per_night)
    }
}

/// One bookable room category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub price: Option<Decimal>,
    /// Maximum number of guests.
    pub capacity: Option<u32>,
}

/// Payload for creating or patching an accommodation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccommodationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_types: Option<Vec<RoomType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accommodation_tolerates_missing_fields() {
        let json = serde_json::json!({
            "id": "6f1d0c36-8c5e-4c43-9d55-0c6f4b8e2a11",
            "name": "Victoria Falls Hotel",
            "room_types": [
                {"type": "Deluxe", "price": "320.00", "capacity": 2},
                {"type": "Standard", "price": 210, "capacity": 2}
            ]
        });
        let accommodation: Accommodation = serde_json::from_value(json).expect("deserialize");

        assert!(accommodation.amenities.is_none());
        assert!(accommodation.created_at.is_none());
        assert_eq!(accommodation.starting_price(), Some(Decimal::new(210, 0)));
    }

    #[test]
    fn test_room_type_uses_type_key() {
        let room = RoomType {
            room_type: Some("Family".to_string()),
            price: None,
            capacity: Some(4),
        };
        let json = serde_json::to_string(&room).expect("serialize");
        assert!(json.contains("\"type\":\"Family\""));
    }

    #[test]
    fn test_input_skips_absent_fields() {
        let input = AccommodationInput {
            name: Some("Hwange Safari Lodge".to_string()),
            ..AccommodationInput::default()
        };
        let json = serde_json::to_value(&input).expect("serialize");
        assert_eq!(json, serde_json::json!({"name": "Hwange Safari Lodge"}));
    }
}
