//! Trip itineraries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{
    AccommodationId, DestinationId, EventId, ItineraryId, ItineraryItemId, UserId,
};

use crate::table::Record;

/// A user-owned travel plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: ItineraryId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Itinerary {
    const TABLE: &'static str = "itineraries";
}

/// Payload for creating or patching an itinerary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItineraryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One stop on an itinerary day. References a destination, event or
/// accommodation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: ItineraryItemId,
    pub itinerary_id: ItineraryId,
    pub destination_id: Option<DestinationId>,
    pub event_id: Option<EventId>,
    pub accommodation_id: Option<AccommodationId>,
    /// 1-based day of the trip.
    pub day_number: Option<u32>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ItineraryItem {
    const TABLE: &'static str = "itinerary_items";
}

/// Payload for adding an item to an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItineraryItem {
    pub itinerary_id: ItineraryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<DestinationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_id: Option<AccommodationId>,
    pub day_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
