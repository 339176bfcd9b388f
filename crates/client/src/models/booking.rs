//! Bookings created at checkout.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::{BookingId, BookingStatus, DestinationId, EventId, UserId};

use crate::table::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub destination_id: Option<DestinationId>,
    pub event_id: Option<EventId>,
    pub quantity: Option<u32>,
    pub booking_date: Option<NaiveDate>,
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Booking {
    const TABLE: &'static str = "bookings";
}

/// Payload for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBooking {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<DestinationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    pub total_price: Decimal,
    pub status: BookingStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusPatch {
    pub status: BookingStatus,
}
