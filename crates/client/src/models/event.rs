//! Scheduled events (festivals, tours, concerts).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use discover_zimbabwe_core::EventId;

use crate::table::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// City the event takes place in.
    pub location: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    /// Ticket price per person.
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// Number of tickets available.
    pub capacity: Option<u32>,
    pub is_featured: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Event {
    const TABLE: &'static str = "events";
}

/// Payload for creating or patching an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}
