//! Derived city bundles.

use serde::Serialize;

use super::{Destination, Event};

/// Everything listed under one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityContent {
    pub city: String,
    pub destinations: Vec<Destination>,
    pub events: Vec<Event>,
}

impl CityContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty() && self.events.is_empty()
    }
}
