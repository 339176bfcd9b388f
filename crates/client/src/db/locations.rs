//! City index derived from destinations and events.
//!
//! Cities are not stored; a city exists when at least one destination or
//! event lists it in its `location` column. Locations are trimmed and
//! compared case-insensitively, so `"Harare"`, `"harare"` and `"Harare "`
//! are one city. Its display name is the first spelling in sort order.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::models::{CityContent, Destination, Event};
use crate::store::{Direction, RemoteStore};
use crate::table::Table;

#[derive(Debug, Deserialize)]
struct LocationRow {
    location: Option<String>,
}

fn city_name(location: Option<&str>) -> Option<&str> {
    location.map(str::trim).filter(|city| !city.is_empty())
}

fn city_key(city: &str) -> String {
    city.to_lowercase()
}

/// Record one spelling of a city, keeping the smallest as its display name.
fn observe(names: &mut BTreeMap<String, String>, city: &str) {
    names
        .entry(city_key(city))
        .and_modify(|name| {
            if city < name.as_str() {
                *name = city.to_string();
            }
        })
        .or_insert_with(|| city.to_string());
}

/// Group rows into bundles keyed by [`city_key`], preserving row order.
fn group(destinations: Vec<Destination>, events: Vec<Event>) -> BTreeMap<String, CityContent> {
    let mut names = BTreeMap::new();
    for city in destinations
        .iter()
        .filter_map(|d| city_name(d.location.as_deref()))
        .chain(events.iter().filter_map(|e| city_name(e.location.as_deref())))
    {
        observe(&mut names, city);
    }

    let mut index: BTreeMap<String, CityContent> = names
        .into_iter()
        .map(|(key, city)| {
            let content = CityContent {
                city,
                destinations: Vec::new(),
                events: Vec::new(),
            };
            (key, content)
        })
        .collect();

    for destination in destinations {
        let Some(key) = city_name(destination.location.as_deref()).map(city_key) else {
            continue;
        };
        if let Some(content) = index.get_mut(&key) {
            content.destinations.push(destination);
        }
    }
    for event in events {
        let Some(key) = city_name(event.location.as_deref()).map(city_key) else {
            continue;
        };
        if let Some(content) = index.get_mut(&key) {
            content.events.push(event);
        }
    }
    index
}

/// Repository for the derived city index.
pub struct LocationRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: RemoteStore> LocationRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// De-duplicated city names that have a destination or an event, sorted
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if either read fails; the events read is skipped
    /// when the destinations read fails.
    #[instrument(skip(self))]
    pub async fn all_cities_with_content(&self) -> Result<Vec<String>> {
        let destinations = self.locations_of(Table::of::<Destination>(self.store)).await?;
        let events = self.locations_of(Table::of::<Event>(self.store)).await?;

        let mut names = BTreeMap::new();
        for city in destinations
            .iter()
            .chain(&events)
            .filter_map(|row| city_name(row.location.as_deref()))
        {
            observe(&mut names, city);
        }
        Ok(names.into_values().collect())
    }

    /// Destinations and events listed under `city`.
    ///
    /// Uses the same matching as [`Self::city_index`]; an unknown city gives
    /// an empty bundle named after the trimmed input.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if either read fails.
    #[instrument(skip(self))]
    pub async fn city_content(&self, city: &str) -> Result<CityContent> {
        let city = city.trim();
        let (destinations, events) = self.read_all().await?;

        Ok(group(destinations, events)
            .remove(&city_key(city))
            .unwrap_or_else(|| CityContent {
                city: city.to_string(),
                destinations: Vec::new(),
                events: Vec::new(),
            }))
    }

    /// One bundle per city, in the order of
    /// [`Self::all_cities_with_content`], built from a single read of each
    /// table.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if either read fails.
    #[instrument(skip(self))]
    pub async fn city_index(&self) -> Result<Vec<CityContent>> {
        let (destinations, events) = self.read_all().await?;
        Ok(group(destinations, events).into_values().collect())
    }

    async fn read_all(&self) -> Result<(Vec<Destination>, Vec<Event>)> {
        let destinations = Table::of::<Destination>(self.store)
            .list(None, Some(("name", Direction::Ascending)))
            .await?;
        let events = Table::of::<Event>(self.store)
            .list(None, Some(("event_date", Direction::Ascending)))
            .await?;
        Ok((destinations, events))
    }

    async fn locations_of(&self, table: Table<'a, S>) -> Result<Vec<LocationRow>> {
        table.fetch_all(table.request().select("location")).await
    }
}
