//! Public catalogue commands.

use tracing::info;

use discover_zimbabwe_client::ClientState;
use discover_zimbabwe_client::db::{AccommodationRepository, LocationRepository};
use discover_zimbabwe_client::error::DataError;
use discover_zimbabwe_client::models::Accommodation;

/// Print every city that has destinations or events.
///
/// # Errors
///
/// Returns `DataError` if the backend call fails.
pub async fn cities(state: &ClientState) -> Result<(), DataError> {
    let cities = LocationRepository::new(state.store())
        .all_cities_with_content()
        .await?;

    if cities.is_empty() {
        info!("No cities found");
        return Ok(());
    }
    info!("{} cities:", cities.len());
    for city in cities {
        info!("  {city}");
    }
    Ok(())
}

/// Print destinations and events in one city.
///
/// # Errors
///
/// Returns `DataError` if a backend call fails.
pub async fn city(state: &ClientState, name: &str) -> Result<(), DataError> {
    let content = LocationRepository::new(state.store())
        .city_content(name)
        .await?;

    if content.is_empty() {
        info!("Nothing listed in {}", content.city);
        return Ok(());
    }

    info!("Destinations in {} ({}):", content.city, content.destinations.len());
    for destination in &content.destinations {
        info!(
            "  {} [{}]",
            destination.name.as_deref().unwrap_or("(unnamed)"),
            destination.category.as_deref().unwrap_or("uncategorised")
        );
    }

    info!("Events in {} ({}):", content.city, content.events.len());
    for event in &content.events {
        let date = event
            .event_date
            .map_or_else(|| "date tbc".to_string(), |d| d.format("%Y-%m-%d").to_string());
        info!("  {} ({date})", event.title.as_deref().unwrap_or("(untitled)"));
    }
    Ok(())
}

/// Which accommodations to list.
#[derive(Debug, Default)]
pub struct AccommodationFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub featured: bool,
}

/// Print accommodations matching the filter.
///
/// A name search wins over a location filter, which wins over `featured`.
///
/// # Errors
///
/// Returns `DataError` if the backend call fails.
pub async fn accommodations(
    state: &ClientState,
    filter: AccommodationFilter,
) -> Result<(), DataError> {
    let repo = AccommodationRepository::new(state.store());
    let accommodations = match (&filter.search, &filter.location) {
        (Some(query), _) => repo.search(query).await?,
        (None, Some(location)) => repo.by_location(location).await?,
        (None, None) if filter.featured => repo.featured().await?,
        (None, None) => repo.list().await?,
    };

    info!("{} accommodations:", accommodations.len());
    for accommodation in &accommodations {
        info!("  {}", describe(accommodation));
    }
    Ok(())
}

fn describe(accommodation: &Accommodation) -> String {
    let name = accommodation.name.as_deref().unwrap_or("(unnamed)");
    let location = accommodation.location.as_deref().unwrap_or("unknown location");
    let currency = accommodation.currency.unwrap_or_default();
    accommodation.starting_price().map_or_else(
        || format!("{name} - {location}"),
        |price| {
            format!(
                "{name} - {location} - from {} per night",
                discover_zimbabwe_core::Price::new(price, currency)
            )
        },
    )
}
