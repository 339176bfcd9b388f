//! Per-entity repositories over the hosted backend.
//!
//! # Tables
//!
//! - `accommodations` - Lodges, hotels and camps
//! - `destinations` - Places to visit, keyed to a city by `location`
//! - `events` - Dated events, keyed to a city by `location`
//! - `cart_items` - Per-user cart, embeds destination and event
//! - `chat_conversations` / `chat_messages` - Assistant chat history
//! - `notifications` - Per-user notices with a read flag
//! - `bookings` - Bookings created at checkout
//! - `itineraries` / `itinerary_items` - Trip plans
//! - `user_roles` - Role grants (`admin`)
//!
//! Repositories borrow a [`RemoteStore`](crate::store::RemoteStore) and do no
//! caching; every call goes to the backend.

pub mod accommodations;
pub mod bookings;
pub mod cart;
pub mod chat;
pub mod destinations;
pub mod events;
pub mod itineraries;
pub mod locations;
pub mod notifications;
pub mod roles;

pub use accommodations::AccommodationRepository;
pub use bookings::BookingRepository;
pub use cart::CartRepository;
pub use chat::ChatRepository;
pub use destinations::DestinationRepository;
pub use events::EventRepository;
pub use itineraries::ItineraryRepository;
pub use locations::LocationRepository;
pub use notifications::NotificationRepository;
pub use roles::RoleRepository;
