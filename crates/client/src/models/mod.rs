//! Typed records mirroring the hosted backend's tables.
//!
//! Reads decode into the full record types; writes serialize the `New*` and
//! `*Patch` payloads, which omit absent fields so the backend applies its own
//! defaults.

pub mod accommodation;
pub mod booking;
pub mod cart;
pub mod chat;
pub mod destination;
pub mod event;
pub mod itinerary;
pub mod location;
pub mod notification;
pub mod role;

pub use accommodation::{Accommodation, AccommodationInput, RoomType};
pub use booking::{Booking, NewBooking};
pub use cart::{CartItem, NewCartItem};
pub use chat::{ChatConversation, ChatMessage, DEFAULT_CONVERSATION_TITLE};
pub use destination::{Destination, DestinationInput};
pub use event::{Event, EventInput};
pub use itinerary::{Itinerary, ItineraryInput, ItineraryItem, NewItineraryItem};
pub use location::CityContent;
pub use notification::{NewNotification, Notification};
pub use role::UserRole;
