//! Newtype IDs for type-safe row references.
//!
//! Every table in the hosted backend keys its rows by UUID. Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing
//! IDs from different tables.

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `generate()`, `as_uuid()`
/// - `FromStr`, `Display`, `From<Uuid>` and `Into<serde_json::Value>`
///
/// # Example
///
/// ```rust
/// # use discover_zimbabwe_core::define_id;
/// define_id!(GuideId);
/// define_id!(TourId);
///
/// let guide_id = GuideId::generate();
/// let tour_id = TourId::new(guide_id.as_uuid());
///
/// // These are different types, so this won't compile:
/// // let _: GuideId = tour_id;
/// # let _ = tour_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random (v4) ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<$name> for ::serde_json::Value {
            fn from(id: $name) -> Self {
                ::serde_json::Value::String(id.0.to_string())
            }
        }
    };
}

// Users come from the hosted auth service; every other ID is a table row.
define_id!(UserId);
define_id!(AccommodationId);
define_id!(DestinationId);
define_id!(EventId);
define_id!(CartItemId);
define_id!(ConversationId);
define_id!(MessageId);
define_id!(NotificationId);
define_id!(BookingId);
define_id!(ItineraryId);
define_id!(ItineraryItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_uuid() {
        let raw = uuid::Uuid::nil();
        let id = DestinationId::new(raw);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn test_id_parses_from_str() {
        let id: UserId = "6f1c2b8e-7d3a-4c55-9a0e-0d7f1b2c3d4e".parse().expect("parse");
        assert_eq!(id.to_string(), "6f1c2b8e-7d3a-4c55-9a0e-0d7f1b2c3d4e");
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn test_id_into_json_value() {
        let id = EventId::generate();
        let value: serde_json::Value = id.into();
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
