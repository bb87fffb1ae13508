//! Domain model: drivers, passengers and travel requests.
//!
//! Entities carry an optional identity. It is `None` until the entity store
//! assigns one on first save, and is never changed afterwards by any merge
//! operation.

mod driver;
mod passenger;
mod travel_request;

pub use driver::{Driver, DriverInput, PatchDriver};
pub use passenger::{Passenger, PassengerInput, PatchPassenger};
pub use travel_request::TravelRequest;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A persisted domain record with a store-assigned numeric identity.
///
/// Implemented by every entity so that a single generic
/// [`EntityStore`](crate::store::EntityStore) contract covers all of them.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identity newtype for this entity.
    type Id: Copy
        + Eq
        + Ord
        + Hash
        + fmt::Debug
        + fmt::Display
        + From<i64>
        + Into<i64>
        + Send
        + Sync
        + 'static;

    /// Human-readable resource name, used in error messages.
    const NAME: &'static str;

    /// Identity, if the entity has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Return the same entity carrying the given identity.
    #[must_use]
    fn with_id(self, id: Self::Id) -> Self;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identity from its raw value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Raw numeric value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identity of a [`Driver`].
    DriverId
);
entity_id!(
    /// Identity of a [`Passenger`].
    PassengerId
);
entity_id!(
    /// Identity of a [`TravelRequest`].
    TravelRequestId
);

/// Reject empty text fields.
pub(crate) fn require_non_empty(entity: &str, field: &str, value: &str) -> crate::Result<()> {
    if value.is_empty() {
        return Err(crate::CoreError::Validation(format!(
            "{entity} {field} must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&PassengerId::new(7)).unwrap(), "7");
        let id: DriverId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("Passenger", "name", "Ana").is_ok());
        assert_eq!(
            require_non_empty("Passenger", "name", ""),
            Err(crate::CoreError::Validation(
                "Passenger name must not be empty".to_string()
            ))
        );
    }
}
