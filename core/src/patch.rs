//! Tri-state field wrapper for partial updates.
//!
//! A JSON body can omit a field, send it as `null`, or send a value. Serde
//! collapses the first two for `Option<T>`, so patch DTOs use [`Patch<T>`]
//! instead. The merge rule treats absent and `null` the same way (the existing
//! value is preserved); the distinction stays observable for callers that need it.
//!
//! Fields of type `Patch<T>` must be annotated with `#[serde(default)]` so that a
//! missing key deserializes to [`Patch::Absent`].
//!
//! ```
//! use ride_request_core::patch::Patch;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct PatchName {
//!     #[serde(default)]
//!     name: Patch<String>,
//! }
//!
//! let omitted: PatchName = serde_json::from_str("{}").unwrap();
//! let null: PatchName = serde_json::from_str(r#"{"name":null}"#).unwrap();
//! let set: PatchName = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
//!
//! assert!(omitted.name.is_absent());
//! assert!(null.name.is_null());
//! assert_eq!(set.name.merge("Bia".to_string()), "Ana");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A patchable field: absent, explicit `null`, or a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not present in the request body.
    Absent,
    /// Field was present and explicitly `null`.
    Null,
    /// Field carries a replacement value.
    Value(T),
}

impl<T> Patch<T> {
    /// Resolve the field against the existing value.
    ///
    /// `Value(v)` yields `v`; `Absent` and `Null` both keep `existing`.
    #[must_use]
    pub fn merge(self, existing: T) -> T {
        match self {
            Self::Value(value) => value,
            Self::Absent | Self::Null => existing,
        }
    }

    /// Returns `true` if the field was omitted.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the field was sent as `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the replacement value, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

// `Absent` should be skipped by the containing struct
// (`skip_serializing_if = "Patch::is_absent"`); on its own it writes `null`.
impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => serializer.serialize_some(value),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}
