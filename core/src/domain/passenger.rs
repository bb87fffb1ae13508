use super::{Entity, PassengerId, require_non_empty};
use crate::error::Result;
use crate::patch::Patch;
use serde::{Deserialize, Serialize};

/// A person who submits travel requests.
///
/// Serializes as `{"id": 1, "name": "Ana"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    id: Option<PassengerId>,
    name: String,
}

/// Full-record body for creating or replacing a passenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerInput {
    /// Display name.
    pub name: String,
}

/// Partial-update body for a passenger.
///
/// An absent or `null` field leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPassenger {
    /// Replacement display name.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
}

impl Passenger {
    /// Create an unpersisted passenger.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`](crate::CoreError::Validation) if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require_non_empty(Self::NAME, "name", &name)?;
        Ok(Self { id: None, name })
    }

    /// Rebuild a passenger from stored fields without re-validating them.
    #[must_use]
    pub const fn from_parts(id: PassengerId, name: String) -> Self {
        Self { id: Some(id), name }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full update: overwrite every mutable field from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`](crate::CoreError::Validation) if the new name is empty.
    pub fn replace(self, input: PassengerInput) -> Result<Self> {
        require_non_empty(Self::NAME, "name", &input.name)?;
        Ok(Self {
            id: self.id,
            name: input.name,
        })
    }

    /// Partial update: each field present in `patch` replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`](crate::CoreError::Validation) if the merged name is empty.
    pub fn patch(self, patch: PatchPassenger) -> Result<Self> {
        let name = patch.name.merge(self.name);
        require_non_empty(Self::NAME, "name", &name)?;
        Ok(Self { id: self.id, name })
    }
}

impl Entity for Passenger {
    type Id = PassengerId;

    const NAME: &'static str = "Passenger";

    fn id(&self) -> Option<PassengerId> {
        self.id
    }

    fn with_id(self, id: PassengerId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

impl TryFrom<PassengerInput> for Passenger {
    type Error = crate::CoreError;

    fn try_from(input: PassengerInput) -> Result<Self> {
        Self::new(input.name)
    }
}
