use super::{DriverId, Entity, require_non_empty};
use crate::error::{CoreError, Result};
use crate::patch::Patch;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A driver who fulfils travel requests.
///
/// Serializes as `{"id": 1, "name": "Rui", "birthDate": "1990-05-17"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    id: Option<DriverId>,
    name: String,
    birth_date: NaiveDate,
}

/// Full-record body for creating or replacing a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverInput {
    /// Display name.
    pub name: String,
    /// Calendar birth date.
    pub birth_date: NaiveDate,
}

/// Partial-update body for a driver.
///
/// Fields are merged independently: patching the name never touches the
/// birth date and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchDriver {
    /// Replacement display name.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    /// Replacement birth date.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub birth_date: Patch<NaiveDate>,
}

fn validate(name: &str, birth_date: NaiveDate, today: NaiveDate) -> Result<()> {
    require_non_empty(Driver::NAME, "name", name)?;
    if birth_date > today {
        return Err(CoreError::Validation(format!(
            "Driver birth date {birth_date} is after {today}"
        )));
    }
    Ok(())
}

impl Driver {
    /// Create an unpersisted driver.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `name` is empty or `birth_date`
    /// is later than `today`.
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, today: NaiveDate) -> Result<Self> {
        let name = name.into();
        validate(&name, birth_date, today)?;
        Ok(Self {
            id: None,
            name,
            birth_date,
        })
    }

    /// Rebuild a driver from stored fields without re-validating them.
    #[must_use]
    pub const fn from_parts(id: DriverId, name: String, birth_date: NaiveDate) -> Self {
        Self {
            id: Some(id),
            name,
            birth_date,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar birth date.
    #[must_use]
    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Full update: overwrite every mutable field from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the new values break a construction rule.
    pub fn replace(self, input: DriverInput, today: NaiveDate) -> Result<Self> {
        validate(&input.name, input.birth_date, today)?;
        Ok(Self {
            id: self.id,
            name: input.name,
            birth_date: input.birth_date,
        })
    }

    /// Partial update: each field present in `patch` replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the merged record breaks a construction rule.
    pub fn patch(self, patch: PatchDriver, today: NaiveDate) -> Result<Self> {
        let name = patch.name.merge(self.name);
        let birth_date = patch.birth_date.merge(self.birth_date);
        validate(&name, birth_date, today)?;
        Ok(Self {
            id: self.id,
            name,
            birth_date,
        })
    }
}

impl Entity for Driver {
    type Id = DriverId;

    const NAME: &'static str = "Driver";

    fn id(&self) -> Option<DriverId> {
        self.id
    }

    fn with_id(self, id: DriverId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 1, 1)
    }

    fn rui() -> Driver {
        Driver::from_parts(DriverId::new(3), "Rui".to_string(), date(1990, 5, 17))
    }

    #[test]
    fn test_new_validates_birth_date() {
        assert!(Driver::new("Rui", today(), today()).is_ok());
        assert!(matches!(
            Driver::new("Rui", date(2025, 1, 2), today()),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            Driver::new("", date(1990, 5, 17), today()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_patch_name_preserves_birth_date() {
        let patch = PatchDriver {
            name: Patch::Value("X".to_string()),
            birth_date: Patch::Null,
        };
        let patched = rui().patch(patch, today()).unwrap();
        assert_eq!(patched.name(), "X");
        assert_eq!(patched.birth_date(), date(1990, 5, 17));
        assert_eq!(patched.id(), Some(DriverId::new(3)));
    }

    #[test]
    fn test_patch_birth_date_preserves_name() {
        let patch = PatchDriver {
            name: Patch::Absent,
            birth_date: Patch::Value(date(1985, 2, 1)),
        };
        let patched = rui().patch(patch, today()).unwrap();
        assert_eq!(patched.name(), "Rui");
        assert_eq!(patched.birth_date(), date(1985, 2, 1));
    }

    #[test]
    fn test_patch_rejects_future_birth_date() {
        let patch = PatchDriver {
            name: Patch::Absent,
            birth_date: Patch::Value(date(2030, 1, 1)),
        };
        assert!(rui().patch(patch, today()).is_err());
    }

    #[test]
    fn test_replace_keeps_identity() {
        let input = DriverInput {
            name: "Sara".to_string(),
            birth_date: date(2000, 1, 1),
        };
        let replaced = rui().replace(input, today()).unwrap();
        assert_eq!(
            replaced,
            Driver::from_parts(DriverId::new(3), "Sara".to_string(), date(2000, 1, 1))
        );
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(rui()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "name": "Rui", "birthDate": "1990-05-17"})
        );

        let patch: PatchDriver = serde_json::from_str(r#"{"birthDate":null}"#).unwrap();
        assert!(patch.name.is_absent());
        assert!(patch.birth_date.is_null());
    }
}
