use super::{Entity, Passenger, PassengerId, TravelRequestId, require_non_empty};
use crate::environment::Clock;
use crate::error::{CoreError, Result};
use crate::status::TravelRequestStatus;
use chrono::{DateTime, Utc};

/// A passenger's request to travel from `origin` to `destination`.
///
/// The request holds the resolved [`Passenger`] it belongs to, never a bare
/// identifier. Status and creation date are assigned at construction and have
/// no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelRequest {
    id: Option<TravelRequestId>,
    passenger: Passenger,
    origin: String,
    destination: String,
    status: TravelRequestStatus,
    creation_date: DateTime<Utc>,
}

impl TravelRequest {
    /// Create a new request in status `CREATED`, timestamped with `clock.now()`.
    ///
    /// `origin` and `destination` are stored verbatim.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvariantViolation`] if `passenger` has not been persisted
    /// - [`CoreError::Validation`] if `origin` or `destination` is empty
    pub fn new(
        passenger: Passenger,
        origin: impl Into<String>,
        destination: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        if passenger.id().is_none() {
            return Err(CoreError::InvariantViolation(
                "Travel request passenger must be persisted".to_string(),
            ));
        }
        let origin = origin.into();
        let destination = destination.into();
        require_non_empty(Self::NAME, "origin", &origin)?;
        require_non_empty(Self::NAME, "destination", &destination)?;

        Ok(Self {
            id: None,
            passenger,
            origin,
            destination,
            status: TravelRequestStatus::default(),
            creation_date: clock.now(),
        })
    }

    /// Rebuild a travel request from stored fields without re-validating them.
    #[must_use]
    pub const fn from_parts(
        id: TravelRequestId,
        passenger: Passenger,
        origin: String,
        destination: String,
        status: TravelRequestStatus,
        creation_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            passenger,
            origin,
            destination,
            status,
            creation_date,
        }
    }

    /// Owning passenger.
    #[must_use]
    pub const fn passenger(&self) -> &Passenger {
        &self.passenger
    }

    /// Identity of the owning passenger.
    #[must_use]
    pub fn passenger_id(&self) -> Option<PassengerId> {
        self.passenger.id()
    }

    /// Pick-up location.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Drop-off location.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> TravelRequestStatus {
        self.status
    }

    /// Time the request was constructed.
    #[must_use]
    pub const fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }
}

impl Entity for TravelRequest {
    type Id = TravelRequestId;

    const NAME: &'static str = "TravelRequest";

    fn id(&self) -> Option<TravelRequestId> {
        self.id
    }

    fn with_id(self, id: TravelRequestId) -> Self {
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

    struct StoppedClock(DateTime<Utc>);

    impl Clock for StoppedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn noon() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn ana() -> Passenger {
        Passenger::from_parts(PassengerId::new(1), "Ana".to_string())
    }

    #[test]
    fn test_new_defaults_status_and_timestamp() {
        let request = TravelRequest::new(ana(), "A", "B", &StoppedClock(noon())).unwrap();
        assert_eq!(request.id(), None);
        assert_eq!(request.status(), TravelRequestStatus::Created);
        assert_eq!(request.creation_date(), noon());
        assert_eq!(request.passenger_id(), Some(PassengerId::new(1)));
        assert_eq!(request.origin(), "A");
        assert_eq!(request.destination(), "B");
    }

    #[test]
    fn test_new_keeps_text_verbatim() {
        let request =
            TravelRequest::new(ana(), "  Rua A ", "Av. B\n", &StoppedClock(noon())).unwrap();
        assert_eq!(request.origin(), "  Rua A ");
        assert_eq!(request.destination(), "Av. B\n");
    }

    #[test]
    fn test_new_requires_persisted_passenger() {
        let unsaved = Passenger::new("Ana").unwrap();
        let result = TravelRequest::new(unsaved, "A", "B", &StoppedClock(noon()));
        assert!(matches!(result, Err(CoreError::InvariantViolation(_))));
    }

    #[test]
    fn test_new_rejects_empty_locations() {
        let clock = StoppedClock(noon());
        assert!(matches!(
            TravelRequest::new(ana(), "", "B", &clock),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            TravelRequest::new(ana(), "A", "", &clock),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_with_id_preserves_server_fields() {
        let request = TravelRequest::new(ana(), "A", "B", &StoppedClock(noon())).unwrap();
        let saved = request.clone().with_id(TravelRequestId::new(9));
        assert_eq!(saved.id(), Some(TravelRequestId::new(9)));
        assert_eq!(saved.status(), request.status());
        assert_eq!(saved.creation_date(), request.creation_date());
    }
}
