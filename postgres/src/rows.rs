//! Row types and their conversion into domain entities.

use chrono::{DateTime, NaiveDate, Utc};
use ride_request_core::{
    Driver, DriverId, Passenger, PassengerId, StoreError, TravelRequest, TravelRequestId,
    TravelRequestStatus,
};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DriverRow {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
}

impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Self::from_parts(DriverId::new(row.id), row.name, row.birth_date)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PassengerRow {
    pub id: i64,
    pub name: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Self::from_parts(PassengerId::new(row.id), row.name)
    }
}

/// `travel_requests` joined with the owning passenger's name.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TravelRequestRow {
    pub id: i64,
    pub passenger_id: i64,
    pub passenger_name: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub creation_date: DateTime<Utc>,
}

impl TryFrom<TravelRequestRow> for TravelRequest {
    type Error = StoreError;

    fn try_from(row: TravelRequestRow) -> Result<Self, Self::Error> {
        let status = TravelRequestStatus::parse(&row.status)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let passenger = Passenger::from_parts(PassengerId::new(row.passenger_id), row.passenger_name);

        Ok(Self::from_parts(
            TravelRequestId::new(row.id),
            passenger,
            row.origin,
            row.destination,
            status,
            row.creation_date,
        ))
    }
}
