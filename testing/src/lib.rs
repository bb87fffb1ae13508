//! # Ride Request Testing
//!
//! Testing utilities and helpers for the ride-request service.
//!
//! This crate provides:
//! - [`InMemoryEntityStore`]: a `BTreeMap`-backed [`EntityStore`] for any entity
//! - [`InMemoryBackend`]: one store per entity type, with travel requests
//!   joined to their live passenger like the SQL store
//! - [`FixedClock`]: deterministic time
//! - [`fixtures`]: builders for persisted drivers and passengers
//!
//! [`in_memory_stores`] is also what the server runs on when no database is
//! configured.
//!
//! ## Example
//!
//! ```
//! use ride_request_core::{Entity, EntityStore, Passenger, PassengerId};
//! use ride_request_testing::InMemoryEntityStore;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryEntityStore::<Passenger>::new();
//! let saved = store.save(Passenger::new("Ana").unwrap()).await.unwrap();
//! assert_eq!(saved.id(), Some(PassengerId::new(1)));
//! # });
//! ```

use chrono::{DateTime, Utc};
use ride_request_core::environment::Clock;
use ride_request_core::store::{EntityStore, EntityStores, StoreFuture};
use ride_request_core::{
    Driver, DriverId, Entity, Passenger, PassengerId, StoreError, TravelRequest, TravelRequestId,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ride_request_testing::mocks::FixedClock;
    /// use ride_request_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Builders for persisted domain records.
pub mod fixtures {
    use chrono::NaiveDate;
    use ride_request_core::{Driver, DriverId, Passenger, PassengerId};

    /// A passenger that already carries an identity.
    #[must_use]
    pub fn passenger(id: i64, name: &str) -> Passenger {
        Passenger::from_parts(PassengerId::new(id), name.to_string())
    }

    /// A driver that already carries an identity.
    ///
    /// # Panics
    ///
    /// Panics if `(year, month, day)` is not a valid calendar date.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn driver(id: i64, name: &str, (year, month, day): (i32, u32, u32)) -> Driver {
        let birth_date =
            NaiveDate::from_ymd_opt(year, month, day).expect("fixture birth date should be valid");
        Driver::from_parts(DriverId::new(id), name.to_string(), birth_date)
    }
}

struct Records<E: Entity> {
    by_id: BTreeMap<E::Id, E>,
    next_id: i64,
}

/// In-memory entity store.
///
/// Identities are assigned from a counter starting at 1. Records are kept in
/// identity order, so `find_all` is ordered by id like the SQL store.
///
/// Values are stored exactly as saved. Use [`InMemoryBackend`] when travel
/// requests must follow their passenger's current state.
pub struct InMemoryEntityStore<E: Entity> {
    records: Mutex<Records<E>>,
}

impl<E: Entity> InMemoryEntityStore<E> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Records {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store pre-populated with already-identified records.
    ///
    /// Records without identity are assigned one, as by `save`.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.records.lock() {
            for record in records {
                insert(&mut guard, record);
            }
        }
        store
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |records| records.by_id.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records<E>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn insert<E: Entity>(records: &mut Records<E>, entity: E) -> E {
    let entity = match entity.id() {
        Some(id) => {
            records.next_id = records.next_id.max(Into::<i64>::into(id) + 1);
            entity
        },
        None => {
            let id = E::Id::from(records.next_id);
            records.next_id += 1;
            entity.with_id(id)
        },
    };
    if let Some(id) = entity.id() {
        records.by_id.insert(id, entity.clone());
    }
    entity
}

impl<E: Entity> EntityStore<E> for InMemoryEntityStore<E> {
    fn find_by_id(&self, id: E::Id) -> StoreFuture<'_, Option<E>> {
        let result = self.lock().map(|records| records.by_id.get(&id).cloned());
        Box::pin(async move { result })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<E>> {
        let result = self
            .lock()
            .map(|records| records.by_id.values().cloned().collect());
        Box::pin(async move { result })
    }

    fn save(&self, entity: E) -> StoreFuture<'_, E> {
        let result = self.lock().map(|mut records| insert(&mut records, entity));
        if let Ok(saved) = &result {
            tracing::trace!(entity = E::NAME, id = ?saved.id(), "In-memory save");
        }
        Box::pin(async move { result })
    }

    fn delete(&self, id: E::Id) -> StoreFuture<'_, ()> {
        let result = self.lock().map(|mut records| {
            records.by_id.remove(&id);
        });
        Box::pin(async move { result })
    }
}

/// In-memory backend for every entity type.
///
/// Travel requests are stored against their passenger's identity and read back
/// with the passenger's current record, as the SQL store's join does. The
/// passenger reference is enforced both ways:
///
/// - saving a travel request for an unknown passenger fails with
///   [`StoreError::Conflict`]
/// - deleting a passenger that travel requests still reference fails with
///   [`StoreError::Conflict`]
///
/// Passenger and travel-request operations lock passengers before travel
/// requests.
#[derive(Default)]
pub struct InMemoryBackend {
    drivers: InMemoryEntityStore<Driver>,
    passengers: InMemoryEntityStore<Passenger>,
    travel_requests: InMemoryEntityStore<TravelRequest>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rebuild a stored travel request around `passenger`.
fn with_passenger(request: &TravelRequest, passenger: Passenger) -> Option<TravelRequest> {
    Some(TravelRequest::from_parts(
        request.id()?,
        passenger,
        request.origin().to_string(),
        request.destination().to_string(),
        request.status(),
        request.creation_date(),
    ))
}

/// Attach the passenger's current record, or `None` when it is gone, like an
/// inner join.
fn join_passenger(
    request: &TravelRequest,
    passengers: &BTreeMap<PassengerId, Passenger>,
) -> Option<TravelRequest> {
    let passenger = passengers.get(&request.passenger_id()?)?;
    with_passenger(request, passenger.clone())
}

impl EntityStore<Driver> for InMemoryBackend {
    fn find_by_id(&self, id: DriverId) -> StoreFuture<'_, Option<Driver>> {
        self.drivers.find_by_id(id)
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Driver>> {
        self.drivers.find_all()
    }

    fn save(&self, driver: Driver) -> StoreFuture<'_, Driver> {
        self.drivers.save(driver)
    }

    fn delete(&self, id: DriverId) -> StoreFuture<'_, ()> {
        self.drivers.delete(id)
    }
}

impl EntityStore<Passenger> for InMemoryBackend {
    fn find_by_id(&self, id: PassengerId) -> StoreFuture<'_, Option<Passenger>> {
        self.passengers.find_by_id(id)
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Passenger>> {
        self.passengers.find_all()
    }

    fn save(&self, passenger: Passenger) -> StoreFuture<'_, Passenger> {
        self.passengers.save(passenger)
    }

    fn delete(&self, id: PassengerId) -> StoreFuture<'_, ()> {
        let result = self.passengers.lock().and_then(|mut passengers| {
            let requests = self.travel_requests.lock()?;
            if requests
                .by_id
                .values()
                .any(|request| request.passenger_id() == Some(id))
            {
                return Err(StoreError::Conflict(format!(
                    "{} with id {id} is still referenced by travel requests",
                    Passenger::NAME
                )));
            }
            passengers.by_id.remove(&id);
            Ok(())
        });
        Box::pin(async move { result })
    }
}

impl EntityStore<TravelRequest> for InMemoryBackend {
    fn find_by_id(&self, id: TravelRequestId) -> StoreFuture<'_, Option<TravelRequest>> {
        let result = self.passengers.lock().and_then(|passengers| {
            let requests = self.travel_requests.lock()?;
            Ok(requests
                .by_id
                .get(&id)
                .and_then(|request| join_passenger(request, &passengers.by_id)))
        });
        Box::pin(async move { result })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<TravelRequest>> {
        let result = self.passengers.lock().and_then(|passengers| {
            let requests = self.travel_requests.lock()?;
            Ok(requests
                .by_id
                .values()
                .filter_map(|request| join_passenger(request, &passengers.by_id))
                .collect())
        });
        Box::pin(async move { result })
    }

    fn save(&self, request: TravelRequest) -> StoreFuture<'_, TravelRequest> {
        let result = self.passengers.lock().and_then(|passengers| {
            let passenger = request
                .passenger_id()
                .and_then(|id| passengers.by_id.get(&id))
                .cloned()
                .ok_or_else(|| {
                    StoreError::Conflict(format!(
                        "{} for travel request does not exist",
                        Passenger::NAME
                    ))
                })?;
            let mut requests = self.travel_requests.lock()?;
            let saved = insert(&mut requests, request);
            tracing::trace!(entity = TravelRequest::NAME, id = ?saved.id(), "In-memory save");
            with_passenger(&saved, passenger).ok_or_else(|| {
                StoreError::Serialization("Travel request was stored without identity".to_string())
            })
        });
        Box::pin(async move { result })
    }

    fn delete(&self, id: TravelRequestId) -> StoreFuture<'_, ()> {
        self.travel_requests.delete(id)
    }
}

/// Fresh, empty in-memory stores for every entity type.
#[must_use]
pub fn in_memory_stores() -> EntityStores {
    EntityStores::from_backend(Arc::new(InMemoryBackend::new()))
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
