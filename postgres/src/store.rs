//! [`EntityStore`] implementations over a `PgPool`.

use crate::rows::{DriverRow, PassengerRow, TravelRequestRow};
use ride_request_core::store::{EntityStore, StoreFuture};
use ride_request_core::{
    Driver, DriverId, Entity, Passenger, PassengerId, StoreError, TravelRequest, TravelRequestId,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Schema statements, applied in order by [`PostgresEntityStore::migrate`].
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS drivers (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        birth_date DATE NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS passengers (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS travel_requests (
        id BIGSERIAL PRIMARY KEY,
        passenger_id BIGINT NOT NULL REFERENCES passengers (id),
        origin TEXT NOT NULL,
        destination TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'CREATED'
            CHECK (status IN ('CREATED', 'ACCEPTED', 'REFUSED')),
        creation_date TIMESTAMPTZ NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_travel_requests_passenger ON travel_requests (passenger_id)",
];

const SELECT_TRAVEL_REQUEST: &str = r"
    SELECT t.id, t.passenger_id, p.name AS passenger_name,
           t.origin, t.destination, t.status, t.creation_date
    FROM travel_requests t
    JOIN passengers p ON p.id = t.passenger_id
";

/// Foreign-key violations become [`StoreError::Conflict`]; everything else is
/// a [`StoreError::Database`].
#[allow(clippy::needless_pass_by_value)]
fn db_error(e: sqlx::Error) -> StoreError {
    match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() => StoreError::Conflict(db.message().to_string()),
        _ => StoreError::Database(e.to_string()),
    }
}

fn record_write(entity: &'static str) {
    metrics::counter!("entity_store.writes", "entity" => entity).increment(1);
}

/// `PostgreSQL`-backed entity store for every domain entity.
///
/// Wrap it in an `Arc` and coerce to `Arc<dyn EntityStore<E>>` for each entity
/// type, or use `EntityStores::from_backend`.
#[derive(Clone, Debug)]
pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a pool of at most `max_connections`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be reached.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::from_pool(pool))
    }

    /// Underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if a statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
        }
        tracing::info!("Entity store schema is up to date");
        Ok(())
    }
}

impl EntityStore<Driver> for PostgresEntityStore {
    fn find_by_id(&self, id: DriverId) -> StoreFuture<'_, Option<Driver>> {
        Box::pin(async move {
            let row: Option<DriverRow> =
                sqlx::query_as("SELECT id, name, birth_date FROM drivers WHERE id = $1")
                    .bind(id.get())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_error)?;
            Ok(row.map(Driver::from))
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Driver>> {
        Box::pin(async move {
            let rows: Vec<DriverRow> =
                sqlx::query_as("SELECT id, name, birth_date FROM drivers ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(db_error)?;
            Ok(rows.into_iter().map(Driver::from).collect())
        })
    }

    fn save(&self, driver: Driver) -> StoreFuture<'_, Driver> {
        Box::pin(async move {
            let row: DriverRow = match driver.id() {
                None => sqlx::query_as(
                    r"
                    INSERT INTO drivers (name, birth_date)
                    VALUES ($1, $2)
                    RETURNING id, name, birth_date
                    ",
                )
                .bind(driver.name())
                .bind(driver.birth_date()),
                Some(id) => sqlx::query_as(
                    r"
                    INSERT INTO drivers (id, name, birth_date)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (id) DO UPDATE
                        SET name = EXCLUDED.name, birth_date = EXCLUDED.birth_date
                    RETURNING id, name, birth_date
                    ",
                )
                .bind(id.get())
                .bind(driver.name())
                .bind(driver.birth_date()),
            }
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

            tracing::debug!(driver_id = row.id, "Driver saved");
            record_write(Driver::NAME);
            Ok(Driver::from(row))
        })
    }

    fn delete(&self, id: DriverId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM drivers WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
            Ok(())
        })
    }
}

impl EntityStore<Passenger> for PostgresEntityStore {
    fn find_by_id(&self, id: PassengerId) -> StoreFuture<'_, Option<Passenger>> {
        Box::pin(async move {
            let row: Option<PassengerRow> =
                sqlx::query_as("SELECT id, name FROM passengers WHERE id = $1")
                    .bind(id.get())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_error)?;
            Ok(row.map(Passenger::from))
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Passenger>> {
        Box::pin(async move {
            let rows: Vec<PassengerRow> =
                sqlx::query_as("SELECT id, name FROM passengers ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(db_error)?;
            Ok(rows.into_iter().map(Passenger::from).collect())
        })
    }

    fn save(&self, passenger: Passenger) -> StoreFuture<'_, Passenger> {
        Box::pin(async move {
            let row: PassengerRow = match passenger.id() {
                None => sqlx::query_as(
                    "INSERT INTO passengers (name) VALUES ($1) RETURNING id, name",
                )
                .bind(passenger.name()),
                Some(id) => sqlx::query_as(
                    r"
                    INSERT INTO passengers (id, name)
                    VALUES ($1, $2)
                    ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
                    RETURNING id, name
                    ",
                )
                .bind(id.get())
                .bind(passenger.name()),
            }
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

            tracing::debug!(passenger_id = row.id, "Passenger saved");
            record_write(Passenger::NAME);
            Ok(Passenger::from(row))
        })
    }

    fn delete(&self, id: PassengerId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM passengers WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
            Ok(())
        })
    }
}

impl EntityStore<TravelRequest> for PostgresEntityStore {
    fn find_by_id(&self, id: TravelRequestId) -> StoreFuture<'_, Option<TravelRequest>> {
        Box::pin(async move {
            let row: Option<TravelRequestRow> =
                sqlx::query_as(&format!("{SELECT_TRAVEL_REQUEST} WHERE t.id = $1"))
                    .bind(id.get())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_error)?;
            row.map(TravelRequest::try_from).transpose()
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<TravelRequest>> {
        Box::pin(async move {
            let rows: Vec<TravelRequestRow> =
                sqlx::query_as(&format!("{SELECT_TRAVEL_REQUEST} ORDER BY t.id"))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(db_error)?;
            rows.into_iter().map(TravelRequest::try_from).collect()
        })
    }

    fn save(&self, request: TravelRequest) -> StoreFuture<'_, TravelRequest> {
        Box::pin(async move {
            let passenger_id = request.passenger_id().ok_or_else(|| {
                StoreError::Serialization("Travel request passenger has no identity".to_string())
            })?;

            let id: i64 = match request.id() {
                None => sqlx::query_scalar(
                    r"
                    INSERT INTO travel_requests
                        (passenger_id, origin, destination, status, creation_date)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    ",
                )
                .bind(passenger_id.get())
                .bind(request.origin())
                .bind(request.destination())
                .bind(request.status().as_str())
                .bind(request.creation_date()),
                Some(id) => sqlx::query_scalar(
                    r"
                    INSERT INTO travel_requests
                        (id, passenger_id, origin, destination, status, creation_date)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (id) DO UPDATE
                        SET passenger_id = EXCLUDED.passenger_id,
                            origin = EXCLUDED.origin,
                            destination = EXCLUDED.destination,
                            status = EXCLUDED.status
                    RETURNING id
                    ",
                )
                .bind(id.get())
                .bind(passenger_id.get())
                .bind(request.origin())
                .bind(request.destination())
                .bind(request.status().as_str())
                .bind(request.creation_date()),
            }
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

            tracing::debug!(
                travel_request_id = id,
                passenger_id = passenger_id.get(),
                "Travel request saved"
            );
            record_write(TravelRequest::NAME);
            Ok(request.with_id(TravelRequestId::new(id)))
        })
    }

    fn delete(&self, id: TravelRequestId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM travel_requests WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
            Ok(())
        })
    }
}
