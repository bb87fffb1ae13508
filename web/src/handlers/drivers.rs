//! Driver endpoints.
//!
//! - `GET /drivers` - List drivers
//! - `GET /drivers/:id` - Get one driver
//! - `POST /drivers` - Create a driver
//! - `PUT /drivers/:id` - Replace a driver
//! - `PATCH /drivers/:id` - Partially update a driver
//! - `DELETE /drivers/:id` - Delete a driver
//!
//! Birth dates are checked against the state clock's current date on every write.

use crate::error::AppError;
use crate::extractors::{JsonBody, PatchBody, PathId};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use ride_request_core::store::{remove, require};
use ride_request_core::{Driver, DriverId, DriverInput, Entity, PatchDriver};

/// List all drivers, ordered by id.
pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    let drivers = state.stores.drivers.find_all().await?;
    Ok(Json(drivers))
}

/// Get a driver by id.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/drivers/1
/// # {"id":1,"name":"Rui","birthDate":"1990-05-17"}
/// ```
pub async fn get_driver(
    PathId(id): PathId<DriverId>,
    State(state): State<AppState>,
) -> Result<Json<Driver>, AppError> {
    let driver = require(state.stores.drivers.as_ref(), id).await?;
    Ok(Json(driver))
}

/// Create a driver.
///
/// Returns 422 if the name is empty or the birth date is in the future.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/drivers \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Rui", "birthDate": "1990-05-17"}'
/// ```
pub async fn create_driver(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DriverInput>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let driver = Driver::new(input.name, input.birth_date, state.clock.today())?;
    let saved = state.stores.drivers.save(driver).await?;

    metrics::counter!("ride_request.drivers.written", "operation" => "create").increment(1);
    tracing::info!(driver_id = ?saved.id(), "Driver created");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Replace every mutable field of a driver.
pub async fn replace_driver(
    PathId(id): PathId<DriverId>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DriverInput>,
) -> Result<Json<Driver>, AppError> {
    let existing = require(state.stores.drivers.as_ref(), id).await?;
    let replaced = existing.replace(input, state.clock.today())?;
    let saved = state.stores.drivers.save(replaced).await?;

    metrics::counter!("ride_request.drivers.written", "operation" => "replace").increment(1);
    tracing::info!(driver_id = %id, "Driver replaced");

    Ok(Json(saved))
}

/// Merge the fields present in the body into a driver.
///
/// `{"name": "X"}` changes only the name; the birth date is kept exactly.
pub async fn patch_driver(
    PathId(id): PathId<DriverId>,
    State(state): State<AppState>,
    PatchBody(patch): PatchBody<PatchDriver>,
) -> Result<Json<Driver>, AppError> {
    let existing = require(state.stores.drivers.as_ref(), id).await?;
    let patched = existing.patch(patch, state.clock.today())?;
    let saved = state.stores.drivers.save(patched).await?;

    metrics::counter!("ride_request.drivers.written", "operation" => "patch").increment(1);
    tracing::info!(driver_id = %id, "Driver patched");

    Ok(Json(saved))
}

/// Delete a driver.
pub async fn delete_driver(
    PathId(id): PathId<DriverId>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    remove(state.stores.drivers.as_ref(), id).await?;

    tracing::info!(driver_id = %id, "Driver deleted");

    Ok(StatusCode::NO_CONTENT)
}
