//! Passenger endpoints.
//!
//! - `GET /passengers/list` - List passengers
//! - `GET /passengers/:id` - Get one passenger
//! - `POST /passengers` - Create a passenger
//! - `PUT /passengers/:id` - Replace a passenger
//! - `PATCH /passengers/:id` - Partially update a passenger
//! - `DELETE /passengers/:id` - Delete a passenger

use crate::error::AppError;
use crate::extractors::{JsonBody, PatchBody, PathId};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use ride_request_core::store::{remove, require};
use ride_request_core::{Entity, Passenger, PassengerId, PassengerInput, PatchPassenger};

/// List all passengers, ordered by id.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/passengers/list
/// ```
pub async fn list_passengers(State(state): State<AppState>) -> Result<Json<Vec<Passenger>>, AppError> {
    let passengers = state.stores.passengers.find_all().await?;
    Ok(Json(passengers))
}

/// Get a passenger by id.
///
/// Returns 404 if no passenger has this id.
pub async fn get_passenger(
    PathId(id): PathId<PassengerId>,
    State(state): State<AppState>,
) -> Result<Json<Passenger>, AppError> {
    let passenger = require(state.stores.passengers.as_ref(), id).await?;
    Ok(Json(passenger))
}

/// Create a passenger.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/passengers \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Ana"}'
/// # 201 {"id":1,"name":"Ana"}
/// ```
pub async fn create_passenger(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PassengerInput>,
) -> Result<(StatusCode, Json<Passenger>), AppError> {
    let passenger = Passenger::try_from(input)?;
    let saved = state.stores.passengers.save(passenger).await?;

    metrics::counter!("ride_request.passengers.written", "operation" => "create").increment(1);
    tracing::info!(passenger_id = ?saved.id(), "Passenger created");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Replace every mutable field of a passenger.
///
/// Returns 404 if no passenger has this id. The id itself is preserved.
pub async fn replace_passenger(
    PathId(id): PathId<PassengerId>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PassengerInput>,
) -> Result<Json<Passenger>, AppError> {
    let existing = require(state.stores.passengers.as_ref(), id).await?;
    let saved = state.stores.passengers.save(existing.replace(input)?).await?;

    metrics::counter!("ride_request.passengers.written", "operation" => "replace").increment(1);
    tracing::info!(passenger_id = %id, "Passenger replaced");

    Ok(Json(saved))
}

/// Merge the fields present in the body into a passenger.
///
/// Absent and `null` fields keep their stored values; an empty body changes nothing.
///
/// # Example
///
/// ```bash
/// curl -X PATCH http://localhost:8080/passengers/1 \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Ana Maria"}'
/// ```
pub async fn patch_passenger(
    PathId(id): PathId<PassengerId>,
    State(state): State<AppState>,
    PatchBody(patch): PatchBody<PatchPassenger>,
) -> Result<Json<Passenger>, AppError> {
    let existing = require(state.stores.passengers.as_ref(), id).await?;
    let saved = state.stores.passengers.save(existing.patch(patch)?).await?;

    metrics::counter!("ride_request.passengers.written", "operation" => "patch").increment(1);
    tracing::info!(passenger_id = %id, "Passenger patched");

    Ok(Json(saved))
}

/// Delete a passenger.
///
/// Returns 204 on success, 404 if no passenger has this id, and 409 while
/// travel requests still reference the passenger.
pub async fn delete_passenger(
    PathId(id): PathId<PassengerId>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    remove(state.stores.passengers.as_ref(), id).await?;

    tracing::info!(passenger_id = %id, "Passenger deleted");

    Ok(StatusCode::NO_CONTENT)
}
