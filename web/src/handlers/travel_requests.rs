//! Travel request endpoints.
//!
//! - `POST /travelRequests` - Submit a travel request for an existing passenger
//! - `GET /travelRequests/:id` - Get one travel request
//!
//! Both respond with the output DTO wrapped in a HAL-style envelope whose
//! `_links.passenger` points at the owning passenger.

use crate::error::AppError;
use crate::extractors::{CorrelationId, JsonBody, PathId};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use ride_request_core::store::require;
use ride_request_core::{
    EntityModel, TravelRequestId, TravelRequestInput, TravelRequestOutput,
};

/// Submit a travel request.
///
/// Status and creation date are assigned by the server; any such fields in the
/// body are ignored. Returns 404 if `passengerId` does not resolve, in which
/// case nothing is persisted.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/travelRequests \
///   -H "Content-Type: application/json" \
///   -d '{"passengerId": 1, "origin": "A", "destination": "B"}'
/// # 201 {
/// #   "id": 1, "origin": "A", "destination": "B", "status": "CREATED",
/// #   "creationDate": "2025-01-01T00:00:00Z",
/// #   "_links": {"passenger": {"href": "/passengers/1", "title": "Ana"}}
/// # }
/// ```
pub async fn create_travel_request(
    correlation_id: CorrelationId,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TravelRequestInput>,
) -> Result<(StatusCode, Json<EntityModel<TravelRequestOutput>>), AppError> {
    let passenger_id = input.passenger_id;
    let request = state.mapper.map_input(input).await?;
    let saved = state.travel_service.save_travel_request(request).await?;
    let model = state.mapper.to_model(&saved)?;

    metrics::counter!("ride_request.travel_requests.created").increment(1);
    tracing::info!(
        correlation_id = %correlation_id.0,
        travel_request_id = %model.content.id,
        %passenger_id,
        "Travel request created"
    );

    Ok((StatusCode::CREATED, Json(model)))
}

/// Get a travel request by id.
///
/// Returns 404 if no travel request has this id.
pub async fn get_travel_request(
    PathId(id): PathId<TravelRequestId>,
    State(state): State<AppState>,
) -> Result<Json<EntityModel<TravelRequestOutput>>, AppError> {
    let request = require(state.stores.travel_requests.as_ref(), id).await?;
    let model = state.mapper.to_model(&request)?;
    Ok(Json(model))
}
