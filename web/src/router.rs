//! Router configuration for the ride-request service.
//!
//! Builds the complete Axum router with all endpoints.

use crate::handlers::{drivers, health_check, passengers, travel_requests};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - Health check
/// - Driver and passenger CRUD
/// - Travel request submission and lookup
///
/// Every route runs inside the correlation-ID span and is logged by
/// `tower-http`'s `TraceLayer`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Drivers
        .route(
            "/drivers",
            get(drivers::list_drivers).post(drivers::create_driver),
        )
        .route(
            "/drivers/:id",
            get(drivers::get_driver)
                .put(drivers::replace_driver)
                .patch(drivers::patch_driver)
                .delete(drivers::delete_driver),
        )
        // Passengers
        .route("/passengers", post(passengers::create_passenger))
        .route("/passengers/list", get(passengers::list_passengers))
        .route(
            "/passengers/:id",
            get(passengers::get_passenger)
                .put(passengers::replace_passenger)
                .patch(passengers::patch_passenger)
                .delete(passengers::delete_passenger),
        )
        // Travel requests
        .route(
            "/travelRequests",
            post(travel_requests::create_travel_request),
        )
        .route(
            "/travelRequests/:id",
            get(travel_requests::get_travel_request),
        )
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
