//! Application state for Axum handlers.

use ride_request_core::{Clock, EntityStores, LinkBuilder, TravelRequestMapper, TravelService};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Holds no per-request data: every handler reads current records from the
/// stores and writes results back within the request.
#[derive(Clone)]
pub struct AppState {
    /// Driver, passenger and travel request stores.
    pub stores: EntityStores,
    /// Persistence seam for travel requests.
    pub travel_service: TravelService,
    /// DTO ↔ entity translation for travel requests.
    pub mapper: TravelRequestMapper,
    /// Time source for creation dates and birth date checks.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire the travel service and mapper over `stores`.
    #[must_use]
    pub fn new(stores: EntityStores, clock: Arc<dyn Clock>, links: LinkBuilder) -> Self {
        let travel_service = TravelService::new(stores.travel_requests.clone());
        let mapper = TravelRequestMapper::new(stores.passengers.clone(), clock.clone(), links);

        Self {
            stores,
            travel_service,
            mapper,
            clock,
        }
    }
}
