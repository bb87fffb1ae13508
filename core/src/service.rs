//! Travel service: the persistence seam for travel requests.
//!
//! The service receives a fully constructed [`TravelRequest`] (its passenger
//! already resolved by the mapper) and hands it to the entity store. It does no
//! validation of its own, so alternate persistence strategies can be swapped in
//! without touching the mapper or the controllers.

use crate::domain::{Entity, TravelRequest};
use crate::error::Result;
use crate::store::EntityStore;
use std::sync::Arc;

/// Orchestrates persistence of travel requests.
#[derive(Clone)]
pub struct TravelService {
    travel_requests: Arc<dyn EntityStore<TravelRequest>>,
}

impl TravelService {
    /// Create a service writing to `travel_requests`.
    #[must_use]
    pub fn new(travel_requests: Arc<dyn EntityStore<TravelRequest>>) -> Self {
        Self { travel_requests }
    }

    /// Persist `request` and return the stored record with its identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Store`](crate::CoreError::Store) if the store rejects the write.
    pub async fn save_travel_request(&self, request: TravelRequest) -> Result<TravelRequest> {
        let saved = self.travel_requests.save(request).await?;
        tracing::debug!(
            travel_request_id = ?saved.id(),
            passenger_id = ?saved.passenger_id(),
            "Travel request saved"
        );
        Ok(saved)
    }
}
