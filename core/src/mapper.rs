//! Translation between wire-level DTOs and domain entities.
//!
//! # Input → Domain
//!
//! Resolving a [`TravelRequestInput`] is a two-step process: the passenger id
//! is looked up in the entity store first, and only the resolved [`Passenger`]
//! is handed to [`TravelRequest::new`]. Server-assigned fields (status,
//! creation date) have no counterpart in the input.
//!
//! # Domain → Output
//!
//! Only persisted travel requests can be mapped outward. The output is wrapped
//! in an [`EntityModel`] carrying a `"passenger"` link titled with the
//! passenger's name.

use crate::domain::{Entity, Passenger, PassengerId, TravelRequest, TravelRequestId};
use crate::environment::Clock;
use crate::error::{CoreError, Result};
use crate::links::{EntityModel, LinkBuilder, Resource};
use crate::status::TravelRequestStatus;
use crate::store::{EntityStore, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Relation name of the link from a travel request to its passenger.
pub const PASSENGER_REL: &str = "passenger";

/// Body of `POST /travelRequests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRequestInput {
    /// Passenger making the request.
    pub passenger_id: PassengerId,
    /// Pick-up location.
    pub origin: String,
    /// Drop-off location.
    pub destination: String,
}

/// Outward representation of a persisted travel request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRequestOutput {
    /// Store-assigned identity.
    pub id: TravelRequestId,
    /// Pick-up location.
    pub origin: String,
    /// Drop-off location.
    pub destination: String,
    /// Current status.
    pub status: TravelRequestStatus,
    /// Creation timestamp (ISO-8601).
    pub creation_date: DateTime<Utc>,
}

/// Maps travel-request DTOs to and from the domain.
#[derive(Clone)]
pub struct TravelRequestMapper {
    passengers: Arc<dyn EntityStore<Passenger>>,
    clock: Arc<dyn Clock>,
    links: LinkBuilder,
}

impl TravelRequestMapper {
    /// Create a mapper resolving passengers from `passengers`.
    #[must_use]
    pub fn new(
        passengers: Arc<dyn EntityStore<Passenger>>,
        clock: Arc<dyn Clock>,
        links: LinkBuilder,
    ) -> Self {
        Self {
            passengers,
            clock,
            links,
        }
    }

    /// Resolve the passenger and build an unpersisted travel request.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if `input.passenger_id` does not exist
    /// - [`CoreError::Validation`] if origin or destination is empty
    /// - [`CoreError::Store`] if the passenger lookup failed
    pub async fn map_input(&self, input: TravelRequestInput) -> Result<TravelRequest> {
        let passenger = require(self.passengers.as_ref(), input.passenger_id).await?;
        TravelRequest::new(
            passenger,
            input.origin,
            input.destination,
            self.clock.as_ref(),
        )
    }

    /// Project a persisted travel request onto its output DTO.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvariantViolation`] if `request` has no identity.
    pub fn map_output(&self, request: &TravelRequest) -> Result<TravelRequestOutput> {
        let id = request.id().ok_or_else(|| {
            CoreError::InvariantViolation(
                "Only persisted travel requests can be mapped to output".to_string(),
            )
        })?;

        Ok(TravelRequestOutput {
            id,
            origin: request.origin().to_string(),
            destination: request.destination().to_string(),
            status: request.status(),
            creation_date: request.creation_date(),
        })
    }

    /// Wrap `output` with a `"passenger"` link to the request's owner.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvariantViolation`] if the owning passenger has no identity.
    pub fn build_output_model(
        &self,
        request: &TravelRequest,
        output: TravelRequestOutput,
    ) -> Result<EntityModel<TravelRequestOutput>> {
        let passenger = request.passenger();
        let passenger_id = passenger.id().ok_or_else(|| {
            CoreError::InvariantViolation("Travel request passenger has no identity".to_string())
        })?;

        let link = self
            .links
            .link(Resource::Passengers, passenger_id)
            .with_title(passenger.name());

        Ok(EntityModel::new(output).with_link(PASSENGER_REL, link))
    }

    /// [`map_output`](Self::map_output) followed by
    /// [`build_output_model`](Self::build_output_model).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvariantViolation`] if the request or its passenger
    /// has no identity.
    pub fn to_model(&self, request: &TravelRequest) -> Result<EntityModel<TravelRequestOutput>> {
        let output = self.map_output(request)?;
        self.build_output_model(request, output)
    }
}
