//! Error taxonomy for the travel-request core.
//!
//! Store failures ([`StoreError`]) belong to the persistence collaborator and are
//! wrapped unchanged. Everything else is detected inside the core:
//!
//! - [`CoreError::NotFound`]: a referenced driver, passenger or travel request
//!   does not exist. Raised at the point of lookup, never retried or swallowed.
//! - [`CoreError::InvariantViolation`]: an internal precondition failed, such as
//!   mapping an unpersisted travel request outward. Indicates a defect.
//! - [`CoreError::Validation`]: field-level construction rules were violated.
//! - [`CoreError::InvalidTransition`]: the status state machine rejected an event.

use crate::status::{StatusEvent, TravelRequestStatus};
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by an entity store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Database query or connection failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored record could not be decoded into a domain entity.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store is temporarily unable to serve requests.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A write would leave a dangling reference between records, such as
    /// deleting a passenger that travel requests still point at.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Errors produced by the domain model, mapper and services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Resource name of the missing entity (e.g. `"Passenger"`).
        entity: &'static str,
        /// Identity that failed to resolve.
        id: String,
    },

    /// Internal precondition violated.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Field-level constraint violated.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Status transition not allowed from the current state.
    #[error("Cannot apply {event:?} to a travel request in status {from}")]
    InvalidTransition {
        /// Status the request was in.
        from: TravelRequestStatus,
        /// Event that was rejected.
        event: StatusEvent,
    },

    /// Failure reported by the entity store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] for the given entity and identity.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns `true` if this error is a [`CoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
