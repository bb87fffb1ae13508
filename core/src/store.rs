//! Entity store abstraction.
//!
//! The store is the persistence collaborator: keyed storage for drivers,
//! passengers and travel requests with find-by-id, find-all, save
//! (insert-or-update) and delete. The core assumes read-committed isolation and
//! atomic single-record writes, and does no concurrency control of its own.
//!
//! # Implementations
//!
//! - `PostgresEntityStore` (in `ride-request-postgres`): production implementation
//! - `InMemoryBackend` (in `ride-request-testing`): fast, deterministic tests and
//!   the server's default backend
//!
//! # Dyn Compatibility
//!
//! Methods return boxed futures rather than using `async fn` so the trait can
//! be used as `Arc<dyn EntityStore<E>>`.

use crate::domain::{Driver, Entity, Passenger, TravelRequest};
use crate::error::{CoreError, Result, StoreError};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`EntityStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = std::result::Result<T, StoreError>> + Send + 'a>>;

/// Keyed CRUD storage for one entity type.
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Load a single entity. Returns `Ok(None)` if no record has this id.
    fn find_by_id(&self, id: E::Id) -> StoreFuture<'_, Option<E>>;

    /// Load every entity, ordered by identity.
    fn find_all(&self) -> StoreFuture<'_, Vec<E>>;

    /// Insert-or-update.
    ///
    /// An entity without identity is inserted and returned with the identity
    /// the store assigned. An entity with identity overwrites that record.
    fn save(&self, entity: E) -> StoreFuture<'_, E>;

    /// Remove the record with this id. Removing a missing id is not an error.
    fn delete(&self, id: E::Id) -> StoreFuture<'_, ()>;
}

/// The three stores the service needs, bundled for dependency injection.
#[derive(Clone)]
pub struct EntityStores {
    /// Driver records.
    pub drivers: Arc<dyn EntityStore<Driver>>,
    /// Passenger records.
    pub passengers: Arc<dyn EntityStore<Passenger>>,
    /// Travel request records.
    pub travel_requests: Arc<dyn EntityStore<TravelRequest>>,
}

impl EntityStores {
    /// Bundle a single backend that stores every entity type.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: EntityStore<Driver> + EntityStore<Passenger> + EntityStore<TravelRequest> + 'static,
    {
        Self {
            drivers: backend.clone(),
            passengers: backend.clone(),
            travel_requests: backend,
        }
    }
}

/// Look up an entity, turning absence into [`CoreError::NotFound`].
///
/// # Errors
///
/// - [`CoreError::NotFound`] if no record has this id
/// - [`CoreError::Store`] if the lookup itself failed
pub async fn require<E: Entity>(store: &dyn EntityStore<E>, id: E::Id) -> Result<E> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found(E::NAME, id))
}

/// Delete an existing entity and return it.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if no record has this id
/// - [`CoreError::Store`] if the lookup or delete failed
pub async fn remove<E: Entity>(store: &dyn EntityStore<E>, id: E::Id) -> Result<E> {
    let entity = require(store, id).await?;
    store.delete(id).await?;
    tracing::debug!(entity = E::NAME, %id, "Entity deleted");
    Ok(entity)
}
