//! `PostgreSQL` entity store for the ride-request service.
//!
//! This crate provides [`PostgresEntityStore`], a single type implementing the
//! `EntityStore` trait from `ride-request-core` for drivers, passengers and
//! travel requests. It uses runtime-checked sqlx queries and supports:
//!
//! - Store-assigned `BIGSERIAL` identities
//! - Insert-or-update via `ON CONFLICT (id) DO UPDATE`
//! - Travel requests loaded together with their passenger (JOIN)
//! - Idempotent schema bootstrap with [`PostgresEntityStore::migrate`]
//!
//! # Example
//!
//! ```no_run
//! use ride_request_core::EntityStores;
//! use ride_request_postgres::PostgresEntityStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresEntityStore::connect("postgres://localhost/rides", 10).await?;
//! store.migrate().await?;
//! let stores = EntityStores::from_backend(Arc::new(store));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod rows;
mod store;

pub use store::PostgresEntityStore;
