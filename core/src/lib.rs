//! # Ride Request Core
//!
//! Travel-request lifecycle and mapping layer for the ride-request service.
//!
//! Passengers submit travel requests; drivers fulfil them. This crate holds
//! everything with real invariants:
//!
//! - **Domain model** ([`domain`]): `Driver`, `Passenger`, `TravelRequest` and
//!   their construction and merge rules
//! - **Status state machine** ([`status`]): table-driven `advance`
//! - **Partial updates** ([`patch`]): tri-state `Patch<T>` fields
//! - **Entity store contract** ([`store`]): keyed CRUD behind a trait object
//! - **Travel service** ([`service`]): persistence seam for travel requests
//! - **Mapper** ([`mapper`]): DTO ↔ entity translation with hypermedia links
//!
//! HTTP routing, database drivers and process bootstrap live in the
//! `ride-request-web` and `ride-request-postgres` crates.
//!
//! ## Data Flow
//!
//! ```text
//! HTTP request ─► controller decodes DTO
//!              ─► mapper resolves passenger, builds TravelRequest
//!              ─► travel service persists via EntityStore
//!              ─► mapper builds output + "passenger" link
//!              ─► controller serializes response
//! ```

#![forbid(unsafe_code)]

pub mod domain;
pub mod environment;
pub mod error;
pub mod links;
pub mod mapper;
pub mod patch;
pub mod service;
pub mod status;
pub mod store;

// Re-export commonly used types
pub use domain::{
    Driver, DriverId, DriverInput, Entity, Passenger, PassengerId, PassengerInput, PatchDriver,
    PatchPassenger, TravelRequest, TravelRequestId,
};
pub use environment::{Clock, SystemClock};
pub use error::{CoreError, Result, StoreError};
pub use links::{EntityModel, Link, LinkBuilder, Resource};
pub use mapper::{TravelRequestInput, TravelRequestMapper, TravelRequestOutput};
pub use patch::Patch;
pub use service::TravelService;
pub use status::{StatusEvent, TravelRequestStatus, advance};
pub use store::{EntityStore, EntityStores, StoreFuture};
