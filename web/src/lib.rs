//! HTTP boundary for the ride-request service.
//!
//! Axum controllers decode DTOs, call into `ride-request-core`, and shape the
//! responses. Nothing here holds business rules; those live in the core.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives, gets a correlation ID and a tracing span
//! 2. **Extract** path ids and JSON bodies
//! 3. **Resolve** references through the entity stores or the mapper
//! 4. **Persist** through the stores or the travel service
//! 5. **Map** the result (and any `CoreError`) to an HTTP response
//!
//! # Example
//!
//! ```ignore
//! use ride_request_core::LinkBuilder;
//! use ride_request_testing::{in_memory_stores, test_clock};
//! use ride_request_web::{build_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState::new(in_memory_stores(), Arc::new(test_clock()), LinkBuilder::default());
//! let app = build_router(state);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::{Config, StorageBackend, DEFAULT_LOG_FILTER};
pub use error::AppError;
pub use extractors::{CorrelationId, JsonBody, PatchBody, PathId};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::build_router;
pub use state::AppState;
