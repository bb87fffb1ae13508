//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by resource.

pub mod drivers;
pub mod health;
pub mod passengers;
pub mod travel_requests;

pub use health::health_check;
