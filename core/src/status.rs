//! Travel-request status and its transition table.
//!
//! A travel request starts in [`TravelRequestStatus::Created`]. The only
//! transitions are out of `Created`; `Accepted` and `Refused` are terminal.
//!
//! ```text
//!            Accept
//!   CREATED ────────► ACCEPTED
//!      │
//!      │ Refuse
//!      ▼
//!   REFUSED
//! ```
//!
//! No HTTP operation drives these transitions yet; [`advance`] is the single
//! entry point for when that functionality is wired up.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a travel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelRequestStatus {
    /// Submitted by a passenger, awaiting a driver.
    #[default]
    Created,
    /// A driver accepted the request.
    Accepted,
    /// The request was refused.
    Refused,
}

/// Event that drives a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEvent {
    /// A driver accepts the request.
    Accept,
    /// The request is refused.
    Refuse,
}

/// Allowed transitions: `(from, event, to)`.
const TRANSITIONS: &[(TravelRequestStatus, StatusEvent, TravelRequestStatus)] = &[
    (
        TravelRequestStatus::Created,
        StatusEvent::Accept,
        TravelRequestStatus::Accepted,
    ),
    (
        TravelRequestStatus::Created,
        StatusEvent::Refuse,
        TravelRequestStatus::Refused,
    ),
];

/// Compute the status that results from applying `event` to `current`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] when the table has no entry for
/// the `(current, event)` pair.
///
/// # Examples
///
/// ```
/// use ride_request_core::status::{advance, StatusEvent, TravelRequestStatus};
///
/// let next = advance(TravelRequestStatus::Created, StatusEvent::Accept).unwrap();
/// assert_eq!(next, TravelRequestStatus::Accepted);
/// assert!(advance(next, StatusEvent::Refuse).is_err());
/// ```
pub fn advance(current: TravelRequestStatus, event: StatusEvent) -> Result<TravelRequestStatus> {
    TRANSITIONS
        .iter()
        .find(|(from, on, _)| *from == current && *on == event)
        .map(|(_, _, to)| *to)
        .ok_or(CoreError::InvalidTransition {
            from: current,
            event,
        })
}

impl TravelRequestStatus {
    /// Convert status to its wire and database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Accepted => "ACCEPTED",
            Self::Refused => "REFUSED",
        }
    }

    /// Parse status from its database representation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the string is not a known status.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "CREATED" => Ok(Self::Created),
            "ACCEPTED" => Ok(Self::Accepted),
            "REFUSED" => Ok(Self::Refused),
            _ => Err(CoreError::Validation(format!(
                "Invalid travel request status: {s}"
            ))),
        }
    }

    /// Returns `true` if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !TRANSITIONS.iter().any(|(from, _, _)| from == self)
    }
}

impl fmt::Display for TravelRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
