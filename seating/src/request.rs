//! Request types for availability searches and bookings.
//!
//! Requests are validated on construction so the engine never sees a
//! zero-diner or duplicate-diner group.

use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{DinerId, RestaurantId};

/// Default length of every reservation.
pub const DEFAULT_RESERVATION_HOURS: u32 = 2;

/// Operator-level booking settings shared by every request.
///
/// # Examples
///
/// ```
/// use seating::BookingPolicy;
///
/// let policy = BookingPolicy::default();
/// assert_eq!(policy.duration().num_hours(), 2);
/// assert!(BookingPolicy::from_hours(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    duration: Duration,
}

impl BookingPolicy {
    /// Creates a policy with the given reservation length.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is zero or negative.
    pub fn new(duration: Duration) -> Result<Self, ValidationError> {
        if duration <= Duration::zero() {
            return Err(ValidationError {
                field: "duration".into(),
                message: format!(
                    "reservation duration must be positive, got {}s",
                    duration.num_seconds()
                ),
            });
        }
        Ok(Self { duration })
    }

    /// Creates a policy from a whole number of hours.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` is zero.
    pub fn from_hours(hours: u32) -> Result<Self, ValidationError> {
        Self::new(Duration::hours(i64::from(hours)))
    }

    /// Length of every reservation.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// End of a reservation starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error on `start` if the window runs past the latest
    /// representable time.
    pub fn end_for(&self, start: NaiveDateTime) -> Result<NaiveDateTime, ValidationError> {
        start
            .checked_add_signed(self.duration)
            .ok_or_else(|| ValidationError {
                field: "start".into(),
                message: format!(
                    "a {}h reservation starting at {start} ends out of range",
                    self.duration.num_hours()
                ),
            })
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            duration: Duration::hours(i64::from(DEFAULT_RESERVATION_HOURS)),
        }
    }
}

/// A group of diners looking for a table at a given time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use seating::ReservationRequest;
///
/// let start = NaiveDate::from_ymd_opt(2024, 8, 24).unwrap().and_hms_opt(19, 0, 0).unwrap();
///
/// let request = ReservationRequest::new(start, vec![1, 2]).unwrap();
/// assert_eq!(request.party_size(), 2);
///
/// assert!(ReservationRequest::new(start, vec![]).is_err());
/// assert!(ReservationRequest::new(start, vec![1, 1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    start: NaiveDateTime,
    diner_ids: Vec<DinerId>,
}

impl ReservationRequest {
    /// Creates a validated request.
    ///
    /// # Errors
    ///
    /// Returns an error if `diner_ids` is empty or lists a diner twice.
    pub fn new(start: NaiveDateTime, diner_ids: Vec<DinerId>) -> Result<Self, ValidationError> {
        if diner_ids.is_empty() {
            return Err(ValidationError {
                field: "diner_ids".into(),
                message: "at least one diner is required".into(),
            });
        }

        let mut seen = HashSet::with_capacity(diner_ids.len());
        for id in &diner_ids {
            if !seen.insert(*id) {
                return Err(ValidationError {
                    field: "diner_ids".into(),
                    message: format!("diner {id} is listed more than once"),
                });
            }
        }

        Ok(Self { start, diner_ids })
    }

    /// Requested start time.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Diners in the party, in request order.
    #[must_use]
    pub fn diner_ids(&self) -> &[DinerId] {
        &self.diner_ids
    }

    /// Diners in the party as a set.
    #[must_use]
    pub fn diner_set(&self) -> BTreeSet<DinerId> {
        self.diner_ids.iter().copied().collect()
    }

    /// Seats required.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn party_size(&self) -> u32 {
        // Bounded by validation against the diners table long before u32::MAX.
        self.diner_ids.len() as u32
    }
}

/// A request to book a table at a specific restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Restaurant chosen from a previous availability search.
    pub restaurant_id: RestaurantId,
    /// Party and time.
    pub reservation: ReservationRequest,
}

impl BookingRequest {
    /// Creates a booking request for `restaurant_id`.
    #[must_use]
    pub const fn new(restaurant_id: RestaurantId, reservation: ReservationRequest) -> Self {
        Self {
            restaurant_id,
            reservation,
        }
    }
}

/// Error type for request validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
