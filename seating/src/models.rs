//! Entity types for diners, restaurants, tables, restrictions and reservations.
//!
//! These are plain in-memory values. The database layer materializes them
//! from rows; the matching and allocation logic operates on them without
//! touching SQL.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier of a [`Diner`].
pub type DinerId = i64;
/// Identifier of a [`Restaurant`].
pub type RestaurantId = i64;
/// Identifier of a [`Table`].
pub type TableId = i64;
/// Identifier of a [`DietaryRestriction`].
pub type RestrictionId = i64;
/// Identifier of a [`Reservation`].
pub type ReservationId = i64;

/// Home coordinates of a diner. Stored, never used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A person who may be included in a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diner {
    /// Store-assigned id.
    pub id: DinerId,
    /// Unique name.
    pub name: String,
    /// Optional home location.
    pub home: Option<Coordinates>,
    /// Dietary restrictions this diner requires.
    pub restrictions: BTreeSet<RestrictionId>,
}

/// A venue owning tables and accommodating a set of dietary restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Store-assigned id.
    pub id: RestaurantId,
    /// Unique name.
    pub name: String,
    /// Dietary restrictions this restaurant accommodates.
    pub restrictions: BTreeSet<RestrictionId>,
}

impl Restaurant {
    /// Whether this restaurant accommodates every restriction in `required`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use seating::Restaurant;
    ///
    /// let restaurant = Restaurant {
    ///     id: 1,
    ///     name: "Lardo".into(),
    ///     restrictions: BTreeSet::from([1, 2]),
    /// };
    /// assert!(restaurant.accommodates(&BTreeSet::from([2])));
    /// assert!(restaurant.accommodates(&BTreeSet::new()));
    /// assert!(!restaurant.accommodates(&BTreeSet::from([3])));
    /// ```
    #[must_use]
    pub fn accommodates(&self, required: &BTreeSet<RestrictionId>) -> bool {
        self.restrictions.is_superset(required)
    }
}

/// A seating unit with fixed capacity, owned by exactly one restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    /// Store-assigned id.
    pub id: TableId,
    /// Owning restaurant.
    pub restaurant_id: RestaurantId,
    /// Number of seats.
    pub capacity: u32,
}

/// A canonical named dietary constraint, e.g. "Gluten-Free".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DietaryRestriction {
    /// Store-assigned id.
    pub id: RestrictionId,
    /// Unique canonical name.
    pub name: String,
}

/// A booked half-open interval `[start, end)` on one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned id.
    pub id: ReservationId,
    /// The table this reservation occupies.
    pub table_id: TableId,
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
    /// Diners attending.
    pub diner_ids: BTreeSet<DinerId>,
}

impl Reservation {
    /// Whether this reservation conflicts with the interval `[start, end)`.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        intervals_overlap(self.start, self.end, start, end)
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` conflict iff
/// `s1 < e2 && s2 < e1`.
///
/// Touching endpoints do not conflict; identical starts always do.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use seating::models::intervals_overlap;
///
/// let at = |h| NaiveDate::from_ymd_opt(2024, 8, 24).unwrap().and_hms_opt(h, 0, 0).unwrap();
/// assert!(intervals_overlap(at(16), at(18), at(17), at(19)));
/// assert!(intervals_overlap(at(16), at(18), at(16), at(18)));
/// assert!(!intervals_overlap(at(16), at(18), at(18), at(20)));
/// ```
#[must_use]
pub fn intervals_overlap(
    s1: NaiveDateTime,
    e1: NaiveDateTime,
    s2: NaiveDateTime,
    e2: NaiveDateTime,
) -> bool {
    s1 < e2 && s2 < e1
}
