//! Availability search.
//!
//! A restaurant is offered for a request when it has a table large enough for
//! the party, none of its tables are booked in the requested window, and it
//! accommodates every restriction any diner in the party requires.

use std::collections::BTreeSet;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::models::{Restaurant, RestaurantId, RestrictionId};
use crate::request::{BookingPolicy, ReservationRequest};

use super::ensure_diners_exist;

/// Whether `restaurant` can host a party needing `required` restrictions.
///
/// `excluded` holds restaurants with any conflicting reservation and
/// `with_capacity` those owning a table large enough for the party.
#[must_use]
pub fn qualifies(
    restaurant: &Restaurant,
    excluded: &BTreeSet<RestaurantId>,
    with_capacity: &BTreeSet<RestaurantId>,
    required: &BTreeSet<RestrictionId>,
) -> bool {
    !excluded.contains(&restaurant.id)
        && with_capacity.contains(&restaurant.id)
        && restaurant.accommodates(required)
}

/// Finds every restaurant able to seat the request, ordered by id.
///
/// Exclusion is restaurant-wide: a single conflicting reservation on any of a
/// restaurant's tables removes the whole restaurant. An empty result is a
/// normal outcome.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) if a diner
/// id is unknown or the reservation window ends out of range, or a database
/// error if a query fails.
///
/// # Examples
///
/// ```
/// use seating::operations::find_available;
/// use seating::{BookingPolicy, Database, ReservationRequest};
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
///
/// let db = Database::open_in_memory().unwrap();
/// let conn = db.connection();
/// let restaurant = Database::insert_restaurant(conn, "Lardo", &BTreeSet::new()).unwrap();
/// Database::insert_table(conn, restaurant, 2).unwrap();
/// let diner = Database::insert_diner(conn, "Tobias", None, &BTreeSet::new()).unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2024, 8, 24).unwrap().and_hms_opt(19, 0, 0).unwrap();
/// let request = ReservationRequest::new(start, vec![diner]).unwrap();
///
/// let found = find_available(conn, &BookingPolicy::default(), &request).unwrap();
/// assert_eq!(found[0].id, restaurant);
/// ```
pub fn find_available(
    conn: &Connection,
    policy: &BookingPolicy,
    request: &ReservationRequest,
) -> Result<Vec<Restaurant>> {
    let start = request.start();
    let end = policy.end_for(start)?;
    let capacity = request.party_size();
    let diners = request.diner_set();

    ensure_diners_exist(conn, &diners)?;
    log::info!("Finding restaurants for {capacity} diner(s) from {start} to {end}");

    let excluded = Database::conflicting_restaurant_ids(conn, start, end)?;
    let required = Database::diner_restriction_ids(conn, &diners)?;
    let with_capacity = Database::restaurants_with_capacity(conn, capacity)?;
    log::debug!(
        "{} restaurant(s) booked in window, {} with capacity, {} restriction(s) required",
        excluded.len(),
        with_capacity.len(),
        required.len()
    );

    let candidates: BTreeSet<_> = with_capacity.difference(&excluded).copied().collect();
    let available: Vec<_> = Database::get_restaurants(conn, &candidates)?
        .into_iter()
        .filter(|restaurant| qualifies(restaurant, &excluded, &with_capacity, &required))
        .collect();

    log::info!("Found {} available restaurant(s)", available.len());
    Ok(available)
}
