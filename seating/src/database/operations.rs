//! Named queries over restaurants, tables, diners, restrictions and reservations.
//!
//! Every query is a static function taking a `&Connection`, so the same code
//! runs against a plain connection or inside a caller-held transaction
//! (`Transaction` derefs to `Connection`).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDateTime};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::{
    Coordinates, DietaryRestriction, Diner, DinerId, Reservation, ReservationId, Restaurant,
    RestaurantId, RestrictionId, Table, TableId,
};

use super::connection::Database;

/// Converts a naive timestamp to Unix epoch seconds for database storage.
///
/// The naive value is interpreted as UTC.
pub(crate) fn datetime_to_unix_secs(time: NaiveDateTime) -> i64 {
    time.and_utc().timestamp()
}

/// Converts Unix epoch seconds from the database back to a naive timestamp.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if `secs` is out of range.
pub(crate) fn unix_secs_to_datetime(secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or(Error::InvalidTimestamp { secs })
}

/// A reservation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// Table to occupy.
    pub table_id: TableId,
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
    /// Diners attending.
    pub diner_ids: BTreeSet<DinerId>,
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Escapes `LIKE` wildcards so user text only ever matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const SELECT_RESTAURANTS: &str = "SELECT id, name FROM restaurants ORDER BY id";

const SELECT_RESTAURANT: &str = "SELECT id, name FROM restaurants WHERE id = ?";

const SELECT_ALL_RESTAURANT_RESTRICTIONS: &str = r"
    SELECT restaurant_id, dietary_restriction_id
    FROM restaurant_dietary_restriction
";

const SELECT_RESTAURANT_RESTRICTIONS: &str = r"
    SELECT dietary_restriction_id
    FROM restaurant_dietary_restriction
    WHERE restaurant_id = ?
";

const SELECT_RESTAURANTS_WITH_CAPACITY: &str = r"
    SELECT DISTINCT restaurant_id
    FROM restaurant_tables
    WHERE capacity >= ?
";

const SELECT_TABLES_FOR_RESTAURANT: &str = r"
    SELECT id, restaurant_id, capacity
    FROM restaurant_tables
    WHERE restaurant_id = ? AND capacity >= ?
    ORDER BY capacity, id
";

const SELECT_CONFLICTING_RESTAURANTS: &str = r"
    SELECT DISTINCT t.restaurant_id
    FROM reservations r
    JOIN restaurant_tables t ON t.id = r.table_id
    WHERE r.start_at < ? AND r.end_at > ?
";

const SELECT_CONFLICTING_TABLES: &str = r"
    SELECT DISTINCT table_id
    FROM reservations
    WHERE start_at < ? AND end_at > ?
";

const SELECT_RESTRICTIONS_BY_PREFIX: &str = r"
    SELECT id, name
    FROM dietary_restrictions
    WHERE name LIKE ? || '%' ESCAPE '\'
    ORDER BY name DESC
";

const SELECT_RESTRICTIONS: &str = "SELECT id, name FROM dietary_restrictions ORDER BY name";

const INSERT_RESTRICTION: &str = r"
    INSERT INTO dietary_restrictions (name) VALUES (?)
    ON CONFLICT(name) DO NOTHING
";

const SELECT_RESTRICTION_ID: &str = "SELECT id FROM dietary_restrictions WHERE name = ?";

const INSERT_RESTAURANT: &str = "INSERT INTO restaurants (name) VALUES (?)";

const INSERT_RESTAURANT_RESTRICTION: &str = r"
    INSERT INTO restaurant_dietary_restriction (restaurant_id, dietary_restriction_id)
    VALUES (?, ?)
";

const INSERT_TABLE: &str = "INSERT INTO restaurant_tables (restaurant_id, capacity) VALUES (?, ?)";

const INSERT_DINER: &str = r"
    INSERT INTO diners (name, home_latitude, home_longitude)
    VALUES (?, ?, ?)
";

const INSERT_DINER_RESTRICTION: &str = r"
    INSERT INTO diner_dietary_restriction (diner_id, dietary_restriction_id)
    VALUES (?, ?)
";

const SELECT_RESERVATION: &str = r"
    SELECT id, table_id, start_at, end_at
    FROM reservations
    WHERE id = ?
";

const SELECT_RESERVATION_DINERS: &str = r"
    SELECT diner_id
    FROM diner_reservation
    WHERE reservation_id = ?
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, table_id, start_at, end_at
    FROM reservations
    ORDER BY start_at, id
";

const SELECT_ALL_RESERVATION_DINERS: &str =
    "SELECT reservation_id, diner_id FROM diner_reservation";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (table_id, start_at, end_at)
    VALUES (?, ?, ?)
";

const INSERT_DINER_RESERVATION: &str =
    "INSERT INTO diner_reservation (diner_id, reservation_id) VALUES (?, ?)";

const DELETE_DINER_RESERVATIONS: &str = "DELETE FROM diner_reservation WHERE reservation_id = ?";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

type ReservationRow = (ReservationId, TableId, i64, i64);

fn row_to_reservation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReservationRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn materialize_reservation(
    (id, table_id, start_secs, end_secs): ReservationRow,
    diner_ids: BTreeSet<DinerId>,
) -> Result<Reservation> {
    Ok(Reservation {
        id,
        table_id,
        start: unix_secs_to_datetime(start_secs)?,
        end: unix_secs_to_datetime(end_secs)?,
        diner_ids,
    })
}

fn row_to_restriction(row: &rusqlite::Row<'_>) -> rusqlite::Result<DietaryRestriction> {
    Ok(DietaryRestriction {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

impl Database {
    /// Lists every restaurant with its accommodated restrictions, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_restaurants(conn: &Connection) -> Result<Vec<Restaurant>> {
        let mut restrictions: BTreeMap<RestaurantId, BTreeSet<RestrictionId>> = BTreeMap::new();
        let mut stmt = conn.prepare(SELECT_ALL_RESTAURANT_RESTRICTIONS)?;
        let links = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        for link in links {
            let (restaurant_id, restriction_id) = link?;
            restrictions
                .entry(restaurant_id)
                .or_default()
                .insert(restriction_id);
        }

        let mut stmt = conn.prepare(SELECT_RESTAURANTS)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, RestaurantId>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut restaurants = Vec::new();
        for row in rows {
            let (id, name) = row?;
            restaurants.push(Restaurant {
                id,
                name,
                restrictions: restrictions.remove(&id).unwrap_or_default(),
            });
        }
        Ok(restaurants)
    }

    /// Fetches the restaurants with the given ids, ordered by id.
    ///
    /// Unknown ids are silently skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_restaurants(
        conn: &Connection,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<Vec<Restaurant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name FROM restaurants WHERE id IN ({}) ORDER BY id",
            placeholders(ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get::<_, RestaurantId>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut restaurants = Vec::with_capacity(ids.len());
        for row in rows {
            let (id, name) = row?;
            restaurants.push(Restaurant {
                id,
                name,
                restrictions: Self::restaurant_restriction_ids(conn, id)?,
            });
        }
        Ok(restaurants)
    }

    /// Fetches one restaurant, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_restaurant(conn: &Connection, id: RestaurantId) -> Result<Option<Restaurant>> {
        let row = conn
            .query_row(SELECT_RESTAURANT, [id], |row| {
                Ok((row.get::<_, RestaurantId>(0)?, row.get::<_, String>(1)?))
            })
            .optional()?;

        match row {
            Some((id, name)) => Ok(Some(Restaurant {
                id,
                name,
                restrictions: Self::restaurant_restriction_ids(conn, id)?,
            })),
            None => Ok(None),
        }
    }

    /// Restrictions accommodated by one restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn restaurant_restriction_ids(
        conn: &Connection,
        restaurant_id: RestaurantId,
    ) -> Result<BTreeSet<RestrictionId>> {
        let mut stmt = conn.prepare(SELECT_RESTAURANT_RESTRICTIONS)?;
        let ids = stmt
            .query_map([restaurant_id], |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    /// Restaurants owning at least one table seating `min_capacity` or more.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn restaurants_with_capacity(
        conn: &Connection,
        min_capacity: u32,
    ) -> Result<BTreeSet<RestaurantId>> {
        let mut stmt = conn.prepare(SELECT_RESTAURANTS_WITH_CAPACITY)?;
        let ids = stmt
            .query_map([min_capacity], |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    /// Tables of one restaurant seating `min_capacity` or more, smallest first.
    ///
    /// Ties on capacity are ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_tables_for_restaurant(
        conn: &Connection,
        restaurant_id: RestaurantId,
        min_capacity: u32,
    ) -> Result<Vec<Table>> {
        let mut stmt = conn.prepare(SELECT_TABLES_FOR_RESTAURANT)?;
        let tables = stmt
            .query_map(params![restaurant_id, min_capacity], |row| {
                Ok(Table {
                    id: row.get(0)?,
                    restaurant_id: row.get(1)?,
                    capacity: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tables)
    }

    /// Restaurants with any reservation overlapping `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn conflicting_restaurant_ids(
        conn: &Connection,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeSet<RestaurantId>> {
        let mut stmt = conn.prepare(SELECT_CONFLICTING_RESTAURANTS)?;
        let ids = stmt
            .query_map(
                params![datetime_to_unix_secs(end), datetime_to_unix_secs(start)],
                |row| row.get(0),
            )?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    /// Tables, across all restaurants, with a reservation overlapping `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn conflicting_table_ids(
        conn: &Connection,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeSet<TableId>> {
        let mut stmt = conn.prepare(SELECT_CONFLICTING_TABLES)?;
        let ids = stmt
            .query_map(
                params![datetime_to_unix_secs(end), datetime_to_unix_secs(start)],
                |row| row.get(0),
            )?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    /// Fetches diners by id with their restriction sets, ordered by id.
    ///
    /// Unknown ids are silently skipped; callers compare lengths to detect them.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_diners(conn: &Connection, ids: &BTreeSet<DinerId>) -> Result<Vec<Diner>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, home_latitude, home_longitude FROM diners WHERE id IN ({}) ORDER BY id",
            placeholders(ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            let latitude: Option<f64> = row.get(2)?;
            let longitude: Option<f64> = row.get(3)?;
            Ok((
                row.get::<_, DinerId>(0)?,
                row.get::<_, String>(1)?,
                latitude.zip(longitude).map(|(latitude, longitude)| Coordinates {
                    latitude,
                    longitude,
                }),
            ))
        })?;

        let mut diners = Vec::with_capacity(ids.len());
        for row in rows {
            let (id, name, home) = row?;
            diners.push(Diner {
                id,
                name,
                home,
                restrictions: Self::diner_restriction_ids(conn, &BTreeSet::from([id]))?,
            });
        }
        Ok(diners)
    }

    /// Union of the restrictions required by the given diners.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn diner_restriction_ids(
        conn: &Connection,
        ids: &BTreeSet<DinerId>,
    ) -> Result<BTreeSet<RestrictionId>> {
        if ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let sql = format!(
            "SELECT DISTINCT dietary_restriction_id FROM diner_dietary_restriction WHERE diner_id IN ({})",
            placeholders(ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let restrictions = stmt
            .query_map(params_from_iter(ids.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(restrictions)
    }

    /// Restrictions whose canonical name starts with `prefix`, by name descending.
    ///
    /// Matching is ASCII case-insensitive. `%` and `_` in the prefix match
    /// literally.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_restrictions_by_prefix(
        conn: &Connection,
        prefix: &str,
    ) -> Result<Vec<DietaryRestriction>> {
        let mut stmt = conn.prepare(SELECT_RESTRICTIONS_BY_PREFIX)?;
        let restrictions = stmt
            .query_map([escape_like(prefix)], row_to_restriction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(restrictions)
    }

    /// Lists every canonical restriction, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_restrictions(conn: &Connection) -> Result<Vec<DietaryRestriction>> {
        let mut stmt = conn.prepare(SELECT_RESTRICTIONS)?;
        let restrictions = stmt
            .query_map([], row_to_restriction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(restrictions)
    }

    /// Inserts a canonical restriction, returning its id.
    ///
    /// Inserting an existing name returns the existing id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn insert_restriction(conn: &Connection, name: &str) -> Result<RestrictionId> {
        conn.execute(INSERT_RESTRICTION, [name])?;
        let id = conn.query_row(SELECT_RESTRICTION_ID, [name], |row| row.get(0))?;
        Ok(id)
    }

    /// Inserts a restaurant with its accommodated restrictions.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or a restriction id is unknown.
    pub fn insert_restaurant(
        conn: &Connection,
        name: &str,
        restrictions: &BTreeSet<RestrictionId>,
    ) -> Result<RestaurantId> {
        conn.execute(INSERT_RESTAURANT, [name])?;
        let id = conn.last_insert_rowid();

        let mut stmt = conn.prepare(INSERT_RESTAURANT_RESTRICTION)?;
        for restriction_id in restrictions {
            stmt.execute(params![id, restriction_id])?;
        }
        Ok(id)
    }

    /// Inserts a table for a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a zero capacity, or a database error
    /// if the restaurant does not exist.
    pub fn insert_table(
        conn: &Connection,
        restaurant_id: RestaurantId,
        capacity: u32,
    ) -> Result<TableId> {
        if capacity == 0 {
            return Err(Error::Validation {
                field: "capacity".into(),
                message: format!("table for restaurant {restaurant_id} must seat at least one"),
            });
        }
        conn.execute(INSERT_TABLE, params![restaurant_id, capacity])?;
        Ok(conn.last_insert_rowid())
    }

    /// Inserts a diner with their required restrictions.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or a restriction id is unknown.
    pub fn insert_diner(
        conn: &Connection,
        name: &str,
        home: Option<Coordinates>,
        restrictions: &BTreeSet<RestrictionId>,
    ) -> Result<DinerId> {
        conn.execute(
            INSERT_DINER,
            params![
                name,
                home.map(|c| c.latitude),
                home.map(|c| c.longitude)
            ],
        )?;
        let id = conn.last_insert_rowid();

        let mut stmt = conn.prepare(INSERT_DINER_RESTRICTION)?;
        for restriction_id in restrictions {
            stmt.execute(params![id, restriction_id])?;
        }
        Ok(id)
    }

    /// Inserts a reservation and its diner links, returning the stored value.
    ///
    /// Callers are expected to hold a write transaction so that the links and
    /// the row commit together.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert is rejected, including when it
    /// would overlap an existing reservation on the same table.
    pub fn insert_reservation(conn: &Connection, new: &NewReservation) -> Result<Reservation> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                new.table_id,
                datetime_to_unix_secs(new.start),
                datetime_to_unix_secs(new.end)
            ],
        )?;
        let id = conn.last_insert_rowid();

        let mut stmt = conn.prepare(INSERT_DINER_RESERVATION)?;
        for diner_id in &new.diner_ids {
            stmt.execute(params![diner_id, id])?;
        }

        Ok(Reservation {
            id,
            table_id: new.table_id,
            start: new.start,
            end: new.end,
            diner_ids: new.diner_ids.clone(),
        })
    }

    /// Fetches one reservation with its diners, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let Some(row) = conn
            .query_row(SELECT_RESERVATION, [id], row_to_reservation_row)
            .optional()?
        else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(SELECT_RESERVATION_DINERS)?;
        let diner_ids = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;

        materialize_reservation(row, diner_ids).map(Some)
    }

    /// Deletes a reservation and its diner links.
    ///
    /// Returns `true` if a reservation was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation(conn: &Connection, id: ReservationId) -> Result<bool> {
        conn.execute(DELETE_DINER_RESERVATIONS, [id])?;
        let rows = conn.execute(DELETE_RESERVATION, [id])?;
        Ok(rows > 0)
    }

    /// Lists every reservation, ordered by start time then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let mut diners: BTreeMap<ReservationId, BTreeSet<DinerId>> = BTreeMap::new();
        let mut stmt = conn.prepare(SELECT_ALL_RESERVATION_DINERS)?;
        let links = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        for link in links {
            let (reservation_id, diner_id) = link?;
            diners.entry(reservation_id).or_default().insert(diner_id);
        }

        let mut stmt = conn.prepare(LIST_RESERVATIONS)?;
        let rows = stmt
            .query_map([], row_to_reservation_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|row| {
                let diner_ids = diners.remove(&row.0).unwrap_or_default();
                materialize_reservation(row, diner_ids)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{at, create_test_database};

    fn new_reservation(table_id: TableId, start: u32, end: u32) -> NewReservation {
        NewReservation {
            table_id,
            start: at(start),
            end: at(end),
            diner_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_timestamp_conversion() {
        let time = at(19);
        let secs = datetime_to_unix_secs(time);
        assert_eq!(unix_secs_to_datetime(secs).unwrap(), time);
        assert!(matches!(
            unix_secs_to_datetime(i64::MAX),
            Err(Error::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Gluten"), "Gluten");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn test_insert_restriction_is_idempotent() {
        let db = create_test_database();
        let conn = db.connection();
        let first = Database::insert_restriction(conn, "Vegan").unwrap();
        let second = Database::insert_restriction(conn, "Vegan").unwrap();
        assert_eq!(first, second);
        assert_eq!(Database::list_restrictions(conn).unwrap().len(), 1);
    }

    #[test]
    fn test_find_restrictions_by_prefix() {
        let db = create_test_database();
        let conn = db.connection();
        for name in ["Vegetarian", "Vegan", "Gluten-Free"] {
            Database::insert_restriction(conn, name).unwrap();
        }

        let names: Vec<_> = Database::find_restrictions_by_prefix(conn, "Veg")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Vegetarian", "Vegan"]);

        let gluten = Database::find_restrictions_by_prefix(conn, "gluten").unwrap();
        assert_eq!(gluten.len(), 1);

        assert!(Database::find_restrictions_by_prefix(conn, "%")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_restaurant_round_trip() {
        let db = create_test_database();
        let conn = db.connection();
        let vegan = Database::insert_restriction(conn, "Vegan").unwrap();
        let id = Database::insert_restaurant(conn, "Lardo", &BTreeSet::from([vegan])).unwrap();

        let restaurant = Database::get_restaurant(conn, id).unwrap().unwrap();
        assert_eq!(restaurant.name, "Lardo");
        assert_eq!(restaurant.restrictions, BTreeSet::from([vegan]));

        assert!(Database::get_restaurant(conn, id + 100).unwrap().is_none());
        assert_eq!(Database::list_restaurants(conn).unwrap(), vec![restaurant]);
    }

    #[test]
    fn test_get_restaurants_skips_unknown_ids() {
        let db = create_test_database();
        let conn = db.connection();
        let a = Database::insert_restaurant(conn, "A", &BTreeSet::new()).unwrap();
        let b = Database::insert_restaurant(conn, "B", &BTreeSet::new()).unwrap();

        let found = Database::get_restaurants(conn, &BTreeSet::from([b, a, 999])).unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(Database::get_restaurants(conn, &BTreeSet::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_insert_table_rejects_zero_capacity() {
        let db = create_test_database();
        let conn = db.connection();
        let restaurant = Database::insert_restaurant(conn, "A", &BTreeSet::new()).unwrap();
        let err = Database::insert_table(conn, restaurant, 0).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_tables_ordered_by_capacity_then_id() {
        let db = create_test_database();
        let conn = db.connection();
        let restaurant = Database::insert_restaurant(conn, "A", &BTreeSet::new()).unwrap();
        let six = Database::insert_table(conn, restaurant, 6).unwrap();
        let four_a = Database::insert_table(conn, restaurant, 4).unwrap();
        let four_b = Database::insert_table(conn, restaurant, 4).unwrap();
        let _two = Database::insert_table(conn, restaurant, 2).unwrap();

        let tables = Database::get_tables_for_restaurant(conn, restaurant, 3).unwrap();
        let ids: Vec<_> = tables.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![four_a, four_b, six]);

        assert_eq!(
            Database::restaurants_with_capacity(conn, 6).unwrap(),
            BTreeSet::from([restaurant])
        );
        assert!(Database::restaurants_with_capacity(conn, 7)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_diners_and_restriction_union() {
        let db = create_test_database();
        let conn = db.connection();
        let vegan = Database::insert_restriction(conn, "Vegan").unwrap();
        let paleo = Database::insert_restriction(conn, "Paleo").unwrap();
        let home = Coordinates {
            latitude: 19.4,
            longitude: -99.1,
        };
        let michael =
            Database::insert_diner(conn, "Michael", Some(home), &BTreeSet::from([vegan])).unwrap();
        let george = Database::insert_diner(conn, "George", None, &BTreeSet::from([paleo, vegan]))
            .unwrap();

        let diners = Database::get_diners(conn, &BTreeSet::from([michael, george, 42])).unwrap();
        assert_eq!(diners.len(), 2);
        assert_eq!(diners[0].home, Some(home));
        assert_eq!(diners[1].home, None);

        let union = Database::diner_restriction_ids(conn, &BTreeSet::from([michael, george]))
            .unwrap();
        assert_eq!(union, BTreeSet::from([vegan, paleo]));
    }

    #[test]
    fn test_reservation_lifecycle() {
        let db = create_test_database();
        let conn = db.connection();
        let restaurant = Database::insert_restaurant(conn, "A", &BTreeSet::new()).unwrap();
        let table = Database::insert_table(conn, restaurant, 2).unwrap();
        let diner = Database::insert_diner(conn, "Lucile", None, &BTreeSet::new()).unwrap();

        let mut new = new_reservation(table, 16, 18);
        new.diner_ids.insert(diner);
        let stored = Database::insert_reservation(conn, &new).unwrap();

        let fetched = Database::get_reservation(conn, stored.id).unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(Database::list_reservations(conn).unwrap(), vec![stored.clone()]);

        assert!(Database::delete_reservation(conn, stored.id).unwrap());
        assert!(!Database::delete_reservation(conn, stored.id).unwrap());
        assert!(Database::get_reservation(conn, stored.id).unwrap().is_none());
    }

    #[test]
    fn test_conflicting_ids_use_half_open_intervals() {
        let db = create_test_database();
        let conn = db.connection();
        let restaurant = Database::insert_restaurant(conn, "A", &BTreeSet::new()).unwrap();
        let table = Database::insert_table(conn, restaurant, 2).unwrap();
        Database::insert_reservation(conn, &new_reservation(table, 16, 18)).unwrap();

        assert_eq!(
            Database::conflicting_table_ids(conn, at(16), at(18)).unwrap(),
            BTreeSet::from([table])
        );
        assert_eq!(
            Database::conflicting_restaurant_ids(conn, at(17), at(19)).unwrap(),
            BTreeSet::from([restaurant])
        );
        assert!(Database::conflicting_table_ids(conn, at(18), at(20))
            .unwrap()
            .is_empty());
        assert!(Database::conflicting_restaurant_ids(conn, at(14), at(16))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_trigger_rejects_overlapping_insert() {
        let db = create_test_database();
        let conn = db.connection();
        let restaurant = Database::insert_restaurant(conn, "A", &BTreeSet::new()).unwrap();
        let table = Database::insert_table(conn, restaurant, 2).unwrap();
        let other = Database::insert_table(conn, restaurant, 2).unwrap();
        Database::insert_reservation(conn, &new_reservation(table, 16, 18)).unwrap();

        let err = Database::insert_reservation(conn, &new_reservation(table, 17, 19)).unwrap_err();
        assert!(err.is_store_failure());

        Database::insert_reservation(conn, &new_reservation(table, 18, 20)).unwrap();
        Database::insert_reservation(conn, &new_reservation(other, 17, 19)).unwrap();
    }
}
