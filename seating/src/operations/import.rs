//! CSV data loading for restaurants and diners.
//!
//! Restaurant endorsements and diner restrictions are free text and go
//! through [`restriction::resolve`](crate::restriction::resolve). A label
//! that matches nothing is logged and treated as "no restrictions" rather than
//! failing the whole import.

use std::collections::BTreeSet;
use std::io::Read;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::models::{Coordinates, RestrictionId};
use crate::restriction::{self, CANONICAL_RESTRICTIONS};

/// Counts of rows created by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Restaurants inserted.
    pub restaurants: usize,
    /// Tables inserted across all restaurants.
    pub tables: usize,
    /// Diners inserted.
    pub diners: usize,
}

impl ImportSummary {
    fn merge(self, other: Self) -> Self {
        Self {
            restaurants: self.restaurants + other.restaurants,
            tables: self.tables + other.tables,
            diners: self.diners + other.diners,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestaurantRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Endorsements", default)]
    endorsements: Option<String>,
    #[serde(rename = "No. of two-top tables", default)]
    two_top: Option<u32>,
    #[serde(rename = "No. of four-top tables", default)]
    four_top: Option<u32>,
    #[serde(rename = "No. of six-top tables", default)]
    six_top: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DinerRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Home Location", default)]
    home_location: Option<String>,
    #[serde(rename = "Dietary Restrictions", default)]
    dietary_restrictions: Option<String>,
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn row_error(source: &str, row: usize, message: impl std::fmt::Display) -> Error {
    Error::Validation {
        field: source.into(),
        message: format!("row {row}: {message}"),
    }
}

/// Resolves labels, downgrading "nothing matched" to an empty set.
fn resolve_or_empty(conn: &Connection, owner: &str, labels: &str) -> Result<BTreeSet<RestrictionId>> {
    match restriction::resolve(conn, labels) {
        Ok(resolved) => Ok(resolved.into_iter().map(|r| r.id).collect()),
        Err(e) if e.is_not_found() => {
            log::warn!("No known dietary restriction in '{labels}' for {owner}; importing without restrictions");
            Ok(BTreeSet::new())
        }
        Err(e) => Err(e),
    }
}

/// Parses `"longitude,latitude"`; blank means no home location.
fn parse_home_location(value: &str) -> std::result::Result<Option<Coordinates>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let (longitude, latitude) = value
        .split_once(',')
        .ok_or_else(|| format!("home location '{value}' is not 'longitude,latitude'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("home location '{value}': {e}"))
    };

    Ok(Some(Coordinates {
        latitude: parse(latitude)?,
        longitude: parse(longitude)?,
    }))
}

/// Inserts the canonical dietary restrictions. Safe to call repeatedly.
///
/// Returns the number of canonical restrictions.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn seed_restrictions(conn: &Connection) -> Result<usize> {
    for name in CANONICAL_RESTRICTIONS {
        Database::insert_restriction(conn, name)?;
    }
    log::debug!("Seeded {} dietary restrictions", CANONICAL_RESTRICTIONS.len());
    Ok(CANONICAL_RESTRICTIONS.len())
}

/// Imports restaurants and their tables from CSV.
///
/// Expected headers: `Name`, `Endorsements`, `No. of two-top tables`,
/// `No. of four-top tables`, `No. of six-top tables`. Missing or blank table
/// counts are zero.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the row for malformed input, or a
/// database error (e.g. a duplicate name).
pub fn import_restaurants<R: Read>(conn: &Connection, input: R) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for (index, record) in csv_reader(input).deserialize::<RestaurantRecord>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| row_error("restaurants", row, e))?;
        if record.name.is_empty() {
            return Err(row_error("restaurants", row, "name is empty"));
        }

        let restrictions = resolve_or_empty(
            conn,
            &record.name,
            record.endorsements.as_deref().unwrap_or_default(),
        )?;
        let restaurant_id = Database::insert_restaurant(conn, &record.name, &restrictions)?;

        for (capacity, count) in [
            (2, record.two_top),
            (4, record.four_top),
            (6, record.six_top),
        ] {
            for _ in 0..count.unwrap_or(0) {
                Database::insert_table(conn, restaurant_id, capacity)?;
                summary.tables += 1;
            }
        }
        summary.restaurants += 1;
    }

    log::info!(
        "Imported {} restaurant(s) with {} table(s)",
        summary.restaurants,
        summary.tables
    );
    Ok(summary)
}

/// Imports diners from CSV.
///
/// Expected headers: `Name`, `Home Location` (`"longitude,latitude"`),
/// `Dietary Restrictions`.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the row for malformed input, or a
/// database error (e.g. a duplicate name).
pub fn import_diners<R: Read>(conn: &Connection, input: R) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for (index, record) in csv_reader(input).deserialize::<DinerRecord>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| row_error("diners", row, e))?;
        if record.name.is_empty() {
            return Err(row_error("diners", row, "name is empty"));
        }

        let home = parse_home_location(record.home_location.as_deref().unwrap_or_default())
            .map_err(|message| row_error("diners", row, message))?;
        let restrictions = resolve_or_empty(
            conn,
            &record.name,
            record.dietary_restrictions.as_deref().unwrap_or_default(),
        )?;

        Database::insert_diner(conn, &record.name, home, &restrictions)?;
        summary.diners += 1;
    }

    log::info!("Imported {} diner(s)", summary.diners);
    Ok(summary)
}

/// Seeds restrictions and imports both files in a single transaction.
///
/// Either input may be omitted. On any error nothing is committed.
///
/// # Errors
///
/// See [`import_restaurants`] and [`import_diners`].
///
/// # Examples
///
/// ```
/// use seating::operations::load_data;
/// use seating::Database;
///
/// let mut db = Database::open_in_memory().unwrap();
/// let restaurants = "Name,Endorsements,No. of two-top tables\nLardo,Vegan-Friendly,2\n";
/// let diners = "Name,Home Location,Dietary Restrictions\nMichael,\"-99.1,19.4\",Vegan\n";
///
/// let summary = load_data(&mut db, Some(restaurants.as_bytes()), Some(diners.as_bytes())).unwrap();
/// assert_eq!((summary.restaurants, summary.tables, summary.diners), (1, 2, 1));
/// ```
pub fn load_data<R1: Read, R2: Read>(
    db: &mut Database,
    restaurants: Option<R1>,
    diners: Option<R2>,
) -> Result<ImportSummary> {
    let seconds = db.busy_timeout_secs();
    let tx = db.begin_transaction()?;

    seed_restrictions(&tx)?;
    let mut summary = ImportSummary::default();
    if let Some(input) = restaurants {
        summary = summary.merge(import_restaurants(&tx, input)?);
    }
    if let Some(input) = diners {
        summary = summary.merge(import_diners(&tx, input)?);
    }

    tx.commit()
        .map_err(|e| Error::from(e).with_lock_timeout(seconds))?;
    Ok(summary)
}
