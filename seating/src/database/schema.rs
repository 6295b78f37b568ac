//! Database schema definitions and SQL constants.
//!
//! Timestamps are stored as Unix epoch seconds so interval comparisons are
//! plain integer comparisons.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Canonical dietary restrictions, referenced by diners and restaurants.
pub const CREATE_RESTRICTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS dietary_restrictions (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )";

/// Restaurants.
pub const CREATE_RESTAURANTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )";

/// Tables, each owned by exactly one restaurant.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS restaurant_tables (
        id INTEGER PRIMARY KEY,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
        capacity INTEGER NOT NULL CHECK (capacity > 0)
    )";

/// Diners. Home coordinates are optional and unused by matching.
pub const CREATE_DINERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS diners (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        home_latitude REAL,
        home_longitude REAL
    )";

/// Reservations occupy one table for a half-open interval `[start_at, end_at)`.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY,
        table_id INTEGER NOT NULL REFERENCES restaurant_tables(id),
        start_at INTEGER NOT NULL,
        end_at INTEGER NOT NULL,
        CHECK (end_at > start_at)
    )";

/// Restrictions required by each diner.
pub const CREATE_DINER_RESTRICTION_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS diner_dietary_restriction (
        diner_id INTEGER NOT NULL REFERENCES diners(id) ON DELETE CASCADE,
        dietary_restriction_id INTEGER NOT NULL REFERENCES dietary_restrictions(id),
        PRIMARY KEY (diner_id, dietary_restriction_id)
    )";

/// Restrictions accommodated by each restaurant.
pub const CREATE_RESTAURANT_RESTRICTION_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS restaurant_dietary_restriction (
        restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
        dietary_restriction_id INTEGER NOT NULL REFERENCES dietary_restrictions(id),
        PRIMARY KEY (restaurant_id, dietary_restriction_id)
    )";

/// Diners attending each reservation.
pub const CREATE_DINER_RESERVATION_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS diner_reservation (
        diner_id INTEGER NOT NULL REFERENCES diners(id),
        reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
        PRIMARY KEY (diner_id, reservation_id)
    )";

/// Rejects any reservation that would overlap another on the same table.
///
/// The allocator already checks for conflicts inside a write transaction;
/// this trigger keeps the invariant even for writers that bypass it.
pub const CREATE_NO_OVERLAP_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS reservations_no_overlap
    BEFORE INSERT ON reservations
    WHEN EXISTS (
        SELECT 1 FROM reservations
        WHERE table_id = NEW.table_id
          AND start_at < NEW.end_at
          AND end_at > NEW.start_at
    )
    BEGIN
        SELECT RAISE(ABORT, 'overlapping reservation for table');
    END";

/// Speeds up conflict lookups per table and time window.
pub const CREATE_RESERVATION_WINDOW_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_table_window
    ON reservations(table_id, start_at, end_at)";

/// Speeds up capacity lookups per restaurant.
pub const CREATE_TABLE_CAPACITY_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_restaurant_tables_capacity
    ON restaurant_tables(restaurant_id, capacity)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Every table the schema owns, in creation order.
pub const ALL_TABLES: &[&str] = &[
    CREATE_METADATA_TABLE,
    CREATE_RESTRICTIONS_TABLE,
    CREATE_RESTAURANTS_TABLE,
    CREATE_TABLES_TABLE,
    CREATE_DINERS_TABLE,
    CREATE_RESERVATIONS_TABLE,
    CREATE_DINER_RESTRICTION_TABLE,
    CREATE_RESTAURANT_RESTRICTION_TABLE,
    CREATE_DINER_RESERVATION_TABLE,
];
