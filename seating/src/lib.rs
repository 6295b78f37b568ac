#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # seating
//!
//! A library for matching groups of diners to restaurants and booking tables.
//!
//! Given a party and a start time, the engine finds every restaurant with a
//! large enough free table that accommodates the party's dietary
//! restrictions, books the smallest suitable table, and cancels bookings.
//! Double-booking is prevented by running the conflict check and the insert
//! in a single `SQLite` write transaction.
//!
//! ## Core Types
//!
//! - [`ReservationRequest`] and [`BookingRequest`]: validated inputs
//! - [`BookingPolicy`]: operator settings such as the reservation length
//! - [`BookingOutcome`]: a booked [`Reservation`] or "not available"
//! - [`Database`]: the store handle every operation takes
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use chrono::NaiveDate;
//! use seating::{find_available, BookingPolicy, Database, ReservationRequest};
//!
//! let db = Database::open_in_memory().unwrap();
//! let conn = db.connection();
//! let gluten_free = Database::insert_restriction(conn, "Gluten-Free").unwrap();
//! let restaurant =
//!     Database::insert_restaurant(conn, "Falling Piano", &BTreeSet::from([gluten_free])).unwrap();
//! Database::insert_table(conn, restaurant, 4).unwrap();
//! let diner = Database::insert_diner(conn, "Maeby", None, &BTreeSet::from([gluten_free])).unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2024, 8, 24).unwrap().and_hms_opt(19, 30, 0).unwrap();
//! let request = ReservationRequest::new(start, vec![diner]).unwrap();
//!
//! let restaurants = find_available(conn, &BookingPolicy::default(), &request).unwrap();
//! assert_eq!(restaurants[0].name, "Falling Piano");
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod request;
pub mod restriction;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use models::{
    Coordinates, DietaryRestriction, Diner, DinerId, Reservation, ReservationId, Restaurant,
    RestaurantId, RestrictionId, Table, TableId,
};
pub use operations::{book, cancel, find_available, BookingOutcome, ImportSummary};
pub use request::{BookingPolicy, BookingRequest, ReservationRequest, ValidationError};
