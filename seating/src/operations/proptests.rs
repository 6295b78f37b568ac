//! Property-based tests for table selection and availability.
//!
//! These complement the scenario tests by checking the allocation invariants
//! over randomly generated table layouts and booking sequences.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::database::test_util::{at, create_test_database, seed_diner, seed_restaurant};
use crate::database::Database;
use crate::models::{intervals_overlap, Table};
use crate::operations::{book, find_available, select_best_fit, BookingOutcome};
use crate::request::{BookingPolicy, BookingRequest, ReservationRequest};

// ============================================================================
// STRATEGY DEFINITIONS
// ============================================================================

/// Tables with ids `1..=n` and capacities between 1 and 8.
fn tables_strategy() -> impl Strategy<Value = Vec<Table>> {
    prop::collection::vec(1u32..=8, 0..12).prop_map(|capacities| {
        capacities
            .into_iter()
            .enumerate()
            .map(|(index, capacity)| Table {
                id: i64::try_from(index).unwrap() + 1,
                restaurant_id: 1,
                capacity,
            })
            .collect()
    })
}

/// Start hours for a sequence of single-diner bookings.
fn booking_hours_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(10u32..=21, 1..10)
}

// ============================================================================
// PURE SELECTION PROPERTIES
// ============================================================================

proptest! {
    /// The chosen table seats the party, is free, and nothing free is smaller.
    #[test]
    fn prop_best_fit_is_minimal(
        tables in tables_strategy(),
        conflicting in prop::collection::btree_set(1i64..=12, 0..6),
        party_size in 1u32..=8,
    ) {
        let eligible: Vec<_> = tables
            .iter()
            .filter(|t| t.capacity >= party_size && !conflicting.contains(&t.id))
            .collect();

        match select_best_fit(&tables, &conflicting, party_size) {
            Some(chosen) => {
                prop_assert!(chosen.capacity >= party_size);
                prop_assert!(!conflicting.contains(&chosen.id));
                for other in &eligible {
                    prop_assert!(
                        (chosen.capacity, chosen.id) <= (other.capacity, other.id),
                        "table {:?} beats chosen {:?}", other, chosen
                    );
                }
            }
            None => prop_assert!(eligible.is_empty()),
        }
    }

    /// Overlap is symmetric and never holds for touching intervals.
    #[test]
    fn prop_overlap_symmetric(a in 0u32..22, len_a in 1u32..3, b in 0u32..22, len_b in 1u32..3) {
        let (s1, e1) = (at(a), at((a + len_a).min(23)));
        let (s2, e2) = (at(b), at((b + len_b).min(23)));
        prop_assume!(s1 < e1 && s2 < e2);

        prop_assert_eq!(intervals_overlap(s1, e1, s2, e2), intervals_overlap(s2, e2, s1, e1));
        if e1 == s2 {
            prop_assert!(!intervals_overlap(s1, e1, s2, e2));
        }
        if s1 == s2 {
            prop_assert!(intervals_overlap(s1, e1, s2, e2));
        }
    }
}

// ============================================================================
// STORE-BACKED PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// No sequence of bookings ever leaves two overlapping reservations on one table.
    #[test]
    fn prop_bookings_never_overlap(
        capacities in prop::collection::vec(1u32..=4, 1..4),
        hours in booking_hours_strategy(),
    ) {
        let mut db = create_test_database();
        let (restaurant, _) = seed_restaurant(&db, "Prop", &[], &capacities);
        let policy = BookingPolicy::default();

        for (index, hour) in hours.iter().enumerate() {
            let diner = seed_diner(&db, &format!("diner {index}"), &[]);
            let request = BookingRequest::new(
                restaurant,
                ReservationRequest::new(at(*hour), vec![diner]).unwrap(),
            );
            let outcome = book(&mut db, &policy, &request).unwrap();
            if let BookingOutcome::Booked(reservation) = outcome {
                prop_assert_eq!(reservation.end, policy.end_for(at(*hour)).unwrap());
            }
        }

        let reservations = Database::list_reservations(db.connection()).unwrap();
        for (i, a) in reservations.iter().enumerate() {
            for b in &reservations[i + 1..] {
                if a.table_id == b.table_id {
                    prop_assert!(!a.overlaps(b.start, b.end), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }

    /// Every restaurant returned by a search has capacity, no conflict and
    /// covers the party's restrictions.
    #[test]
    fn prop_found_restaurants_qualify(
        layouts in prop::collection::vec(
            (prop::collection::vec(1u32..=6, 1..3), prop::collection::btree_set(0usize..3, 0..3)),
            1..5,
        ),
        party in prop::collection::vec(prop::collection::btree_set(0usize..3, 0..2), 1..4),
        booked_hour in 14u32..=20,
        search_hour in 14u32..=20,
    ) {
        let db = create_test_database();
        let conn = db.connection();
        let restriction_ids: Vec<_> = ["Vegan", "Paleo", "Nut-Free"]
            .iter()
            .map(|name| Database::insert_restriction(conn, name).unwrap())
            .collect();
        let pick = |indices: &BTreeSet<usize>| -> Vec<i64> {
            indices.iter().map(|&i| restriction_ids[i]).collect()
        };

        let mut first_tables = Vec::new();
        for (index, (capacities, restrictions)) in layouts.iter().enumerate() {
            let (_, tables) =
                seed_restaurant(&db, &format!("restaurant {index}"), &pick(restrictions), capacities);
            first_tables.push(tables[0]);
        }
        Database::insert_reservation(
            conn,
            &crate::database::NewReservation {
                table_id: first_tables[0],
                start: at(booked_hour),
                end: at(booked_hour + 2),
                diner_ids: BTreeSet::new(),
            },
        )
        .unwrap();

        let diners: Vec<_> = party
            .iter()
            .enumerate()
            .map(|(index, restrictions)| seed_diner(&db, &format!("diner {index}"), &pick(restrictions)))
            .collect();
        let required = Database::diner_restriction_ids(conn, &diners.iter().copied().collect()).unwrap();
        let request = ReservationRequest::new(at(search_hour), diners).unwrap();
        let policy = BookingPolicy::default();
        let end = policy.end_for(at(search_hour)).unwrap();

        for restaurant in find_available(conn, &policy, &request).unwrap() {
            prop_assert!(restaurant.accommodates(&required));
            let tables = Database::get_tables_for_restaurant(conn, restaurant.id, request.party_size()).unwrap();
            prop_assert!(!tables.is_empty());
            let conflicting = Database::conflicting_restaurant_ids(conn, at(search_hour), end).unwrap();
            prop_assert!(!conflicting.contains(&restaurant.id));
        }
    }
}
