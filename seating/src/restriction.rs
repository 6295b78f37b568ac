//! Dietary restriction resolution.
//!
//! Free-text labels such as `"Gluten Free, Vegan-Friendly"` are reduced to
//! their first word and matched by prefix against the canonical restriction
//! names stored in the database.

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::models::DietaryRestriction;

/// Separator between labels in a free-text list.
pub const LABEL_SEPARATOR: &str = ", ";

/// Canonical restrictions seeded into every new database.
pub const CANONICAL_RESTRICTIONS: &[&str] =
    &["Nut-Free", "Paleo", "Gluten-Free", "Vegetarian", "Vegan"];

/// Reduces a comma-separated label list to the first word of each label.
///
/// Spaces count as hyphens, so `"Gluten Free"` and `"Gluten-Free"` both
/// become `"Gluten"`. Empty results are dropped.
///
/// # Examples
///
/// ```
/// use seating::restriction::parse_first_names;
///
/// assert_eq!(
///     parse_first_names("Gluten Free, Vegan-Friendly, Paleo"),
///     vec!["Gluten", "Vegan", "Paleo"]
/// );
/// assert!(parse_first_names("  ").is_empty());
/// ```
#[must_use]
pub fn parse_first_names(labels: &str) -> Vec<String> {
    labels
        .split(LABEL_SEPARATOR)
        .filter_map(|label| {
            let normalized = label.trim().replace(' ', "-");
            let first = normalized.split('-').next().unwrap_or_default();
            (!first.is_empty()).then(|| first.to_string())
        })
        .collect()
}

/// Resolves free-text labels to canonical restrictions.
///
/// Results are deduplicated and ordered by name descending. Blank input
/// resolves to an empty list without touching the database.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the labels are non-blank but no canonical
/// restriction matches any of them, or a database error if a lookup fails.
///
/// # Examples
///
/// ```
/// use seating::{restriction, Database};
///
/// let db = Database::open_in_memory().unwrap();
/// seating::operations::seed_restrictions(db.connection()).unwrap();
///
/// let resolved = restriction::resolve(db.connection(), "Gluten Free Options").unwrap();
/// assert_eq!(resolved[0].name, "Gluten-Free");
/// ```
pub fn resolve(conn: &Connection, labels: &str) -> Result<Vec<DietaryRestriction>> {
    if labels.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut matched = BTreeMap::new();
    for name in parse_first_names(labels) {
        for restriction in Database::find_restrictions_by_prefix(conn, &name)? {
            matched.insert(restriction.id, restriction);
        }
    }

    if matched.is_empty() {
        return Err(Error::not_found(format!(
            "dietary restriction matching '{labels}'"
        )));
    }

    let mut resolved: Vec<_> = matched.into_values().collect();
    resolved.sort_by(|a, b| b.name.cmp(&a.name));
    log::debug!(
        "Resolved '{labels}' to {:?}",
        resolved.iter().map(|r| r.name.as_str()).collect::<Vec<_>>()
    );
    Ok(resolved)
}
