//! Seed records
//!
//! Records are kept as JSON maps: each content family carries different
//! attributes and the store persists whatever it is given.

use serde_json::{Map, Value};

/// Untyped key/value record from the seed dataset
pub type SeedRecord = Map<String, Value>;

/// The record's `slug`, if it is a non-empty string
pub fn slug_of(record: &SeedRecord) -> Option<&str> {
    record
        .get("slug")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Remove a slug-list field (e.g. `audienceSlugs`) from the record and return its strings
///
/// A missing field yields an empty list. Non-string items are dropped.
pub fn take_slugs(record: &mut SeedRecord, field: &str) -> Vec<String> {
    match record.remove(field) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
