//! Unique congress list — an open vocabulary discovered from the data.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::analytics::{field, trimmed_string};
use crate::rows::normalize::CONGRESS_FIELD;

/// The truncated header variant. Normalization repairs it, but this aggregator
/// tolerates un-normalized rows too.
const CONGRESS_FIELD_TRUNCATED: &str = "Congress Name (if applic";

/// Returns the alphabetically sorted list of distinct congress names.
/// Blank values (after cleaning) are skipped; exact string equality dedups.
pub fn list_unique_congresses(rows: &[Value]) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        let name = congress_of(row);
        if !name.is_empty() {
            seen.insert(name);
        }
    }
    debug!(rows = rows.len(), unique = seen.len(), "listed congresses");
    seen.into_iter().collect()
}

/// Extracts the congress name from one row, tolerating both the canonical and
/// truncated header, and the nested one-entry-map defect under either.
fn congress_of(row: &Value) -> String {
    let value = field(row, CONGRESS_FIELD).or_else(|| field(row, CONGRESS_FIELD_TRUNCATED));
    match value {
        Some(Value::Object(inner)) => inner.values().next().map(trimmed_string).unwrap_or_default(),
        Some(other) => trimmed_string(other),
        None => String::new(),
    }
}
