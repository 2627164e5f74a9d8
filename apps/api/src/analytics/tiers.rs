//! Tier tally — extracts KOL tier 1/2/3 from loosely formatted values.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::analytics::{field, trimmed_string};

const TIER_FIELD: &str = "Tier";

/// Matches a tier digit in the forms the export actually produces:
/// `1`, `"1"`, `"Tier 1"`, `"T1"`, `"tier 2 KOL"` — the digit must be 1-3.
fn tier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(?:t(?:ier)?\s*)?([1-3])\b").expect("static regex"))
}

/// Tallies rows per extractable tier. Rows with no extractable tier are
/// skipped; only nonzero tiers appear, under human-readable `"Tier N"` labels.
pub fn tier_counts(rows: &[Value]) -> BTreeMap<String, u64> {
    let mut tally: BTreeMap<String, u64> = BTreeMap::new();
    let mut skipped = 0usize;
    for row in rows {
        let raw = field(row, TIER_FIELD).map(trimmed_string).unwrap_or_default();
        match extract_tier(&raw) {
            Some(digit) => *tally.entry(format!("Tier {digit}")).or_insert(0) += 1,
            None => skipped += 1,
        }
    }
    debug!(rows = rows.len(), skipped, tiers = tally.len(), "tallied tiers");
    tally
}

fn extract_tier(raw: &str) -> Option<char> {
    tier_pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}
