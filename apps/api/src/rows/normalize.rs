//! Field Normalizer — repairs two known upstream export defects in place.
//!
//! 1. Name fields arrive with an escaped split-quote artifact: a raw value
//!    equivalent to `Raj\" \"Singh` should read `Raj Singh`.
//! 2. The congress column header is sometimes truncated mid-name by the
//!    upstream CSV/JSON split, leaving the real value buried in a one-entry
//!    object keyed by the stray close-paren:
//!    `{"Congress Name (if applic": {")": "ASCO 2025"}}`.
//!
//! Both repairs are idempotent: normalizing already-clean rows is a no-op.

use serde_json::{Map, Value};
use tracing::debug;

/// Name fields the split-quote artifact is known to hit.
const NAME_FIELDS: &[&str] = &["MSL Name", "KOL Name"];

/// Canonical congress column header.
pub const CONGRESS_FIELD: &str = "Congress Name (if applic.)";
/// The truncated header variant produced by the upstream field-splitting bug.
const CONGRESS_FIELD_TRUNCATED: &str = "Congress Name (if applic";

/// Cleans a person-name string.
///
/// Collapses the two split-quote patterns (`\" \"` escaped and unescaped) into
/// a single space, unescapes remaining `\"` sequences, strips enclosing
/// quotes, and collapses internal whitespace runs.
pub fn clean_person_name(raw: &str) -> String {
    let s = raw.replace("\\\" \\\"", " ").replace("\" \"", " ");
    let s = s.replace("\\\"", "\"");
    let s = s.trim_matches('"').trim();
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Repairs the congress field on one row object.
///
/// The truncated-key variant is rewritten under the canonical key (extracting
/// the first value of the nested map, empty string if the map is empty) and
/// the malformed key deleted. A nested one-entry map under the canonical key
/// (same defect, different trigger) unwraps in place.
pub fn repair_congress_field(row: &mut Map<String, Value>) {
    if let Some(val) = row.get(CONGRESS_FIELD) {
        if let Value::Object(inner) = val {
            let unwrapped = first_value_as_string(inner);
            row.insert(CONGRESS_FIELD.to_string(), Value::String(unwrapped));
        }
    } else if let Some(val) = row.remove(CONGRESS_FIELD_TRUNCATED) {
        let repaired = match val {
            Value::Object(inner) => Value::String(first_value_as_string(&inner)),
            other => other,
        };
        row.insert(CONGRESS_FIELD.to_string(), repaired);
    }
}

fn first_value_as_string(map: &Map<String, Value>) -> String {
    map.values()
        .next()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default()
}

/// Normalizes every row in place. Non-object rows are skipped (they carry no
/// fields to repair).
pub fn normalize_rows(rows: &mut [Value]) {
    let mut skipped = 0usize;
    for row in rows.iter_mut() {
        let Some(map) = row.as_object_mut() else {
            skipped += 1;
            continue;
        };
        for field in NAME_FIELDS {
            if let Some(Value::String(name)) = map.get(*field) {
                let cleaned = clean_person_name(name);
                map.insert((*field).to_string(), Value::String(cleaned));
            }
        }
        repair_congress_field(map);
    }
    debug!(rows = rows.len(), skipped, "normalized rows");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Known-bad name fixtures and their expected repairs.
    const NAME_FIXTURES: &[(&str, &str)] = &[
        ("Raj\\\" \\\"Singh", "Raj Singh"),
        ("Raj\" \"Singh", "Raj Singh"),
        ("\"Priya Patel\"", "Priya Patel"),
        ("  Dana   Wu  ", "Dana Wu"),
        ("Evelyn Cho", "Evelyn Cho"),
        ("", ""),
    ];

    #[test]
    fn test_clean_person_name_fixture_table() {
        for (raw, expected) in NAME_FIXTURES {
            assert_eq!(clean_person_name(raw), *expected, "input: {raw:?}");
        }
    }

    #[test]
    fn test_congress_truncated_key_repair() {
        let mut row = json!({"Congress Name (if applic": {")": "ASCO 2025"}});
        normalize_rows(std::slice::from_mut(&mut row));
        assert_eq!(row, json!({"Congress Name (if applic.)": "ASCO 2025"}));
    }

    #[test]
    fn test_congress_nested_map_under_canonical_key() {
        let mut row = json!({"Congress Name (if applic.)": {")": "ESMO 2025"}});
        normalize_rows(std::slice::from_mut(&mut row));
        assert_eq!(row["Congress Name (if applic.)"], "ESMO 2025");
    }

    #[test]
    fn test_congress_empty_nested_map_yields_empty_string() {
        let mut row = json!({"Congress Name (if applic": {}});
        normalize_rows(std::slice::from_mut(&mut row));
        assert_eq!(row[CONGRESS_FIELD], "");
    }

    #[test]
    fn test_truncated_key_with_plain_string_value() {
        let mut row = json!({"Congress Name (if applic": "ASH 2025"});
        normalize_rows(std::slice::from_mut(&mut row));
        assert_eq!(row, json!({"Congress Name (if applic.)": "ASH 2025"}));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut rows = vec![
            json!({
                "MSL Name": "Raj\\\" \\\"Singh",
                "KOL Name": "\"Priya Patel\"",
                "Congress Name (if applic": {")": "ASCO 2025"},
                "ID": "42"
            }),
            json!("non-object row"),
        ];
        normalize_rows(&mut rows);
        let once = rows.clone();
        normalize_rows(&mut rows);
        assert_eq!(rows, once);
    }

    #[test]
    fn test_clean_rows_are_untouched() {
        let mut rows = vec![json!({
            "MSL Name": "Dana Wu",
            "Congress Name (if applic.)": "ASCO 2025",
            "Tier": "1"
        })];
        let before = rows.clone();
        normalize_rows(&mut rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_non_string_name_field_is_left_alone() {
        let mut rows = vec![json!({"MSL Name": 7})];
        normalize_rows(&mut rows);
        assert_eq!(rows[0]["MSL Name"], 7);
    }
}
