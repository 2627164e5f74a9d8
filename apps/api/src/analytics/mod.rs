//! Aggregators over normalized interaction rows.
//!
//! Every function here is a pure, read-only pass over `&[Value]`. Missing or
//! malformed fields degrade to skip/zero semantics — data quality never
//! raises. Rows that are not JSON objects simply carry no fields.

pub mod categories;
pub mod congresses;
pub mod dates;
pub mod handlers;
pub mod interactions;
pub mod settings;
pub mod stats;
pub mod submitters;
pub mod tiers;

use serde_json::Value;

/// Field access that tolerates non-object rows.
pub(crate) fn field<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    row.as_object().and_then(|map| map.get(key))
}

/// Coerces a field value to a trimmed string the way the export data needs:
/// strings trim, numbers format, everything else is treated as absent.
pub(crate) fn trimmed_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// The dedup key: a non-empty trimmed `"ID"` field. Rows without one never
/// collapse into another interaction.
pub(crate) fn interaction_id(row: &Value) -> Option<String> {
    let id = field(row, "ID").map(trimmed_string).unwrap_or_default();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interaction_id_string_and_numeric() {
        assert_eq!(interaction_id(&json!({"ID": " 42 "})), Some("42".into()));
        assert_eq!(interaction_id(&json!({"ID": 42})), Some("42".into()));
    }

    #[test]
    fn test_interaction_id_absent_blank_or_non_object() {
        assert_eq!(interaction_id(&json!({"ID": ""})), None);
        assert_eq!(interaction_id(&json!({"ID": null})), None);
        assert_eq!(interaction_id(&json!({})), None);
        assert_eq!(interaction_id(&json!("scalar row")), None);
    }
}
