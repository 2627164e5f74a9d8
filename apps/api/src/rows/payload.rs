//! Row Extractor — normalizes heterogeneous upstream payloads into an ordered
//! sequence of rows.
//!
//! Upstream orchestrators deliver interaction exports in several shapes: a bare
//! array, a `{"data": [...]}` wrapper, an n8n-style `{"items": [{"json": {...}}]}`
//! wrapper, a single object, or an opaque scalar. The shape is classified once
//! into a closed [`PayloadShape`] variant and decoded by one branch, instead of
//! type-sniffing scattered through the pipeline.
//!
//! Extraction never fails: every input degrades to *some* row sequence.
//! Non-object elements of an array payload pass through unchanged
//! (they behave as rows with no fields downstream) but are counted and logged.

use serde_json::{json, Value};
use tracing::{debug, warn};

/// The closed set of payload shapes the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Already an ordered sequence of rows.
    Sequence,
    /// Object wrapping the rows under a `"data"` array.
    ObjectWithData,
    /// Object wrapping the rows under an `"items"` array, each element
    /// optionally nesting the row under a `"json"` key.
    ObjectWithItems,
    /// An object matching no known wrapper — treated as a single row.
    PlainObject,
    /// A scalar (string, number, bool, null) — wrapped as a single row.
    Scalar,
}

/// Classifies a decoded payload value. Inspection happens exactly once;
/// the matching decode branch in [`extract_rows`] does the rest.
pub fn classify(value: &Value) -> PayloadShape {
    match value {
        Value::Array(_) => PayloadShape::Sequence,
        Value::Object(map) => {
            if map.get("data").map(Value::is_array).unwrap_or(false) {
                PayloadShape::ObjectWithData
            } else if map.get("items").map(Value::is_array).unwrap_or(false) {
                PayloadShape::ObjectWithItems
            } else {
                PayloadShape::PlainObject
            }
        }
        _ => PayloadShape::Scalar,
    }
}

/// Extracts an ordered sequence of rows from an already-decoded payload.
/// No input shape is an error; only an explicitly empty array (or an empty
/// wrapper around one) extracts to zero rows.
pub fn extract_rows(value: Value) -> Vec<Value> {
    let shape = classify(&value);
    let rows = match (shape, value) {
        (PayloadShape::Sequence, Value::Array(items)) => items,
        (PayloadShape::ObjectWithData, Value::Object(mut map)) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => unreachable!("classify guarantees a data array"),
        },
        (PayloadShape::ObjectWithItems, Value::Object(mut map)) => match map.remove("items") {
            Some(Value::Array(items)) => items.into_iter().map(unwrap_item).collect(),
            _ => unreachable!("classify guarantees an items array"),
        },
        (PayloadShape::PlainObject, obj) => vec![obj],
        (_, scalar) => vec![json!({ "value": scalar })],
    };

    let non_object = rows.iter().filter(|r| !r.is_object()).count();
    if non_object > 0 {
        // Permissive by contract: these pass through and aggregate as
        // field-less rows. Flagged here so bad upstream exports are visible.
        warn!(
            rows = rows.len(),
            non_object, "payload contains non-object rows"
        );
    }
    debug!(shape = ?shape, rows = rows.len(), "extracted rows");
    rows
}

/// Extracts rows from a raw text payload. The text is decoded as JSON first;
/// undecodable text becomes a single synthetic `{"text": ...}` row rather than
/// failing the pipeline.
pub fn extract_rows_from_text(text: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => extract_rows(value),
        Err(e) => {
            warn!(error = %e, "payload text is not valid JSON; wrapping as a single text row");
            vec![json!({ "text": text })]
        }
    }
}

/// Entry point for request bodies: a string payload goes through the text
/// decode path, anything else is extracted directly.
pub fn extract_rows_from_content(content: Value) -> Vec<Value> {
    match content {
        Value::String(text) => extract_rows_from_text(&text),
        other => extract_rows(other),
    }
}

/// Unwraps one element of an `items` array: `{"json": {...}}` yields the inner
/// object, anything else passes through as-is.
fn unwrap_item(item: Value) -> Value {
    match item {
        Value::Object(mut map) => match map.remove("json") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                // `json` key present but not an object — keep the wrapper intact.
                map.insert("json".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_all_variants() {
        assert_eq!(classify(&json!([1, 2])), PayloadShape::Sequence);
        assert_eq!(classify(&json!({"data": []})), PayloadShape::ObjectWithData);
        assert_eq!(
            classify(&json!({"items": []})),
            PayloadShape::ObjectWithItems
        );
        assert_eq!(classify(&json!({"ID": "1"})), PayloadShape::PlainObject);
        assert_eq!(classify(&json!("hello")), PayloadShape::Scalar);
        assert_eq!(classify(&json!(42)), PayloadShape::Scalar);
    }

    #[test]
    fn test_data_wins_over_items_when_both_present() {
        let rows = extract_rows(json!({
            "data": [{"ID": "1"}],
            "items": [{"json": {"ID": "2"}}]
        }));
        assert_eq!(rows, vec![json!({"ID": "1"})]);
    }

    #[test]
    fn test_sequence_passes_through_unchanged() {
        let rows = extract_rows(json!([{"ID": "1"}, {"ID": "2"}]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], json!({"ID": "1"}));
    }

    #[test]
    fn test_sequence_preserves_non_object_elements() {
        // Scalars mixed into a list payload pass through unchanged. Downstream
        // aggregators see them as rows with no fields (so no ID, no setting).
        let rows = extract_rows(json!([{"ID": "1"}, "stray", 7]));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], json!("stray"));
        assert_eq!(rows[2], json!(7));
    }

    #[test]
    fn test_items_wrapper_unwraps_json_subfield() {
        let rows = extract_rows(json!({
            "items": [
                {"json": {"ID": "1"}},
                {"json": "not-an-object"},
                {"ID": "3"}
            ]
        }));
        assert_eq!(rows[0], json!({"ID": "1"}));
        assert_eq!(rows[1], json!({"json": "not-an-object"}));
        assert_eq!(rows[2], json!({"ID": "3"}));
    }

    #[test]
    fn test_plain_object_is_a_single_row() {
        let rows = extract_rows(json!({"ID": "1", "Tier": "2"}));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["ID"], "1");
    }

    #[test]
    fn test_scalar_wraps_under_value_field() {
        let rows = extract_rows(json!(3.5));
        assert_eq!(rows, vec![json!({"value": 3.5})]);
    }

    #[test]
    fn test_text_payload_decodes_as_json() {
        let rows = extract_rows_from_text(r#"[{"ID": "1"}]"#);
        assert_eq!(rows, vec![json!({"ID": "1"})]);
    }

    #[test]
    fn test_undecodable_text_becomes_single_text_row() {
        let rows = extract_rows_from_text("just some notes, not JSON");
        assert_eq!(rows, vec![json!({"text": "just some notes, not JSON"})]);
    }

    #[test]
    fn test_non_sequence_shapes_always_yield_a_row() {
        assert_eq!(extract_rows(json!({})).len(), 1);
        assert_eq!(extract_rows(json!(null)).len(), 1);
        assert_eq!(extract_rows(json!(true)).len(), 1);
        // Empty arrays (and empty wrappers) legitimately extract to nothing.
        assert!(extract_rows(json!([])).is_empty());
        assert!(extract_rows(json!({"data": []})).is_empty());
    }
}
