//! Unique submitter (MSL) list — open vocabulary, cleaned and sorted.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::analytics::field;
use crate::rows::normalize::clean_person_name;

const SUBMITTER_FIELD: &str = "MSL Name";

/// Returns the alphabetically sorted list of distinct submitter names.
///
/// Names are run through [`clean_person_name`] before comparison, so raw
/// variants carrying the split-quote artifact dedup against their repaired
/// form. Blank names are skipped.
pub fn list_unique_submitters(rows: &[Value]) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        let Some(Value::String(raw)) = field(row, SUBMITTER_FIELD) else {
            continue;
        };
        let name = clean_person_name(raw);
        if !name.is_empty() {
            seen.insert(name);
        }
    }
    debug!(rows = rows.len(), unique = seen.len(), "listed submitters");
    seen.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorted_unique_cleaned() {
        let rows = vec![
            json!({"MSL Name": "Raj\\\" \\\"Singh"}),
            json!({"MSL Name": "Raj Singh"}),
            json!({"MSL Name": "Dana Wu"}),
        ];
        assert_eq!(list_unique_submitters(&rows), vec!["Dana Wu", "Raj Singh"]);
    }

    #[test]
    fn test_missing_blank_and_non_string_skipped() {
        let rows = vec![
            json!({}),
            json!({"MSL Name": ""}),
            json!({"MSL Name": 12}),
            json!("non-object row"),
        ];
        assert!(list_unique_submitters(&rows).is_empty());
    }
}
