//! Interaction count — distinct interactions across possibly-duplicated rows.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::analytics::interaction_id;

/// Counts distinct interactions: rows sharing a non-empty `"ID"` collapse to
/// one, and every row without an ID counts as its own interaction.
///
/// Invariant: `count == |distinct non-empty IDs| + |rows with no ID|`.
pub fn count_unique_interactions(rows: &[Value]) -> usize {
    let mut ids: HashSet<String> = HashSet::new();
    let mut missing = 0usize;
    for row in rows {
        match interaction_id(row) {
            Some(id) => {
                ids.insert(id);
            }
            None => missing += 1,
        }
    }
    debug!(
        rows = rows.len(),
        distinct = ids.len(),
        missing,
        "counted interactions"
    );
    ids.len() + missing
}
