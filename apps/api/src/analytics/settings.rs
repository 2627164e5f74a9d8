//! Practice-setting tally — counts interactions (not rows) per care setting.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::analytics::{field, interaction_id, trimmed_string};

const SETTING_FIELD: &str = "KOL Practice Setting";

/// Label assigned when a row carries no usable setting value.
pub const UNKNOWN_SETTING: &str = "Unknown";

/// Dedup key: real IDs and synthetic per-row slots are separate variants, so
/// an ID whose text happens to look like a synthetic key cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum InteractionKey {
    Real(String),
    Synthetic(usize),
}

/// Tallies interactions per practice setting.
///
/// Rows sharing the same non-empty ID collapse to a single interaction whose
/// setting is the *first-seen* value for that ID — later rows with the same ID
/// but a different setting are ignored. ID-less rows each count as their own
/// interaction. Blank or missing settings tally under [`UNKNOWN_SETTING`].
pub fn practice_setting_by_interaction(rows: &[Value]) -> BTreeMap<String, u64> {
    let mut setting_by_id: BTreeMap<InteractionKey, String> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        let key = interaction_id(row)
            .map(InteractionKey::Real)
            .unwrap_or_else(|| InteractionKey::Synthetic(idx));
        if setting_by_id.contains_key(&key) {
            continue; // first write wins
        }
        let setting = field(row, SETTING_FIELD)
            .map(trimmed_string)
            .unwrap_or_default();
        let setting = if setting.is_empty() {
            UNKNOWN_SETTING.to_string()
        } else {
            setting
        };
        setting_by_id.insert(key, setting);
    }

    let mut tally: BTreeMap<String, u64> = BTreeMap::new();
    for setting in setting_by_id.into_values() {
        *tally.entry(setting).or_insert(0) += 1;
    }
    debug!(rows = rows.len(), settings = tally.len(), "tallied practice settings");
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_seen_setting_wins_for_shared_id() {
        let rows = vec![
            json!({"ID": "42", "KOL Practice Setting": "Academic Center"}),
            json!({"ID": "42", "KOL Practice Setting": "Community"}),
        ];
        let tally = practice_setting_by_interaction(&rows);
        assert_eq!(tally.get("Academic Center"), Some(&1));
        assert_eq!(tally.get("Community"), None);
        assert_eq!(tally.values().sum::<u64>(), 1);
    }

    #[test]
    fn test_idless_rows_are_distinct_interactions() {
        let rows = vec![
            json!({"KOL Practice Setting": "Community"}),
            json!({"KOL Practice Setting": "Community"}),
        ];
        let tally = practice_setting_by_interaction(&rows);
        assert_eq!(tally.get("Community"), Some(&2));
    }

    #[test]
    fn test_blank_setting_becomes_unknown() {
        let rows = vec![
            json!({"ID": "1", "KOL Practice Setting": "  "}),
            json!({"ID": "2"}),
            json!("non-object row"),
        ];
        let tally = practice_setting_by_interaction(&rows);
        assert_eq!(tally.get(UNKNOWN_SETTING), Some(&3));
    }

    #[test]
    fn test_id_resembling_synthetic_key_stays_distinct() {
        // A literal "row:0" ID must not merge with the ID-less row at index 0.
        let rows = vec![
            json!({"KOL Practice Setting": "Community"}),
            json!({"ID": "row:0", "KOL Practice Setting": "Academic Center"}),
        ];
        let tally = practice_setting_by_interaction(&rows);
        assert_eq!(tally.get("Community"), Some(&1));
        assert_eq!(tally.get("Academic Center"), Some(&1));
        assert_eq!(tally.values().sum::<u64>(), 2);
    }

    #[test]
    fn test_total_matches_interaction_count() {
        use crate::analytics::interactions::count_unique_interactions;
        let rows = vec![
            json!({"ID": "1", "KOL Practice Setting": "Academic Center"}),
            json!({"ID": "1", "KOL Practice Setting": "Community"}),
            json!({"ID": "2", "KOL Practice Setting": "Community"}),
            json!({}),
        ];
        let tally = practice_setting_by_interaction(&rows);
        assert_eq!(
            tally.values().sum::<u64>() as usize,
            count_unique_interactions(&rows)
        );
    }
}
