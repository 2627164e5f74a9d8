//! Insight-category tally — a closed, multi-label vocabulary.
//!
//! Each row may flag any number of the fixed category columns with a `1`; a
//! single interaction routinely lands in several categories, so the counts
//! here intentionally overlap and do not sum to the interaction count.

use serde_json::Value;
use tracing::debug;

use crate::analytics::field;

/// The closed category vocabulary, in display order. Output always covers
/// every label, zero counts included.
pub const INSIGHT_CATEGORIES: &[&str] = &[
    "Access Insights",
    "Patient Management / Care Insights",
    "Clinical Development Insights",
    "Competitive Insights",
    "Product Insights (Drug Science)",
    "Education",
    "Logistics",
    "Other",
    "Adverse Event (AE) Insights",
];

/// Tallies category hits in display order. A field contributes +1 when its
/// value coerces to one (`1`, `1.0`, `"1"`, or `true`); anything else — other
/// numbers, non-numeric strings, missing fields — contributes 0.
pub fn insight_category_counts(rows: &[Value]) -> Vec<(String, u64)> {
    let mut counts = vec![0u64; INSIGHT_CATEGORIES.len()];
    for row in rows {
        for (i, col) in INSIGHT_CATEGORIES.iter().enumerate() {
            if field(row, col).map(is_flag_set).unwrap_or(false) {
                counts[i] += 1;
            }
        }
    }
    let total: u64 = counts.iter().sum();
    debug!(rows = rows.len(), total_hits = total, "tallied insight categories");
    INSIGHT_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .zip(counts)
        .collect()
}

/// Expresses a tally as percentages of total hits, in the same order.
/// An all-zero tally yields all-zero percentages, never a division error.
pub fn category_percentages(counts: &[(String, u64)]) -> Vec<(String, f64)> {
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    counts
        .iter()
        .map(|(label, c)| {
            let pct = if total == 0 {
                0.0
            } else {
                *c as f64 * 100.0 / total as f64
            };
            (label.clone(), pct)
        })
        .collect()
}

/// True when a category flag coerces to one. Loosely typed exports write the
/// flag as integer `1`, float `1.0`, string `"1"`, or boolean `true`.
fn is_flag_set(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<i64>() == Ok(1),
        Value::Bool(b) => *b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn count_for(counts: &[(String, u64)], label: &str) -> u64 {
        counts.iter().find(|(l, _)| l == label).map(|(_, c)| *c).unwrap()
    }

    #[test]
    fn test_overlap_is_permitted() {
        let rows = vec![json!({
            "Access Insights": 1,
            "Education": 1,
            "Logistics": 0
        })];
        let counts = insight_category_counts(&rows);
        assert_eq!(count_for(&counts, "Access Insights"), 1);
        assert_eq!(count_for(&counts, "Education"), 1);
        assert_eq!(count_for(&counts, "Logistics"), 0);
        let total: u64 = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_string_one_counts_everything_else_does_not() {
        let rows = vec![json!({
            "Access Insights": "1",
            "Education": "yes",
            "Logistics": 2,
            "Other": "1.0",
            "Competitive Insights": null
        })];
        let counts = insight_category_counts(&rows);
        assert_eq!(count_for(&counts, "Access Insights"), 1);
        assert_eq!(count_for(&counts, "Education"), 0);
        assert_eq!(count_for(&counts, "Logistics"), 0);
        assert_eq!(count_for(&counts, "Other"), 0);
        assert_eq!(count_for(&counts, "Competitive Insights"), 0);
    }

    #[test]
    fn test_float_one_and_bool_true_count() {
        let rows = vec![json!({
            "Access Insights": 1.0,
            "Education": true,
            "Logistics": false,
            "Other": 1.5
        })];
        let counts = insight_category_counts(&rows);
        assert_eq!(count_for(&counts, "Access Insights"), 1);
        assert_eq!(count_for(&counts, "Education"), 1);
        assert_eq!(count_for(&counts, "Logistics"), 0);
        assert_eq!(count_for(&counts, "Other"), 0);
    }

    #[test]
    fn test_output_is_in_display_order_with_zeros() {
        let counts = insight_category_counts(&[]);
        assert_eq!(counts.len(), INSIGHT_CATEGORIES.len());
        for ((label, count), expected) in counts.iter().zip(INSIGHT_CATEGORIES) {
            assert_eq!(label, expected);
            assert_eq!(*count, 0);
        }
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let rows = vec![
            json!({"Access Insights": 1, "Education": 1}),
            json!({"Education": 1}),
        ];
        let counts = insight_category_counts(&rows);
        let pcts = category_percentages(&counts);
        let sum: f64 = pcts.iter().map(|(_, p)| p).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn test_all_zero_tally_yields_zero_percentages() {
        let counts = insight_category_counts(&[]);
        let pcts = category_percentages(&counts);
        assert!(pcts.iter().all(|(_, p)| *p == 0.0));
    }

    #[test]
    fn test_non_object_rows_contribute_nothing() {
        let rows = vec![json!("stray"), json!(3)];
        let counts = insight_category_counts(&rows);
        assert!(counts.iter().all(|(_, c)| *c == 0));
    }
}
