//! Stats Composer — merges every aggregator into the record the slide
//! templating layer consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::analytics::categories::{
    category_percentages, insight_category_counts, INSIGHT_CATEGORIES,
};
use crate::analytics::congresses::list_unique_congresses;
use crate::analytics::dates::reporting_date_range;
use crate::analytics::interactions::count_unique_interactions;
use crate::analytics::settings::practice_setting_by_interaction;
use crate::analytics::submitters::list_unique_submitters;
use crate::analytics::tiers::tier_counts;
use crate::charts::{render_pie_png, ChartError};

/// The single fixed label counted as "academic"; every other discovered
/// setting (including "Unknown") sums into the community bucket.
pub const ACADEMIC_SETTING: &str = "Academic Center";

/// One `(label, count)` pair in fixed display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

/// One `(label, percent-of-total-hits)` pair, same order as the counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShare {
    pub label: String,
    pub percent: f64,
}

/// The final statistics record. Built fresh per request, never persisted.
/// Chart images are base64-encoded PNGs so the record serializes as plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRecord {
    pub report_id: Uuid,
    pub reporting_dates: String,
    pub total_interactions: usize,
    /// Interactions in the one fixed academic setting.
    pub academic_settings: u64,
    /// Every other setting, "Unknown" included.
    pub community_settings: u64,
    /// Total category hits across all rows (overlap counted).
    pub insight_count: u64,
    pub category_counts: Vec<CategoryCount>,
    pub category_percentages: Vec<CategoryShare>,
    /// KOL tier tally, nonzero tiers only.
    pub tier_counts: Vec<CategoryCount>,
    pub deployed_msls: usize,
    pub submitters: Vec<String>,
    pub congresses: Vec<String>,
    /// Practice-setting pie, base64 PNG.
    pub settings_chart: String,
    /// Insight-category pie, base64 PNG.
    pub categories_chart: String,
}

/// Composes the full stats record from normalized rows, rendering both charts.
pub fn compose_stats(rows: &[Value]) -> Result<StatsRecord, ChartError> {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    let settings = practice_setting_by_interaction(rows);
    let academic_settings = settings.get(ACADEMIC_SETTING).copied().unwrap_or(0);
    let community_settings = settings
        .iter()
        .filter(|(label, _)| label.as_str() != ACADEMIC_SETTING)
        .map(|(_, count)| count)
        .sum();

    let categories = insight_category_counts(rows);
    let insight_count: u64 = categories.iter().map(|(_, c)| c).sum();

    // BTreeMap iteration gives the settings chart a stable label order; the
    // category chart follows the fixed display order.
    let settings_slices: Vec<(String, u64)> =
        settings.iter().map(|(l, c)| (l.clone(), *c)).collect();
    let settings_chart = render_pie_png(&settings_slices, "HCP Interactions by Practice Setting")?;
    let categories_chart = render_pie_png(&categories, "Insights by Category")?;

    let percentages = category_percentages(&categories);
    let submitters = list_unique_submitters(rows);
    let record = StatsRecord {
        report_id: Uuid::new_v4(),
        reporting_dates: reporting_date_range(rows),
        total_interactions: count_unique_interactions(rows),
        academic_settings,
        community_settings,
        insight_count,
        category_counts: categories
            .into_iter()
            .map(|(label, count)| CategoryCount { label, count })
            .collect(),
        category_percentages: percentages
            .into_iter()
            .map(|(label, percent)| CategoryShare { label, percent })
            .collect(),
        tier_counts: tier_summary(rows)
            .into_iter()
            .map(|(label, count)| CategoryCount { label, count })
            .collect(),
        deployed_msls: submitters.len(),
        submitters,
        congresses: list_unique_congresses(rows),
        settings_chart: STANDARD.encode(settings_chart),
        categories_chart: STANDARD.encode(categories_chart),
    };
    info!(
        report_id = %record.report_id,
        rows = rows.len(),
        interactions = record.total_interactions,
        insights = record.insight_count,
        "composed stats record"
    );
    Ok(record)
}

/// Flattens the tier tally into ordered `(label, count)` pairs.
fn tier_summary(rows: &[Value]) -> Vec<(String, u64)> {
    tier_counts(rows).into_iter().collect()
}
