//! Reporting date range — a human-readable span of the report dates present.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::analytics::{field, trimmed_string};

const DATE_FIELD: &str = "Report Date";
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Fallback when no row carries a parseable report date.
pub const NO_VALID_DATES: &str = "No valid dates";

/// Formats the earliest-to-latest span of `"Report Date"` values as
/// `"Month YYYY"` (single month) or `"Month YYYY - Month YYYY"`.
/// Unparseable or missing dates are skipped.
pub fn reporting_date_range(rows: &[Value]) -> String {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for row in rows {
        let raw = field(row, DATE_FIELD).map(trimmed_string).unwrap_or_default();
        if raw.is_empty() {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            dates.push(date);
        }
    }
    debug!(rows = rows.len(), parsed = dates.len(), "collected report dates");

    let (Some(earliest), Some(latest)) = (dates.iter().min(), dates.iter().max()) else {
        return NO_VALID_DATES.to_string();
    };

    let start = earliest.format("%B %Y").to_string();
    let end = latest.format("%B %Y").to_string();
    if start == end {
        start
    } else {
        format!("{start} - {end}")
    }
}
