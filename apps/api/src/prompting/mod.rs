//! Prompt assembly — builds the multi-step analysis prompts for MSL
//! interaction records.
//!
//! The service never calls a model itself: the caller's orchestrator receives
//! assembled prompt text, runs the model, and posts each step's output back
//! for the next step of the chain (gaps → behaviors → needs → actions).

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::prompting::prompts::{
    FOLLOWUP_ACTIONS_PROMPT, FOLLOWUP_BEHAVIOR_PROMPT, FOLLOWUP_NEEDS_PROMPT,
    INITIAL_CLINICAL_PROMPT, INITIAL_COMPETITIVE_PROMPT, INITIAL_EDUCATION_PROMPT,
};

/// Columns stripped from rows before they are embedded in prompt text.
/// These carry identifying or compliance-sensitive content the model must
/// not see.
const REDACTED_FIELDS: &[&str] = &[
    "KOL Full Name",
    "Therapeutic Area",
    "Product Discussed",
    "MSL / Submitter Name",
    "Company Sponsored Research Details",
    "US: Unsolicited Request for Information",
];

const CATEGORY_FIELD: &str = "Insight Category";

/// The three analysis themes. Each theme gets its own initial prompt and its
/// own run of the follow-up chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTheme {
    EducationalCommunication,
    ClinicalPractice,
    CompetitiveIntelligence,
}

impl InsightTheme {
    pub const ALL: [InsightTheme; 3] = [
        InsightTheme::EducationalCommunication,
        InsightTheme::ClinicalPractice,
        InsightTheme::CompetitiveIntelligence,
    ];

    /// The `"Insight Category"` value that routes a row to this theme.
    pub fn category_value(self) -> &'static str {
        match self {
            InsightTheme::EducationalCommunication => "Educational and Communication",
            InsightTheme::ClinicalPractice => "Clinical Practice",
            InsightTheme::CompetitiveIntelligence => "Competitive Intelligence",
        }
    }

    fn initial_template(self) -> &'static str {
        match self {
            InsightTheme::EducationalCommunication => INITIAL_EDUCATION_PROMPT,
            InsightTheme::ClinicalPractice => INITIAL_CLINICAL_PROMPT,
            InsightTheme::CompetitiveIntelligence => INITIAL_COMPETITIVE_PROMPT,
        }
    }
}

/// Assembles the three initial prompts, one per theme, in [`InsightTheme::ALL`]
/// order. Rows are routed by their `"Insight Category"` value; rows with no
/// matching category (or no category at all) appear in no prompt. Redacted
/// fields are removed from copies — input rows are untouched.
pub fn initial_prompts(rows: &[Value], product: &str) -> Vec<String> {
    InsightTheme::ALL
        .iter()
        .map(|theme| {
            let themed: Vec<Value> = rows
                .iter()
                .filter(|row| {
                    row.get(CATEGORY_FIELD).and_then(Value::as_str)
                        == Some(theme.category_value())
                })
                .map(redact_row)
                .collect();
            debug!(theme = ?theme, rows = themed.len(), "assembled initial prompt");
            let body = serde_json::to_string_pretty(&themed).unwrap_or_else(|_| "[]".to_string());
            let template = theme.initial_template().replace("[Product]", product);
            format!("{template}{body}")
        })
        .collect()
}

/// Returns the follow-up template for chain step 2, 3, or 4 (step 1 is the
/// initial prompt). Out-of-range steps yield `None`.
pub fn followup_template(step: u8) -> Option<&'static str> {
    match step {
        2 => Some(FOLLOWUP_BEHAVIOR_PROMPT),
        3 => Some(FOLLOWUP_NEEDS_PROMPT),
        4 => Some(FOLLOWUP_ACTIONS_PROMPT),
        _ => None,
    }
}

/// Splices the previous step's full content ahead of the next step's template:
/// the chain carries the whole transcript forward.
pub fn assemble_followup(
    prev_content: &str,
    step: u8,
    theme: InsightTheme,
    product: &str,
) -> Option<String> {
    let template = followup_template(step)?
        .replace("{category}", theme.category_value())
        .replace("[Product]", product);
    Some(format!("{prev_content}\n\n{template}"))
}

fn redact_row(row: &Value) -> Value {
    match row {
        Value::Object(map) => {
            let filtered: serde_json::Map<String, Value> = map
                .iter()
                .filter(|(key, _)| !REDACTED_FIELDS.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Value::Object(filtered)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_rows() -> Vec<Value> {
        vec![
            json!({
                "Insight Category": "Educational and Communication",
                "Insight": "Dosing schedule confusion",
                "KOL Full Name": "Dr. Priya Patel"
            }),
            json!({
                "Insight Category": "Clinical Practice",
                "Insight": "Monitoring protocol unclear"
            }),
            json!({
                "Insight Category": "Competitive Intelligence",
                "Insight": "Comparator data misread"
            }),
            json!({"Insight": "Uncategorized row"}),
        ]
    }

    #[test]
    fn test_three_prompts_in_theme_order() {
        let prompts = initial_prompts(&fixture_rows(), "Drugex");
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("Dosing schedule confusion"));
        assert!(prompts[1].contains("Monitoring protocol unclear"));
        assert!(prompts[2].contains("Comparator data misread"));
    }

    #[test]
    fn test_redacted_fields_removed_input_untouched() {
        let rows = fixture_rows();
        let prompts = initial_prompts(&rows, "Drugex");
        assert!(!prompts[0].contains("Priya Patel"));
        // Input rows keep the field.
        assert_eq!(rows[0]["KOL Full Name"], "Dr. Priya Patel");
    }

    #[test]
    fn test_uncategorized_rows_appear_nowhere() {
        let prompts = initial_prompts(&fixture_rows(), "Drugex");
        assert!(prompts.iter().all(|p| !p.contains("Uncategorized row")));
    }

    #[test]
    fn test_product_substitution() {
        let prompts = initial_prompts(&fixture_rows(), "Drugex");
        assert!(prompts[2].contains("Drugex's positioning"));
        assert!(!prompts[2].contains("[Product]"));
    }

    #[test]
    fn test_followup_chain_steps() {
        let next = assemble_followup(
            "[PROMPT 1 OUTPUT] gaps...",
            2,
            InsightTheme::ClinicalPractice,
            "Drugex",
        )
        .unwrap();
        assert!(next.starts_with("[PROMPT 1 OUTPUT] gaps..."));
        assert!(next.contains("Clinical Practice gaps"));
        assert!(followup_template(1).is_none());
        assert!(followup_template(5).is_none());
    }
}
