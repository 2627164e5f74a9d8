//! Builds the [`DeckRequest`] for the quarterly insights template.
//!
//! Field ids and element names here mirror one specific template revision;
//! the renderer resolves them, and unresolvable ids are its problem, not ours
//! (see the module docs in [`crate::deck`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::stats::StatsRecord;
use crate::deck::{DeckRequest, ImagePlacement, LengthUnit, TargetRef, TextPlacement, TextStyle};
use crate::prompting::InsightTheme;

// Template geography.
const STATS_SLIDE: usize = 3;
/// Theme slides in [`InsightTheme::ALL`] order.
const THEME_SLIDES: [usize; 3] = [4, 5, 6];

// Stats-slide field ids.
const FIELD_REPORTING_DATES: u32 = 203;
const FIELD_DEPLOYED_MSLS: u32 = 238;
const FIELD_HCP_TOTALS: u32 = 276;
const FIELD_INSIGHT_COUNT: u32 = 27;
const FIELD_CONGRESS_LIST: u32 = 235;

// Per-theme-slide field id trios (theme 1/2/3 on the first theme slide).
// Later theme slides use the same layout offset by +100 per slide, keeping
// every field id unique across the request.
const FIELDS_THEME_HEADER: [u32; 3] = [73, 74, 75];
const FIELDS_GAP_DEFINITION: [u32; 3] = [60, 64, 65];
const FIELDS_QUOTES: [u32; 3] = [71, 83, 92];
const FIELDS_ROOT_CAUSES: [u32; 3] = [79, 88, 97];
const THEME_SLIDE_ID_STRIDE: u32 = 100;

// Template colors.
const PLUM: (u8, u8, u8) = (48, 25, 52);
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// Sources bundled into every theme by construction (the three seed records),
/// added to the discovered supporting-source count in theme headers.
const BASE_SOURCES: usize = 3;

/// One quoted insight backing a theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeQuote {
    pub id: String,
    pub quote: String,
}

/// Caller-supplied narrative for one theme on a theme slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeNarrative {
    pub gap_definition: String,
    pub representative_quotes: Vec<ThemeQuote>,
    pub root_cause_questions: Vec<String>,
    #[serde(default)]
    pub other_sources: Vec<String>,
}

/// The full per-theme narrative content, one list of (up to three) themes per
/// analysis theme. Produced upstream by the caller's prompt-chain run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeReport {
    pub educational_communication: Vec<ThemeNarrative>,
    pub clinical_practice: Vec<ThemeNarrative>,
    pub competitive_intelligence: Vec<ThemeNarrative>,
}

impl ThemeReport {
    fn narratives_for(&self, theme: InsightTheme) -> &[ThemeNarrative] {
        match theme {
            InsightTheme::EducationalCommunication => &self.educational_communication,
            InsightTheme::ClinicalPractice => &self.clinical_practice,
            InsightTheme::CompetitiveIntelligence => &self.competitive_intelligence,
        }
    }
}

fn body_style(size_pt: u32, color: (u8, u8, u8)) -> TextStyle {
    TextStyle {
        font_family: "Century Gothic".to_string(),
        font_size_pt: size_pt,
        color,
        bold: None,
        italic: Some(false),
    }
}

fn header_style() -> TextStyle {
    TextStyle {
        font_family: "Century Gothic Bold".to_string(),
        font_size_pt: 14,
        color: PLUM,
        bold: None,
        italic: Some(false),
    }
}

/// Builds the complete deck request: stats-slide placements, both chart
/// images, and the three theme slides.
pub fn build_deck_request(stats: &StatsRecord, themes: &ThemeReport) -> DeckRequest {
    let mut texts: Vec<TextPlacement> = Vec::new();
    let mut targets: BTreeMap<u32, TargetRef> = BTreeMap::new();

    let place = |texts: &mut Vec<TextPlacement>,
                 targets: &mut BTreeMap<u32, TargetRef>,
                 field_id: u32,
                 slide: usize,
                 element: &str,
                 text: String,
                 style: TextStyle| {
        texts.push(TextPlacement {
            field_id,
            text,
            style,
        });
        targets.insert(
            field_id,
            TargetRef {
                element_name: element.to_string(),
                slide_index: slide,
            },
        );
    };

    // Stats slide.
    place(
        &mut texts,
        &mut targets,
        FIELD_REPORTING_DATES,
        STATS_SLIDE,
        "ReportingDates",
        stats.reporting_dates.clone(),
        body_style(10, WHITE),
    );
    place(
        &mut texts,
        &mut targets,
        FIELD_DEPLOYED_MSLS,
        STATS_SLIDE,
        "DeployedMSLs",
        stats.deployed_msls.to_string(),
        body_style(10, WHITE),
    );
    place(
        &mut texts,
        &mut targets,
        FIELD_HCP_TOTALS,
        STATS_SLIDE,
        "HcpTotals",
        format!(
            "Total: {}\nAcademic Setting HCPs: {}\nCommunity Setting HCPs: {}",
            stats.total_interactions, stats.academic_settings, stats.community_settings
        ),
        body_style(10, WHITE),
    );
    place(
        &mut texts,
        &mut targets,
        FIELD_INSIGHT_COUNT,
        STATS_SLIDE,
        "InsightCount",
        stats.insight_count.to_string(),
        body_style(10, WHITE),
    );
    place(
        &mut texts,
        &mut targets,
        FIELD_CONGRESS_LIST,
        STATS_SLIDE,
        "CongressList",
        stats.congresses.join("\n"),
        body_style(10, WHITE),
    );

    // Theme slides, one per analysis theme.
    for (ord, (theme, slide)) in InsightTheme::ALL.into_iter().zip(THEME_SLIDES).enumerate() {
        let offset = ord as u32 * THEME_SLIDE_ID_STRIDE;
        let narratives = themes.narratives_for(theme);
        for (idx, narrative) in narratives.iter().take(3).enumerate() {
            let n = narrative.other_sources.len() + BASE_SOURCES;
            place(
                &mut texts,
                &mut targets,
                offset + FIELDS_THEME_HEADER[idx],
                slide,
                "ThemeHeader",
                format!("Theme {} (n={n})", idx + 1),
                header_style(),
            );
            place(
                &mut texts,
                &mut targets,
                offset + FIELDS_GAP_DEFINITION[idx],
                slide,
                "GapDefinition",
                narrative.gap_definition.clone(),
                body_style(9, WHITE),
            );
            let quotes = narrative
                .representative_quotes
                .iter()
                .map(|q| format!("id {}: '{}'", q.id, q.quote))
                .collect::<Vec<_>>()
                .join("\n");
            place(
                &mut texts,
                &mut targets,
                offset + FIELDS_QUOTES[idx],
                slide,
                "RepresentativeQuotes",
                quotes,
                body_style(9, PLUM),
            );
            let roots = narrative
                .root_cause_questions
                .iter()
                .enumerate()
                .map(|(i, q)| format!("{}: {q}", i + 1))
                .collect::<Vec<_>>()
                .join("\n");
            place(
                &mut texts,
                &mut targets,
                offset + FIELDS_ROOT_CAUSES[idx],
                slide,
                "RootCauses",
                roots,
                body_style(9, PLUM),
            );
        }
    }

    // Both charts sit on the stats slide in fixed 6x4in boxes.
    let images = vec![
        ImagePlacement {
            slide_index: STATS_SLIDE,
            image_b64: stats.settings_chart.clone(),
            box_w: 6.0,
            box_h: 4.0,
            pos_x: 4.0,
            pos_y: 2.0,
            unit: LengthUnit::In,
        },
        ImagePlacement {
            slide_index: STATS_SLIDE,
            image_b64: stats.categories_chart.clone(),
            box_w: 6.0,
            box_h: 4.0,
            pos_x: 8.2,
            pos_y: 2.0,
            unit: LengthUnit::In,
        },
    ];

    debug!(
        texts = texts.len(),
        images = images.len(),
        "built deck request"
    );
    DeckRequest {
        texts,
        targets,
        images,
    }
}
