//! Deck templating collaborator — the interface to the external document
//! rendering service.
//!
//! This service never touches office-document files. It builds a flat
//! [`DeckRequest`] — text placements keyed by opaque numeric field ids, a
//! target map hinting where each id lives in the template, and chart image
//! placements — and hands it to a [`DeckRenderer`]. Whether a field id exists
//! in the deployed template revision is the collaborator's problem.

pub mod builder;
pub mod handlers;

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// EMU conversions (English Metric Units, the office-document length base).
const EMU_PER_INCH: i64 = 914_400;
const EMU_PER_CM: i64 = 360_000;
const EMU_PER_PT: i64 = 12_700;
const EMU_PER_PX: i64 = 9_525; // assumes 96 DPI

/// Length unit for image bounding boxes and positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    In,
    Cm,
    Pt,
    Px,
}

impl LengthUnit {
    /// Converts a length in this unit to EMU.
    pub fn to_emu(self, value: f64) -> i64 {
        let per_unit = match self {
            LengthUnit::In => EMU_PER_INCH,
            LengthUnit::Cm => EMU_PER_CM,
            LengthUnit::Pt => EMU_PER_PT,
            LengthUnit::Px => EMU_PER_PX,
        };
        (value * per_unit as f64).round() as i64
    }
}

/// Character style for one text placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size_pt: u32,
    /// RGB color as `(r, g, b)`.
    pub color: (u8, u8, u8),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

/// One text write, addressed by an opaque numeric field id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPlacement {
    pub field_id: u32,
    pub text: String,
    pub style: TextStyle,
}

/// Where a field id lives in the template: the target element's name and the
/// slide the renderer should look on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRef {
    pub element_name: String,
    pub slide_index: usize,
}

/// One chart image, scaled to fit a bounding box anchored at `(pos_x, pos_y)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub slide_index: usize,
    /// PNG bytes, base64-encoded for JSON transport.
    pub image_b64: String,
    pub box_w: f64,
    pub box_h: f64,
    pub pos_x: f64,
    pub pos_y: f64,
    pub unit: LengthUnit,
}

/// The full flat request handed to the rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckRequest {
    pub texts: Vec<TextPlacement>,
    pub targets: BTreeMap<u32, TargetRef>,
    pub images: Vec<ImagePlacement>,
}

/// The rendering collaborator seam. Production uses [`HttpDeckRenderer`];
/// tests can swap in a stub.
#[async_trait]
pub trait DeckRenderer: Send + Sync {
    /// Renders the request into a binary document.
    async fn render(&self, request: &DeckRequest) -> Result<Bytes, AppError>;
}

/// POSTs the deck request to the rendering service configured via
/// `DECK_SERVICE_URL` and returns the rendered document bytes.
pub struct HttpDeckRenderer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeckRenderer {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

/// The wire form of the request: image boxes are pre-converted to EMU, the
/// base length unit the rendering service works in.
fn wire_body(request: &DeckRequest) -> serde_json::Value {
    let images: Vec<serde_json::Value> = request
        .images
        .iter()
        .map(|img| {
            serde_json::json!({
                "slide_index": img.slide_index,
                "image_b64": img.image_b64,
                "box_w_emu": img.unit.to_emu(img.box_w),
                "box_h_emu": img.unit.to_emu(img.box_h),
                "pos_x_emu": img.unit.to_emu(img.pos_x),
                "pos_y_emu": img.unit.to_emu(img.pos_y),
            })
        })
        .collect();
    serde_json::json!({
        "texts": request.texts,
        "targets": request.targets,
        "images": images,
    })
}

#[async_trait]
impl DeckRenderer for HttpDeckRenderer {
    async fn render(&self, request: &DeckRequest) -> Result<Bytes, AppError> {
        let url = format!("{}/render", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&wire_body(request))
            .send()
            .await
            .map_err(|e| AppError::Deck(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Deck(format!(
                "deck service returned {status}: {body}"
            )));
        }
        response
            .bytes()
            .await
            .map_err(|e| AppError::Deck(format!("reading deck service response failed: {e}")))
    }
}
