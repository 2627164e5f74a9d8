//! Chart Renderer — deterministic pie charts for the stats slide.
//!
//! Input is an *ordered* slice of `(label, count)` pairs: palette colors are
//! assigned in input order, so a fixed input always produces the same
//! color-to-label mapping (the slide template relies on reproducible charts).
//!
//! Rendering rules:
//! - zero-count slices are dropped up front;
//! - an empty (or all-zero) input renders a single "No Data" placeholder slice;
//! - slices under 6% of the total draw their count outside the pie with a
//!   leader line instead of crowding the wedge;
//! - a legend below the pie enumerates every rendered label; the canvas grows
//!   vertically when an open-vocabulary input has more labels than the base
//!   height fits.

use std::f64::consts::PI;
use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

const WIDTH: u32 = 900;
/// Base canvas height; the legend can extend it (see [`canvas_height`]).
const HEIGHT: u32 = 760;

const LEGEND_TOP: i32 = 560;
const LEGEND_ROW_H: i32 = 22;
const LEGEND_PAD: u32 = 16;

/// Share of total below which a slice's count is drawn outside the pie.
const LEADER_LINE_THRESHOLD: f64 = 0.06;

/// Fixed qualitative palette, assigned to slices in input order and recycled
/// if the input has more labels than the palette.
const PALETTE: &[RGBColor] = &[
    RGBColor(48, 25, 52),    // deep purple
    RGBColor(0, 114, 178),   // blue
    RGBColor(230, 159, 0),   // orange
    RGBColor(0, 158, 115),   // green
    RGBColor(204, 121, 167), // mauve
    RGBColor(86, 180, 233),  // sky
    RGBColor(213, 94, 0),    // vermillion
    RGBColor(240, 228, 66),  // yellow
    RGBColor(120, 120, 120), // gray
];

/// Renders a pie chart as PNG bytes.
pub fn render_pie_png(slices: &[(String, u64)], title: &str) -> Result<Vec<u8>, ChartError> {
    let rendered: Vec<(&str, u64)> = slices
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    // Placeholder keeps the slide layout intact when a period has no data.
    let rendered = if rendered.is_empty() {
        vec![("No Data", 1u64)]
    } else {
        rendered
    };
    let total: u64 = rendered.iter().map(|(_, c)| c).sum();
    debug!(slices = rendered.len(), total, title, "rendering pie chart");

    let height = canvas_height(rendered.len());
    let mut buf = vec![0u8; (WIDTH * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (WIDTH, height)).into_drawing_area();
        root.fill(&WHITE).map_err(to_draw_err)?;

        let title_style = ("sans-serif", 28).into_font().color(&BLACK);
        root.draw(&Text::new(
            title.to_string(),
            (WIDTH as i32 / 2, 20),
            title_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(to_draw_err)?;

        let center = (WIDTH as i32 / 2, 300);
        let radius = 210.0f64;

        // Wedges start at 12 o'clock and advance clockwise.
        let mut angle = -PI / 2.0;
        for (idx, (_, count)) in rendered.iter().enumerate() {
            let share = *count as f64 / total as f64;
            let sweep = share * 2.0 * PI;
            let color = PALETTE[idx % PALETTE.len()];

            root.draw(&Polygon::new(
                wedge_points(center, radius, angle, angle + sweep),
                color.filled(),
            ))
            .map_err(to_draw_err)?;

            let mid = angle + sweep / 2.0;
            let label_style = ("sans-serif", 20).into_font().color(&BLACK);
            if share < LEADER_LINE_THRESHOLD {
                // Too thin for inside text: leader line out to a count label.
                let from = point_at(center, radius * 0.98, mid);
                let elbow = point_at(center, radius * 1.12, mid);
                let end = (
                    elbow.0 + if mid.cos() >= 0.0 { 24 } else { -24 },
                    elbow.1,
                );
                root.draw(&PathElement::new(vec![from, elbow, end], BLACK))
                    .map_err(to_draw_err)?;
                let anchor = if mid.cos() >= 0.0 {
                    HPos::Left
                } else {
                    HPos::Right
                };
                root.draw(&Text::new(
                    count.to_string(),
                    (end.0 + if mid.cos() >= 0.0 { 4 } else { -4 }, end.1),
                    label_style.pos(Pos::new(anchor, VPos::Center)),
                ))
                .map_err(to_draw_err)?;
            } else {
                let pos = point_at(center, radius * 0.62, mid);
                root.draw(&Text::new(
                    count.to_string(),
                    pos,
                    ("sans-serif", 20)
                        .into_font()
                        .color(&WHITE)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))
                .map_err(to_draw_err)?;
            }

            angle += sweep;
        }

        // Legend, one entry per line, below the pie.
        let legend_x = 80;
        let mut legend_y = LEGEND_TOP;
        for (idx, (label, _)) in rendered.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            root.draw(&Rectangle::new(
                [(legend_x, legend_y), (legend_x + 16, legend_y + 16)],
                color.filled(),
            ))
            .map_err(to_draw_err)?;
            root.draw(&Text::new(
                label.to_string(),
                (legend_x + 24, legend_y + 8),
                ("sans-serif", 18)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            ))
            .map_err(to_draw_err)?;
            legend_y += LEGEND_ROW_H;
        }

        root.present().map_err(to_draw_err)?;
    }

    encode_png(&buf, height)
}

/// The canvas height for a given legend length: the base height, extended when
/// the legend would otherwise run past the bottom edge.
fn canvas_height(legend_entries: usize) -> u32 {
    let needed = LEGEND_TOP as u32 + legend_entries as u32 * LEGEND_ROW_H as u32 + LEGEND_PAD;
    HEIGHT.max(needed)
}

fn wedge_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let mut points = vec![center];
    let steps = (((end - start) / PI * 180.0).ceil() as usize).max(2);
    for i in 0..=steps {
        let theta = start + (end - start) * i as f64 / steps as f64;
        points.push(point_at(center, radius, theta));
    }
    points
}

fn point_at(center: (i32, i32), radius: f64, theta: f64) -> (i32, i32) {
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 + (radius * theta.sin()).round() as i32,
    )
}

fn to_draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn encode_png(rgb: &[u8], height: u32) -> Result<Vec<u8>, ChartError> {
    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out).write_image(rgb, WIDTH, height, ColorType::Rgb8)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_dims(png: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(png).expect("valid PNG");
        (img.width(), img.height())
    }

    #[test]
    fn test_renders_valid_png() {
        let slices = vec![
            ("Academic Center".to_string(), 12),
            ("Community".to_string(), 5),
            ("Unknown".to_string(), 1),
        ];
        let png = render_pie_png(&slices, "Practice Settings").unwrap();
        assert_eq!(decode_dims(&png), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_empty_input_renders_no_data_placeholder() {
        let png = render_pie_png(&[], "Insight Categories").unwrap();
        assert_eq!(decode_dims(&png), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_all_zero_input_renders_no_data_placeholder() {
        let slices = vec![("Education".to_string(), 0), ("Other".to_string(), 0)];
        let png = render_pie_png(&slices, "Insight Categories").unwrap();
        assert_eq!(decode_dims(&png), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let slices = vec![
            ("Tier 1".to_string(), 3),
            ("Tier 2".to_string(), 7),
            ("Tier 3".to_string(), 1),
        ];
        let a = render_pie_png(&slices, "Tiers").unwrap();
        let b = render_pie_png(&slices, "Tiers").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_legend_grows_the_canvas() {
        let slices: Vec<(String, u64)> = (0..12)
            .map(|i| (format!("Setting {i}"), i + 1))
            .collect();
        let png = render_pie_png(&slices, "Practice Settings").unwrap();
        let (w, h) = decode_dims(&png);
        assert_eq!(w, WIDTH);
        assert!(h > HEIGHT);
        assert_eq!(h, canvas_height(12));
        // Every legend entry fits inside the grown canvas.
        assert!(LEGEND_TOP + 12 * LEGEND_ROW_H <= h as i32);
    }

    #[test]
    fn test_small_slice_under_threshold_still_renders() {
        // 1 of 100 → 1% share, takes the leader-line path.
        let slices = vec![("Big".to_string(), 99), ("Tiny".to_string(), 1)];
        let png = render_pie_png(&slices, "Split").unwrap();
        assert_eq!(decode_dims(&png), (WIDTH, HEIGHT));
    }
}
