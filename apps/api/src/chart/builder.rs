//! Chart Builder: one categorical bar per missing skill.
//!
//! Bars all share one height: the chart shows which gaps exist, not how large
//! they are. Bar order follows `missing_skills`. The raster carries no text;
//! `ChartBar` records each bar's pixel geometry so the PDF assembler can place
//! the skill name under the bar and the learning path above it.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};

use crate::render::RenderError;
use crate::tailoring::models::TailoredVersion;

/// One pixel per PDF point at the placed size; bars are axis-aligned so this stays sharp.
pub const CHART_WIDTH_PX: u32 = 500;
pub const CHART_HEIGHT_PX: u32 = 300;

const MARGIN_X_PX: u32 = 20;
/// Bar tops sit here; the band above holds the learning-path captions.
const BAR_TOP_PX: u32 = 140;
/// Baseline; the band below holds the skill names.
const BASELINE_PX: u32 = 260;
const BAR_FILL_RATIO: f32 = 0.6;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BAR_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const AXIS_COLOR: Rgb<u8> = Rgb([160, 160, 160]);

/// One bar and its pixel geometry (origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub skill: String,
    pub label: String,
    pub x_px: u32,
    pub width_px: u32,
    pub top_px: u32,
    pub bottom_px: u32,
    /// Horizontal slot the bar sits in; captions wrap to this width.
    pub slot_width_px: u32,
    pub slot_x_px: u32,
}

#[derive(Debug, Clone)]
pub struct SkillGapChart {
    /// 1-based version index.
    pub version_index: usize,
    pub title: String,
    pub bars: Vec<ChartBar>,
    pub width_px: u32,
    pub height_px: u32,
    pub png: Vec<u8>,
}

/// Builds the chart for one version. `None` when the version has no skill gaps.
pub fn build_chart(
    version: &TailoredVersion,
    version_index: usize,
) -> Result<Option<SkillGapChart>, RenderError> {
    if version.missing_skills.is_empty() {
        return Ok(None);
    }

    let bars = layout_bars(version);
    let mut canvas = RgbImage::from_pixel(CHART_WIDTH_PX, CHART_HEIGHT_PX, BACKGROUND);

    for bar in &bars {
        fill_rect(
            &mut canvas,
            bar.x_px,
            bar.top_px,
            bar.width_px,
            bar.bottom_px - bar.top_px,
            BAR_COLOR,
        );
    }
    fill_rect(
        &mut canvas,
        MARGIN_X_PX,
        BASELINE_PX,
        CHART_WIDTH_PX - 2 * MARGIN_X_PX,
        2,
        AXIS_COLOR,
    );

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        canvas.as_raw(),
        CHART_WIDTH_PX,
        CHART_HEIGHT_PX,
        ColorType::Rgb8,
    )?;

    Ok(Some(SkillGapChart {
        version_index,
        title: format!("Career Roadmap Version {version_index}"),
        bars,
        width_px: CHART_WIDTH_PX,
        height_px: CHART_HEIGHT_PX,
        png,
    }))
}

/// Builds charts for every version, keeping index alignment with the input.
pub fn build_charts(
    versions: &[TailoredVersion],
) -> Result<Vec<Option<SkillGapChart>>, RenderError> {
    versions
        .iter()
        .enumerate()
        .map(|(i, v)| build_chart(v, i + 1))
        .collect()
}

fn layout_bars(version: &TailoredVersion) -> Vec<ChartBar> {
    let count = version.missing_skills.len() as u32;
    let plot_width = CHART_WIDTH_PX - 2 * MARGIN_X_PX;
    let slot_width = plot_width / count;
    let bar_width = ((slot_width as f32) * BAR_FILL_RATIO).round().max(1.0) as u32;

    version
        .skill_gaps()
        .enumerate()
        .map(|(i, (skill, path))| {
            let slot_x = MARGIN_X_PX + slot_width * i as u32;
            ChartBar {
                skill: skill.to_string(),
                label: path.to_string(),
                x_px: slot_x + slot_width.saturating_sub(bar_width) / 2,
                width_px: bar_width,
                top_px: BAR_TOP_PX,
                bottom_px: BASELINE_PX,
                slot_width_px: slot_width,
                slot_x_px: slot_x,
            }
        })
        .collect()
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
