//! Page planning: turns tailored versions into a list of pages of draw operations.
//!
//! Planning is pure and separate from PDF encoding so pagination can be tested
//! on plain data. `pdf::render_plan` replays a plan onto a `printpdf` document.
//!
//! # Page-break rules
//! - Cover page first, then every version starts on a fresh page.
//! - Before each line: if the cursor is below `BOTTOM_THRESHOLD_PT`, start a new page.
//! - A version's chart, when present, gets a page of its own after its text.

use chrono::NaiveDate;

use crate::chart::SkillGapChart;
use crate::render::font_metrics::{get_metrics, PdfFont};
use crate::render::RenderError;
use crate::tailoring::models::TailoredVersion;

// US Letter, in points.
pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;

const TOP_Y_PT: f32 = PAGE_HEIGHT_PT - 50.0;
const BOTTOM_THRESHOLD_PT: f32 = 50.0;
const RIGHT_MARGIN_PT: f32 = 50.0;

const LABEL_X_PT: f32 = 50.0;
const VALUE_X_PT: f32 = 200.0;
const ITEM_X_PT: f32 = 60.0;

const COVER_TITLE_SIZE: f32 = 20.0;
const COVER_SUBTITLE_SIZE: f32 = 14.0;
const COVER_DATE_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

const HEADING_ADVANCE_PT: f32 = 30.0;
const FIELD_ADVANCE_PT: f32 = 20.0;
const ITEM_ADVANCE_PT: f32 = 15.0;
const BULLET_ADVANCE_PT: f32 = 12.0;

pub const CHART_X_PT: f32 = 50.0;
pub const CHART_Y_PT: f32 = PAGE_HEIGHT_PT / 2.0 - 150.0;
pub const CHART_WIDTH_PT: f32 = 500.0;
pub const CHART_HEIGHT_PT: f32 = 300.0;
const CHART_TITLE_SIZE: f32 = 14.0;
const CAPTION_SIZE: f32 = 9.0;
const CAPTION_LEADING_PT: f32 = 11.0;
const MAX_CAPTION_LINES: usize = 10;
const SKILL_NAME_SIZE: f32 = 10.0;

pub const DOCUMENT_TITLE: &str = "CareerCraft AI Tailored Resumes";

// ────────────────────────────────────────────────────────────────────────────
// Plan types
// ────────────────────────────────────────────────────────────────────────────

/// One drawing instruction. Coordinates are PDF points, origin bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        font: PdfFont,
        size: f32,
    },
    /// Places the chart of the given 1-based version.
    Chart {
        version_index: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedPage {
    pub ops: Vec<DrawOp>,
}

impl PlannedPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Chart { .. } => None,
        })
    }

    pub fn chart(&self) -> Option<usize> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Chart { version_index, .. } => Some(*version_index),
            DrawOp::Text { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub pages: Vec<PlannedPage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct PageCursor {
    pages: Vec<PlannedPage>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![PlannedPage::default()],
            y: TOP_Y_PT,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(PlannedPage::default());
        self.y = TOP_Y_PT;
    }

    fn ensure_room(&mut self) {
        if self.y < BOTTOM_THRESHOLD_PT {
            self.new_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text_at(&mut self, text: impl Into<String>, x: f32, y: f32, font: PdfFont, size: f32) {
        self.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            font,
            size,
        });
    }

    fn line(&mut self, text: impl Into<String>, x: f32, font: PdfFont, size: f32, advance: f32) {
        self.ensure_room();
        let y = self.y;
        self.text_at(text, x, y, font, size);
        self.y -= advance;
    }

    /// Wraps `text` to the space right of `x` and draws each piece as its own line.
    fn wrapped(&mut self, text: &str, x: f32, font: PdfFont, size: f32, advance: f32) {
        let width = PAGE_WIDTH_PT - RIGHT_MARGIN_PT - x;
        for piece in get_metrics(font).wrap(text, size, width) {
            self.line(piece, x, font, size, advance);
        }
    }

    /// Bold label at the left margin with a regular value column beside it.
    fn field(&mut self, label: &str, value: &str) {
        self.ensure_room();
        let y = self.y;
        self.text_at(label, LABEL_X_PT, y, PdfFont::HelveticaBold, BODY_SIZE);

        let width = PAGE_WIDTH_PT - RIGHT_MARGIN_PT - VALUE_X_PT;
        let pieces = get_metrics(PdfFont::Helvetica).wrap(value, BODY_SIZE, width);
        for (i, piece) in pieces.into_iter().enumerate() {
            if i > 0 {
                self.y -= ITEM_ADVANCE_PT;
                self.ensure_room();
            }
            let y = self.y;
            self.text_at(piece, VALUE_X_PT, y, PdfFont::Helvetica, BODY_SIZE);
        }
        self.y -= FIELD_ADVANCE_PT;
    }

    fn centered(&mut self, text: &str, y: f32, font: PdfFont, size: f32) {
        let width = get_metrics(font).measure_pt(text, size);
        let x = ((PAGE_WIDTH_PT - width) / 2.0).max(LABEL_X_PT);
        self.text_at(text, x, y, font, size);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Planning
// ────────────────────────────────────────────────────────────────────────────

/// Plans the whole document. `charts[i]` belongs to `versions[i]`.
pub fn plan_document(
    versions: &[TailoredVersion],
    charts: &[Option<SkillGapChart>],
    candidate_name: &str,
    generated_on: NaiveDate,
) -> Result<DocumentPlan, RenderError> {
    if versions.len() != charts.len() {
        return Err(RenderError::ChartCountMismatch {
            versions: versions.len(),
            charts: charts.len(),
        });
    }

    let mut cursor = PageCursor::new();
    plan_cover(&mut cursor, candidate_name, generated_on);

    for (i, (version, chart)) in versions.iter().zip(charts).enumerate() {
        let index = i + 1;
        cursor.new_page();
        plan_version(&mut cursor, version, index);

        if let Some(chart) = chart {
            if chart.version_index != index {
                return Err(RenderError::ChartOrder {
                    expected: index,
                    found: chart.version_index,
                });
            }
            cursor.new_page();
            plan_chart_page(&mut cursor, chart);
        }
    }

    Ok(DocumentPlan {
        pages: cursor.pages,
    })
}

fn plan_cover(cursor: &mut PageCursor, candidate_name: &str, generated_on: NaiveDate) {
    cursor.centered(
        DOCUMENT_TITLE,
        PAGE_HEIGHT_PT - 100.0,
        PdfFont::HelveticaBold,
        COVER_TITLE_SIZE,
    );
    cursor.centered(
        &format!("Candidate: {candidate_name}"),
        PAGE_HEIGHT_PT - 130.0,
        PdfFont::Helvetica,
        COVER_SUBTITLE_SIZE,
    );
    cursor.centered(
        &format!("Generated {}", generated_on.format("%B %-d, %Y")),
        PAGE_HEIGHT_PT - 150.0,
        PdfFont::Helvetica,
        COVER_DATE_SIZE,
    );
}

fn plan_version(cursor: &mut PageCursor, version: &TailoredVersion, index: usize) {
    cursor.line(
        format!("Tailored Resume Version {index}"),
        LABEL_X_PT,
        PdfFont::HelveticaBold,
        HEADING_SIZE,
        HEADING_ADVANCE_PT,
    );

    cursor.field("Top Skills Aligned:", &version.selected_skills.join(", "));
    cursor.field("Fit Score:", &format!("{}/100", version.fit_score));

    cursor.line(
        "Skill Gaps & Learning Paths:",
        LABEL_X_PT,
        PdfFont::HelveticaBold,
        BODY_SIZE,
        ITEM_ADVANCE_PT,
    );
    for (skill, path) in version.skill_gaps() {
        cursor.wrapped(
            &format!("- {skill}: {path}"),
            ITEM_X_PT,
            PdfFont::Helvetica,
            BODY_SIZE,
            ITEM_ADVANCE_PT,
        );
    }

    cursor.line(
        "Improved Bullets:",
        LABEL_X_PT,
        PdfFont::HelveticaBold,
        BODY_SIZE,
        ITEM_ADVANCE_PT,
    );
    for line in version.version_text.lines() {
        if line.trim().is_empty() {
            cursor.ensure_room();
            cursor.y -= BULLET_ADVANCE_PT;
            continue;
        }
        cursor.wrapped(
            line,
            ITEM_X_PT,
            PdfFont::Helvetica,
            BODY_SIZE,
            BULLET_ADVANCE_PT,
        );
    }
}

fn plan_chart_page(cursor: &mut PageCursor, chart: &SkillGapChart) {
    cursor.centered(
        &chart.title,
        CHART_Y_PT + CHART_HEIGHT_PT + 20.0,
        PdfFont::HelveticaBold,
        CHART_TITLE_SIZE,
    );
    cursor.push(DrawOp::Chart {
        version_index: chart.version_index,
        x: CHART_X_PT,
        y: CHART_Y_PT,
        width: CHART_WIDTH_PT,
        height: CHART_HEIGHT_PT,
    });

    let scale = CHART_WIDTH_PT / chart.width_px as f32;
    let to_page_y = |px: u32| CHART_Y_PT + (chart.height_px.saturating_sub(px)) as f32 * scale;

    for bar in &chart.bars {
        let slot_x = CHART_X_PT + bar.slot_x_px as f32 * scale;
        let slot_width = bar.slot_width_px as f32 * scale;
        let caption_width = (slot_width - 4.0).max(CAPTION_SIZE);

        // Learning path above the bar, bottom line closest to the bar.
        let caption: Vec<String> = get_metrics(PdfFont::Helvetica)
            .wrap(&bar.label, CAPTION_SIZE, caption_width)
            .into_iter()
            .take(MAX_CAPTION_LINES)
            .collect();
        let bar_top = to_page_y(bar.top_px) + 4.0;
        let count = caption.len();
        for (i, piece) in caption.into_iter().enumerate() {
            let y = bar_top + (count - 1 - i) as f32 * CAPTION_LEADING_PT;
            let w = get_metrics(PdfFont::Helvetica).measure_pt(&piece, CAPTION_SIZE);
            cursor.text_at(
                piece,
                slot_x + (slot_width - w).max(0.0) / 2.0,
                y,
                PdfFont::Helvetica,
                CAPTION_SIZE,
            );
        }

        // Skill name under the baseline.
        let baseline = to_page_y(bar.bottom_px);
        let names = get_metrics(PdfFont::HelveticaBold).wrap(&bar.skill, SKILL_NAME_SIZE, caption_width);
        for (i, piece) in names.into_iter().enumerate() {
            let w = get_metrics(PdfFont::HelveticaBold).measure_pt(&piece, SKILL_NAME_SIZE);
            cursor.text_at(
                piece,
                slot_x + (slot_width - w).max(0.0) / 2.0,
                baseline - 14.0 - i as f32 * CAPTION_LEADING_PT,
                PdfFont::HelveticaBold,
                SKILL_NAME_SIZE,
            );
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
