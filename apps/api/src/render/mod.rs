// PDF export of tailored versions.
// Planning (layout) is pure; encoding (pdf) replays the plan with printpdf.
// CPU-bound rendering must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::chart::SkillGapChart;
use crate::tailoring::models::TailoredVersion;

pub use layout::{plan_document, DOCUMENT_TITLE};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("{versions} versions but {charts} chart slots")]
    ChartCountMismatch { versions: usize, charts: usize },

    #[error("chart for version {found} placed at version {expected}")]
    ChartOrder { expected: usize, found: usize },

    #[error("no chart available for version {0}")]
    MissingChart(usize),
}

/// Plans and encodes the full export: cover page, then each version in order.
pub fn assemble_pdf(
    versions: &[TailoredVersion],
    charts: &[Option<SkillGapChart>],
    candidate_name: &str,
    generated_on: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let plan = plan_document(versions, charts, candidate_name, generated_on)?;
    pdf::render_plan(&plan, charts, DOCUMENT_TITLE)
}
