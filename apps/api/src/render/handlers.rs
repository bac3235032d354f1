//! Axum route handlers for PDF export.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::chart::build_charts;
use crate::errors::AppError;
use crate::render::assemble_pdf;
use crate::tailoring::models::TailoredVersion;

pub const EXPORT_FILE_NAME: &str = "CareerCraft_Resumes.pdf";
const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

#[derive(Debug, Deserialize)]
pub struct ExportPdfRequest {
    #[serde(default)]
    pub candidate_name: String,
    pub versions: Vec<TailoredVersion>,
}

/// POST /api/v1/export/pdf
///
/// Builds one chart per version with skill gaps and returns the assembled PDF.
/// Versions are rendered in request order.
pub async fn handle_export_pdf(
    Json(request): Json<ExportPdfRequest>,
) -> Result<Response, AppError> {
    for (i, version) in request.versions.iter().enumerate() {
        version
            .validate()
            .map_err(|e| AppError::Validation(format!("Version {}: {e}", i + 1)))?;
    }

    let candidate_name = match request.candidate_name.trim() {
        "" => DEFAULT_CANDIDATE_NAME.to_string(),
        name => name.to_string(),
    };
    let versions = request.versions;
    let version_count = versions.len();

    let pdf = tokio::task::spawn_blocking(move || {
        let charts = build_charts(&versions)?;
        assemble_pdf(&versions, &charts, &candidate_name, Utc::now().date_naive())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    info!("Exported {version_count} version(s) as {} byte PDF", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
