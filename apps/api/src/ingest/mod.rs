//! Resume ingestion: plain text from an uploaded PDF resume.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ResumeTextResponse {
    pub resume_text: String,
    pub line_count: usize,
}

/// Extracts text from PDF bytes. Blank or unreadable documents are validation errors.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, AppError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(AppError::Validation("Uploaded file is not a PDF".to_string()));
    }

    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!("PDF text extraction failed: {e}");
        AppError::Validation("Could not read text from the uploaded PDF".to_string())
    })?;

    let text = normalize(&text);
    if text.is_empty() {
        return Err(AppError::Validation(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Trims each line and collapses runs of blank lines to one.
fn normalize(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// POST /api/v1/resume/extract-text
///
/// Multipart upload with the PDF in the `file` field.
pub async fn handle_extract_resume_text(
    mut multipart: Multipart,
) -> Result<Json<ResumeTextResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        // pdf-extract is CPU-bound and may panic on malformed input.
        let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&bytes))
            .await
            .map_err(|_| AppError::Validation("Could not read text from the uploaded PDF".to_string()))??;

        let line_count = resume_text.lines().filter(|l| !l.is_empty()).count();
        info!("Extracted {line_count} resume lines from upload");

        return Ok(Json(ResumeTextResponse {
            resume_text,
            line_count,
        }));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}
