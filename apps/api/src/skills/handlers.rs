//! Axum route handlers for skill extraction.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::skills::ExtractionReport;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub github_username: String,
    #[serde(default)]
    pub linkedin_url: String,
}

/// POST /api/v1/skills/extract
///
/// Always succeeds: failed sources show up as `failed` outcomes with no skills.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Json<ExtractionReport> {
    let report = state
        .extractor
        .extract_all(&request.github_username, &request.linkedin_url)
        .await;
    Json(report)
}
