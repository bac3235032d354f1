//! Axum route handlers for the Tailoring API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::skills::ExtractionReport;
use crate::state::AppState;
use crate::tailoring::models::{TailoredVersion, VersionSource};

pub const MIN_VERSIONS: u8 = 1;
pub const MAX_VERSIONS: u8 = 3;
pub const DEFAULT_VERSIONS: u8 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub resume_text: String,
    pub job_desc: String,
    #[serde(default)]
    pub github_username: String,
    #[serde(default)]
    pub linkedin_url: String,
    pub num_versions: Option<u8>,
    #[serde(default)]
    pub mock: bool,
    /// Overrides `MOCK_SEED` for this request.
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct VersionView {
    /// 1-based, matching the headings in the exported PDF.
    pub index: usize,
    pub version: TailoredVersion,
    pub source: VersionSource,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub extraction: ExtractionReport,
    pub versions: Vec<VersionView>,
    pub advisories: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Extracts profile skills, then tailors `num_versions` versions one after another.
/// Missing resume or job description is the only blocking error.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    if request.resume_text.trim().is_empty() || request.job_desc.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter both your resume and a job description.".to_string(),
        ));
    }

    let num_versions = request.num_versions.unwrap_or(DEFAULT_VERSIONS);
    if !(MIN_VERSIONS..=MAX_VERSIONS).contains(&num_versions) {
        return Err(AppError::Validation(format!(
            "num_versions must be between {MIN_VERSIONS} and {MAX_VERSIONS}"
        )));
    }

    let run_id = Uuid::new_v4();
    info!("Tailor run {run_id}: {num_versions} version(s)");

    let extraction = state
        .extractor
        .extract_all(&request.github_username, &request.linkedin_url)
        .await;
    let skills: Vec<String> = extraction.skills.iter().cloned().collect();

    let mut rng = match request.seed.or(state.config.mock_seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut versions = Vec::with_capacity(num_versions as usize);
    let mut advisories = Vec::new();

    // One model call at a time, in version order.
    for index in 1..=num_versions as usize {
        info!("Tailor run {run_id}: generating version {index}");
        let outcome = state
            .engine
            .tailor(
                &request.resume_text,
                &request.job_desc,
                &skills,
                request.mock,
                &mut rng,
            )
            .await;

        if let Some(advisory) = outcome.advisory() {
            advisories.push(format!("Version {index}: {advisory}"));
        }

        versions.push(VersionView {
            index,
            version: outcome.version,
            source: outcome.source,
        });
    }

    Ok(Json(TailorResponse {
        run_id,
        generated_at: Utc::now(),
        extraction,
        versions,
        advisories,
    }))
}
