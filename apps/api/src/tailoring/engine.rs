//! Tailoring Engine: produces one `TailoredVersion` per call.
//!
//! Flow: mode selection → build prompt → one chat-completion call → strict JSON
//! parse → invariant check. Any failure on the generative path falls back to
//! `mock_tailor` with the same inputs. There is exactly one fallback and no retry.

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, ChatModel, LlmClient};
use crate::tailoring::mock::mock_tailor;
use crate::tailoring::models::{
    InvariantViolation, MockReason, TailorOutcome, TailoredVersion, VersionSource,
};
use crate::tailoring::prompts::{SKILLS_HINT_PREFIX, TAILOR_PROMPT_TEMPLATE};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Holds the chat model for the process lifetime. `None` means permanent mock mode.
#[derive(Clone)]
pub struct TailoringEngine {
    model: Option<Arc<dyn ChatModel>>,
}

impl TailoringEngine {
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { model }
    }

    /// Uses the process-wide client, shared with the ping route. No client → mock only.
    pub fn from_client(client: Option<Arc<LlmClient>>) -> Self {
        Self::new(client.map(|c| c as Arc<dyn ChatModel>))
    }

    pub fn is_generative(&self) -> bool {
        self.model.is_some()
    }

    /// Tailors the resume to the job description.
    ///
    /// `resume_text` and `job_desc` must be non-empty; handlers enforce this.
    pub async fn tailor<R: Rng + Send>(
        &self,
        resume_text: &str,
        job_desc: &str,
        skills: &[String],
        mock: bool,
        rng: &mut R,
    ) -> TailorOutcome {
        let model = match (&self.model, mock) {
            (_, true) => return mocked(resume_text, skills, MockReason::Requested, rng),
            (None, false) => return mocked(resume_text, skills, MockReason::NoCredential, rng),
            (Some(model), false) => model,
        };

        let prompt = build_tailor_prompt(resume_text, job_desc, skills);

        let text = match model.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Tailoring call failed, falling back to mock mode: {e}");
                let reason = MockReason::ModelUnavailable(e.to_string());
                return mocked(resume_text, skills, reason, rng);
            }
        };

        match parse_tailored_version(&text) {
            Ok(version) => {
                info!(
                    "Generated tailored version: fit_score={}, gaps={}",
                    version.fit_score,
                    version.missing_skills.len()
                );
                TailorOutcome {
                    version,
                    source: VersionSource::Generated,
                }
            }
            Err(e) => {
                warn!(
                    "Model output rejected ({e}), falling back to mock mode: {:?}",
                    text.chars().take(80).collect::<String>()
                );
                let reason = MockReason::MalformedOutput(e.to_string());
                mocked(resume_text, skills, reason, rng)
            }
        }
    }
}

fn mocked<R: Rng + ?Sized>(
    resume_text: &str,
    skills: &[String],
    reason: MockReason,
    rng: &mut R,
) -> TailorOutcome {
    TailorOutcome {
        version: mock_tailor(resume_text, skills, rng),
        source: VersionSource::Mocked { reason },
    }
}

/// Builds the tailoring prompt. The skill hint is omitted when no skills were extracted.
pub fn build_tailor_prompt(resume_text: &str, job_desc: &str, skills: &[String]) -> String {
    let skills_hint = if skills.is_empty() {
        String::new()
    } else {
        format!("{SKILLS_HINT_PREFIX}{}", skills.join(", "))
    };

    TAILOR_PROMPT_TEMPLATE
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", resume_text)
        .replace("{job_desc}", job_desc)
        .replace("{skills_hint}", &skills_hint)
}

/// Parses model output strictly as JSON and checks the version invariants.
///
/// Markdown fences are stripped first; nothing looser than JSON is accepted.
pub fn parse_tailored_version(text: &str) -> Result<TailoredVersion, ParseError> {
    let version: TailoredVersion = serde_json::from_str(strip_json_fences(text))?;
    version.validate()?;
    Ok(version)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
