use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::skills::SkillExtractor;
use crate::tailoring::TailoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Raw client for the connectivity check. `None` in mock-only mode.
    pub llm: Option<Arc<LlmClient>>,
    pub extractor: SkillExtractor,
    pub engine: TailoringEngine,
}
