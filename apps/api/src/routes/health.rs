use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{prompts::PING_PROMPT, LlmError, MODEL};
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and tailoring mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let mode = if state.engine.is_generative() {
        "generative"
    } else {
        "mock"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careercraft",
        "mode": mode
    }))
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub model: &'static str,
    pub reply: Option<String>,
    pub detail: Option<String>,
}

/// GET /api/v1/llm/ping
/// Sends one short prompt to the model. In mock-only mode nothing is sent.
pub async fn ping_handler(State(state): State<AppState>) -> Result<Json<PingResponse>, AppError> {
    let Some(llm) = state.llm.as_ref() else {
        return Ok(Json(PingResponse {
            ok: false,
            model: MODEL,
            reply: None,
            detail: Some("No OpenAI credential configured; running in mock mode".to_string()),
        }));
    };

    let response = llm.call(PING_PROMPT).await.map_err(|e| {
        warn!("LLM ping failed: {e}");
        e
    })?;
    let reply = response.text().ok_or(LlmError::EmptyContent)?.to_string();

    Ok(Json(PingResponse {
        ok: true,
        model: MODEL,
        reply: Some(reply),
        detail: None,
    }))
}
