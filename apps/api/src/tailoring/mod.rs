// Resume Tailoring Engine
// Implements: generative tailoring via llm_client, deterministic mock synthesis, fallback.
// All LLM calls go through llm_client; no direct OpenAI calls here.

pub mod engine;
pub mod handlers;
pub mod mock;
pub mod models;
pub mod prompts;

pub use engine::TailoringEngine;
