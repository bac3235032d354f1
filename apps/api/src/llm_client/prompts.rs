// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "STRICTLY OUTPUT VALID JSON, no extra text, no commentary. \
    Do NOT use markdown code fences.";

/// Connectivity check sent by the ping endpoint.
pub const PING_PROMPT: &str = "Say hello, CareerCraft AI is working!";
