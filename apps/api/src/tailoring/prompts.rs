// LLM prompt constants for the tailoring engine.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Tailoring prompt template.
/// Replace: {json_only_instruction}, {resume_text}, {job_desc}, {skills_hint}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You are a professional career coach AI.
Given the resume and job description below, generate a tailored resume version.
{json_only_instruction}

Output format:
{
  "version_text": "Tailored resume text",
  "selected_skills": ["skill1", "skill2"],
  "fit_score": 0-100,
  "missing_skills": ["skill1", "skill2"],
  "learning_paths": ["recommended learning path for skill1", "recommended learning path for skill2"]
}

Rules:
1. `fit_score` is a single integer between 0 and 100
2. `learning_paths` has exactly one entry per `missing_skills` entry, in the same order

Resume:
{resume_text}

Job Description:
{job_desc}
{skills_hint}"#;

/// Prefix of the optional skill hint appended to the prompt.
pub const SKILLS_HINT_PREFIX: &str = "\nAvailable skills from GitHub/LinkedIn: ";
