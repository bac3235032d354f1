use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_FIT_SCORE: u8 = 100;

/// One generated resume variant with scoring and skill-gap metadata.
///
/// Field names are the JSON contract the model is asked to emit.
/// Invariant: `missing_skills` and `learning_paths` are index-aligned and equal in length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredVersion {
    pub version_text: String,
    pub selected_skills: Vec<String>,
    pub fit_score: u8,
    pub missing_skills: Vec<String>,
    pub learning_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("fit_score {0} is above 100")]
    FitScoreOutOfRange(u8),

    #[error("{missing} missing skills but {paths} learning paths")]
    GapLengthMismatch { missing: usize, paths: usize },
}

impl TailoredVersion {
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.fit_score > MAX_FIT_SCORE {
            return Err(InvariantViolation::FitScoreOutOfRange(self.fit_score));
        }
        if self.missing_skills.len() != self.learning_paths.len() {
            return Err(InvariantViolation::GapLengthMismatch {
                missing: self.missing_skills.len(),
                paths: self.learning_paths.len(),
            });
        }
        Ok(())
    }

    /// Missing skills paired with their learning paths, in order.
    pub fn skill_gaps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.missing_skills
            .iter()
            .map(String::as_str)
            .zip(self.learning_paths.iter().map(String::as_str))
    }
}

/// Why a version came from the mock generator instead of the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MockReason {
    /// Caller asked for mock mode.
    Requested,
    /// No credential configured for this process.
    NoCredential,
    /// Request failed: network, auth, or rate limit.
    ModelUnavailable(String),
    /// Model answered but the text was not a valid `TailoredVersion`.
    MalformedOutput(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VersionSource {
    Generated,
    Mocked { reason: MockReason },
}

/// A tailored version plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct TailorOutcome {
    pub version: TailoredVersion,
    pub source: VersionSource,
}

impl TailorOutcome {
    /// Non-fatal notice for the user when generation degraded to mock mode.
    pub fn advisory(&self) -> Option<String> {
        match &self.source {
            VersionSource::Mocked {
                reason: MockReason::ModelUnavailable(_) | MockReason::MalformedOutput(_),
            } => Some("OpenAI returned an error or invalid JSON. Using mock mode.".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(fit_score: u8, missing: &[&str], paths: &[&str]) -> TailoredVersion {
        TailoredVersion {
            version_text: "Body".to_string(),
            selected_skills: vec!["Rust".to_string()],
            fit_score,
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            learning_paths: paths.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_version_passes() {
        assert!(version(80, &["Go"], &["Learn Go"]).validate().is_ok());
    }

    #[test]
    fn test_score_above_100_rejected() {
        assert_eq!(
            version(101, &[], &[]).validate(),
            Err(InvariantViolation::FitScoreOutOfRange(101))
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = version(50, &["Go", "Kafka"], &["Learn Go"]).validate().unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::GapLengthMismatch {
                missing: 2,
                paths: 1
            }
        );
    }

    #[test]
    fn test_skill_gaps_pairs_in_order() {
        let v = version(50, &["Go", "Kafka"], &["Learn Go", "Learn Kafka"]);
        let pairs: Vec<_> = v.skill_gaps().collect();
        assert_eq!(pairs, vec![("Go", "Learn Go"), ("Kafka", "Learn Kafka")]);
    }

    #[test]
    fn test_missing_field_fails_deserialization() {
        let bad_json = r#"{
            "version_text": "x",
            "selected_skills": [],
            "fit_score": 70,
            "missing_skills": []
        }"#;
        let result: Result<TailoredVersion, _> = serde_json::from_str(bad_json);
        assert!(result.is_err());
    }

    #[test]
    fn test_advisory_only_for_failures() {
        let ok = TailorOutcome {
            version: version(80, &[], &[]),
            source: VersionSource::Generated,
        };
        let requested = TailorOutcome {
            version: version(80, &[], &[]),
            source: VersionSource::Mocked {
                reason: MockReason::Requested,
            },
        };
        let failed = TailorOutcome {
            version: version(80, &[], &[]),
            source: VersionSource::Mocked {
                reason: MockReason::MalformedOutput("expected value".to_string()),
            },
        };
        assert!(ok.advisory().is_none());
        assert!(requested.advisory().is_none());
        assert!(failed.advisory().unwrap().contains("mock mode"));
    }

    #[test]
    fn test_source_serialization_shape() {
        let source = VersionSource::Mocked {
            reason: MockReason::ModelUnavailable("429".to_string()),
        };
        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["mode"], "mocked");
        assert_eq!(value["reason"]["kind"], "model_unavailable");
        assert_eq!(value["reason"]["detail"], "429");
    }
}
