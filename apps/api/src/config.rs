use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI credential. `None` puts the process in permanent mock mode.
    pub openai_api_key: Option<String>,
    /// Forces mock mode even when a credential is present.
    pub force_mock: bool,
    /// Seeds the mock generator per request so demo output is reproducible.
    pub mock_seed: Option<u64>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let force_mock = match optional_env("MOCK_MODE") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("MOCK_MODE must be a boolean, got '{raw}'"))?,
            None => false,
        };

        let mock_seed = optional_env("MOCK_SEED")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("MOCK_SEED must be an unsigned integer")?;

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            force_mock,
            mock_seed,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True when no generative call will ever be attempted for this process.
    pub fn mock_only(&self) -> bool {
        self.force_mock || self.openai_api_key.is_none()
    }
}

/// Reads an env var, treating unset and blank values the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>, force_mock: bool) -> Config {
        Config {
            openai_api_key: key.map(str::to_string),
            force_mock,
            mock_seed: None,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_missing_key_means_mock_only() {
        assert!(config(None, false).mock_only());
    }

    #[test]
    fn test_key_present_allows_generative_mode() {
        assert!(!config(Some("sk-test"), false).mock_only());
    }

    #[test]
    fn test_force_mock_overrides_key() {
        assert!(config(Some("sk-test"), true).mock_only());
    }

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
