//! Skill Extractor: scrapes skill names from GitHub and LinkedIn profile pages.
//!
//! Each source is a fixed endpoint template plus a CSS selector. Built URLs
//! must be https on the source's own domain; anything else is refused before
//! a request is made. Extraction never raises: absence of input and failure are both reported as an
//! `ExtractionOutcome`, and both yield an empty skill set to the caller.

use std::sync::Arc;

use reqwest::Url;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, warn};

use crate::skills::fetcher::{ExtractError, PageFetcher};
use crate::skills::SkillSet;

// ────────────────────────────────────────────────────────────────────────────
// Sources
// ────────────────────────────────────────────────────────────────────────────

/// A profile site to scrape: how to build the URL and which nodes hold skills.
#[derive(Debug, Clone, Copy)]
pub struct SkillSource {
    pub name: &'static str,
    /// `{identifier}` is substituted. `None` means the identifier is already a URL.
    pub url_template: Option<&'static str>,
    /// Built URLs must point at this host or one of its subdomains.
    pub allowed_domain: &'static str,
    pub selector: &'static str,
}

impl SkillSource {
    pub const GITHUB: SkillSource = SkillSource {
        name: "github",
        url_template: Some("https://github.com/{identifier}?tab=repositories"),
        allowed_domain: "github.com",
        selector: "span[itemprop=programmingLanguage]",
    };

    pub const LINKEDIN: SkillSource = SkillSource {
        name: "linkedin",
        url_template: None,
        allowed_domain: "linkedin.com",
        selector: ".pv-skill-category-entity__name-text",
    };

    /// Builds the page URL for `identifier`, refusing anything off the source's domain.
    pub fn url_for(&self, identifier: &str) -> Result<Url, ExtractError> {
        let raw = match self.url_template {
            Some(template) => template.replace("{identifier}", identifier),
            None => identifier.to_string(),
        };
        let url = Url::parse(&raw).map_err(|_| ExtractError::DisallowedUrl(raw.clone()))?;

        let host_allowed = url.host_str().is_some_and(|host| {
            let host = host.to_ascii_lowercase();
            host == self.allowed_domain
                || host
                    .strip_suffix(self.allowed_domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });
        if url.scheme() != "https" || !host_allowed || url.port().is_some() {
            return Err(ExtractError::DisallowedUrl(raw));
        }
        Ok(url)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcomes
// ────────────────────────────────────────────────────────────────────────────

/// Result of one extraction. Distinguishes "nothing asked" from "asked and failed".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    NoInput,
    Extracted { skills: SkillSet },
    Failed { source: String, reason: String },
}

impl ExtractionOutcome {
    /// The skills this outcome contributes. Empty for `NoInput` and `Failed`.
    pub fn skills(&self) -> SkillSet {
        match self {
            ExtractionOutcome::Extracted { skills } => skills.clone(),
            _ => SkillSet::new(),
        }
    }
}

/// Both sources' outcomes plus their union.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub github: ExtractionOutcome,
    pub linkedin: ExtractionOutcome,
    pub skills: SkillSet,
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SkillExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl SkillExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Extracts skills for one identifier from one source.
    ///
    /// Empty (or whitespace) identifiers return `NoInput` without a network call.
    pub async fn extract(&self, source: &SkillSource, identifier: &str) -> ExtractionOutcome {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return ExtractionOutcome::NoInput;
        }

        let result = match source.url_for(identifier) {
            Ok(url) => {
                debug!("Extracting {} skills from {}", source.name, url);
                self.fetcher
                    .fetch(url.as_str())
                    .await
                    .and_then(|body| parse_skills(&body, source.selector))
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(skills) => {
                debug!("Extracted {} {} skills", skills.len(), source.name);
                ExtractionOutcome::Extracted { skills }
            }
            Err(e) => {
                warn!("Skill extraction from {} failed: {e}", source.name);
                ExtractionOutcome::Failed {
                    source: source.name.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Runs both sources sequentially and unions their skills.
    pub async fn extract_all(&self, github_username: &str, linkedin_url: &str) -> ExtractionReport {
        let github = self.extract(&SkillSource::GITHUB, github_username).await;
        let linkedin = self.extract(&SkillSource::LINKEDIN, linkedin_url).await;

        let mut skills = github.skills();
        skills.extend(linkedin.skills());

        ExtractionReport {
            github,
            linkedin,
            skills,
        }
    }
}

/// Collects the trimmed, non-empty text of every node matching `selector`.
///
/// Kept synchronous: `Html` is not `Send` and must not live across an await.
pub fn parse_skills(html: &str, selector: &str) -> Result<SkillSet, ExtractError> {
    let selector =
        Selector::parse(selector).map_err(|_| ExtractError::Selector(selector.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
