// Skill extraction from public profile pages.
// Failures never propagate: every path ends in an `ExtractionOutcome`.

pub mod extractor;
pub mod fetcher;
pub mod handlers;

use std::collections::BTreeSet;

/// Deduplicated skill names. Ordered so downstream random draws are reproducible.
pub type SkillSet = BTreeSet<String>;

pub use extractor::{ExtractionReport, SkillExtractor};
pub use fetcher::HttpFetcher;
