//! Mock tailoring: deterministic, network-free synthesis of a `TailoredVersion`.
//!
//! All randomness comes from the caller's `Rng`, so a seeded `StdRng` reproduces
//! output exactly.
//!
//! Algorithm:
//! 1. pool = supplied skills (deduplicated, order kept) or `DEFAULT_SKILL_POOL`
//! 2. selected_skills = min(3, |pool|) distinct draws
//! 3. fit_score = uniform in [70, 95]
//! 4. missing_skills = min(2, |pool - selected|) distinct draws from the remainder
//! 5. learning_paths = one templated sentence per missing skill
//! 6. version_text = marker + summary block over the first 5 non-blank resume lines

use rand::seq::SliceRandom;
use rand::Rng;

use crate::tailoring::models::TailoredVersion;

pub const DEFAULT_SKILL_POOL: [&str; 9] = [
    "Python",
    "Java",
    "Kotlin",
    "Apex",
    "React.js",
    "AWS",
    "Azure",
    "Data Analysis",
    "Communication",
];

pub const MOCK_MARKER: &str = "[Mocked Tailored Resume]";
pub const IMPROVED_MARKER: &str = "[Improved]";

const SELECTED_COUNT: usize = 3;
const MISSING_COUNT: usize = 2;
const MIN_FIT_SCORE: u8 = 70;
const MAX_MOCK_FIT_SCORE: u8 = 95;
const MAX_BULLETS: usize = 5;
const BULLET_CHAR_LIMIT: usize = 50;

/// Builds a mock tailored version from the resume and an optional skill pool.
pub fn mock_tailor<R: Rng + ?Sized>(
    resume_text: &str,
    skills: &[String],
    rng: &mut R,
) -> TailoredVersion {
    let pool = skill_pool(skills);

    let selected_skills: Vec<String> = pool
        .choose_multiple(rng, SELECTED_COUNT.min(pool.len()))
        .cloned()
        .collect();

    let fit_score = rng.gen_range(MIN_FIT_SCORE..=MAX_MOCK_FIT_SCORE);

    let remaining: Vec<String> = pool
        .iter()
        .filter(|s| !selected_skills.contains(s))
        .cloned()
        .collect();
    let missing_skills: Vec<String> = remaining
        .choose_multiple(rng, MISSING_COUNT.min(remaining.len()))
        .cloned()
        .collect();

    let learning_paths: Vec<String> = missing_skills.iter().map(|s| learning_path(s)).collect();

    let version_text = render_version_text(
        resume_text,
        &selected_skills,
        fit_score,
        &missing_skills,
        &learning_paths,
    );

    TailoredVersion {
        version_text,
        selected_skills,
        fit_score,
        missing_skills,
        learning_paths,
    }
}

/// Supplied skills with blanks and duplicates removed, or the default pool when none remain.
fn skill_pool(skills: &[String]) -> Vec<String> {
    let mut pool: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !pool.iter().any(|p| p == skill) {
            pool.push(skill.to_string());
        }
    }
    if pool.is_empty() {
        pool = DEFAULT_SKILL_POOL.iter().map(|s| s.to_string()).collect();
    }
    pool
}

pub fn learning_path(skill: &str) -> String {
    format!("Take a course on {skill}")
}

/// First `MAX_BULLETS` non-blank lines, truncated and tagged.
fn improved_bullets(resume_text: &str) -> Vec<String> {
    resume_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_BULLETS)
        .map(|line| {
            let head: String = line.chars().take(BULLET_CHAR_LIMIT).collect();
            format!("- {head}... {IMPROVED_MARKER}")
        })
        .collect()
}

fn render_version_text(
    resume_text: &str,
    selected_skills: &[String],
    fit_score: u8,
    missing_skills: &[String],
    learning_paths: &[String],
) -> String {
    format!(
        "{MOCK_MARKER}\n\n\
         Top Skills Aligned: {}\n\n\
         Improved Bullets:\n{}\n\n\
         Fit Score for Job: {fit_score}/100\n\n\
         Skill Gaps: {}\n\
         Recommended Learning Path:\n{}",
        selected_skills.join(", "),
        improved_bullets(resume_text).join("\n"),
        missing_skills.join(", "),
        learning_paths.join("\n"),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RESUME: &str = "Built X.\nLed Y.\nShipped Z.";

    fn default_pool() -> Vec<String> {
        DEFAULT_SKILL_POOL.iter().map(|s| s.to_string()).collect()
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_default_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let v = mock_tailor(RESUME, &[], &mut rng);
        let pool = default_pool();

        assert_eq!(v.selected_skills.len(), 3);
        assert!(v.selected_skills.iter().all(|s| pool.contains(s)));
        assert!(!v.missing_skills.is_empty());
        assert!(v
            .missing_skills
            .iter()
            .all(|s| pool.contains(s) && !v.selected_skills.contains(s)));
        assert!(v.version_text.contains(MOCK_MARKER));
        assert!(v.version_text.contains("- Built X.... [Improved]"));
        assert!(v.version_text.contains("- Shipped Z.... [Improved]"));
    }

    #[test]
    fn test_invariants_hold_across_seeds() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let v = mock_tailor(RESUME, &[], &mut rng);
            assert!(v.validate().is_ok(), "seed {seed}");
            assert!((70..=95).contains(&v.fit_score), "seed {seed}");
            assert!(v.selected_skills.len() <= 3);
            assert_eq!(v.missing_skills.len(), v.learning_paths.len());
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            mock_tailor(RESUME, &[], &mut a),
            mock_tailor(RESUME, &[], &mut b)
        );
    }

    #[test]
    fn test_supplied_skills_replace_default_pool() {
        let supplied = skills(&["Rust", "Go", "Kafka", "Postgres", "gRPC"]);
        let mut rng = StdRng::seed_from_u64(3);
        let v = mock_tailor(RESUME, &supplied, &mut rng);

        assert!(v.selected_skills.iter().all(|s| supplied.contains(s)));
        assert!(v.missing_skills.iter().all(|s| supplied.contains(s)));
        assert_eq!(v.missing_skills.len(), 2);
    }

    #[test]
    fn test_small_pool_leaves_no_gaps() {
        let supplied = skills(&["Rust", "Go"]);
        let mut rng = StdRng::seed_from_u64(1);
        let v = mock_tailor(RESUME, &supplied, &mut rng);

        assert_eq!(v.selected_skills.len(), 2);
        assert!(v.missing_skills.is_empty());
        assert!(v.learning_paths.is_empty());
    }

    #[test]
    fn test_duplicate_and_blank_skills_are_ignored() {
        let supplied = skills(&["Rust", "Rust", "  ", "Go", "Rust"]);
        let mut rng = StdRng::seed_from_u64(9);
        let v = mock_tailor(RESUME, &supplied, &mut rng);

        assert_eq!(v.selected_skills.len(), 2);
        assert!(v.missing_skills.is_empty());
    }

    #[test]
    fn test_learning_path_template() {
        assert_eq!(learning_path("AWS"), "Take a course on AWS");
    }

    #[test]
    fn test_improved_bullets_takes_first_five_non_blank() {
        let resume = "one\n\n two \nthree\n\nfour\nfive\nsix\nseven";
        let bullets = improved_bullets(resume);
        assert_eq!(bullets.len(), 5);
        assert_eq!(bullets[1], "- two... [Improved]");
        assert!(bullets.iter().all(|b| !b.contains("six")));
    }

    #[test]
    fn test_improved_bullets_truncates_to_fifty_chars() {
        let long = "x".repeat(80);
        let bullets = improved_bullets(&long);
        assert_eq!(bullets[0], format!("- {}... [Improved]", "x".repeat(50)));
    }

    #[test]
    fn test_version_text_lists_gaps_and_paths() {
        let mut rng = StdRng::seed_from_u64(11);
        let v = mock_tailor(RESUME, &[], &mut rng);
        assert!(v
            .version_text
            .contains(&format!("Fit Score for Job: {}/100", v.fit_score)));
        for path in &v.learning_paths {
            assert!(v.version_text.contains(path.as_str()));
        }
    }
}
