//! Composite ATS compatibility scoring.

use std::collections::HashSet;

use serde::Serialize;

use crate::nlp::preprocess::{clean_text, CleanOptions};

/// Fixed component weights; they sum to 95 with a flat 5-point baseline.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreWeights {
    pub skills: u32,
    pub required: u32,
    pub semantic: u32,
    pub sections: u32,
    pub format: u32,
}

pub const WEIGHTS: ScoreWeights = ScoreWeights {
    skills: 40,
    required: 25,
    semantic: 20,
    sections: 10,
    format: 5,
};

/// Raw component values, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreComponents {
    pub skills_cov: f64,
    pub required_cov: f64,
    pub semantic: f64,
    pub sections_cov: f64,
}

/// Full score output: the total is derived from the components and weights
/// and never stored independently of them.
#[derive(Debug, Clone, Serialize)]
pub struct MatchScore {
    pub total: f64,
    pub matched_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub components: ScoreComponents,
    pub weights: ScoreWeights,
}

const SECTION_KEYS: &[&str] = &["education", "experience", "skills", "projects", "summary"];

/// Combine skills coverage, required coverage, semantic similarity and a
/// section-completeness proxy into a bounded 0-100 score.
pub fn compute_match_score(
    resume_skills: &[String],
    jd_text: &str,
    required_skills: Option<&[String]>,
    semantic: f64,
) -> MatchScore {
    let opts = CleanOptions {
        keep_case: false,
        remove_stopwords: true,
        lemmatize: true,
    };
    let jd_tokens: HashSet<String> = clean_text(jd_text, &opts)
        .split_whitespace()
        .map(|t| t.to_string())
        .collect();
    let candidates: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut matched: Vec<String> = candidates
        .iter()
        .filter(|skill| {
            jd_tokens
                .iter()
                .any(|tok| tok.contains(skill.as_str()) || skill.contains(tok))
        })
        .cloned()
        .collect();
    matched.sort();
    let skills_cov = matched.len().min(20) as f64 / 20.0;

    let required: Vec<String> = required_skills
        .unwrap_or_default()
        .iter()
        .map(|r| r.to_lowercase())
        .collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|req| candidates.iter().all(|skill| !skill.contains(req.as_str())))
        .cloned()
        .collect();
    let required_cov = if required.is_empty() {
        1.0
    } else {
        (required.len() - missing.len()) as f64 / required.len() as f64
    };

    let semantic = semantic.clamp(0.0, 1.0);

    // Coarse proxy: re-scans text instead of consuming the section map.
    let section_blob = format!("{} {}", resume_skills.join(" "), jd_text).to_lowercase();
    let bonus: u32 = SECTION_KEYS
        .iter()
        .filter(|key| section_blob.contains(**key))
        .map(|_| 2)
        .sum();
    let sections_cov = f64::from(bonus.min(10)) / 10.0;

    let raw = skills_cov * f64::from(WEIGHTS.skills)
        + required_cov * f64::from(WEIGHTS.required)
        + semantic * f64::from(WEIGHTS.semantic)
        + sections_cov * f64::from(WEIGHTS.sections)
        + f64::from(WEIGHTS.format);
    let total = round2(raw.min(100.0));

    MatchScore {
        total,
        matched_skills: matched,
        missing_keywords: missing,
        components: ScoreComponents {
            skills_cov: round3(skills_cov),
            required_cov: round3(required_cov),
            semantic: round3(semantic),
            sections_cov: round3(sections_cov),
        },
        weights: WEIGHTS,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
