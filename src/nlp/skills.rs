//! Canonical skills vocabulary and exact/fuzzy matching engine.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexSet;
use strsim::normalized_levenshtein;
use tracing::{info, warn};

/// Built-in fallback vocabulary used when the external source is missing.
const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "go",
    "c++",
    "c#",
    "sql",
    "react",
    "angular",
    "vue",
    "node.js",
    "spring boot",
    "django",
    "flask",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "aws",
    "azure",
    "google cloud",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "kafka",
    "git",
    "ci/cd",
    "jenkins",
    "linux",
    "graphql",
    "rest",
    "microservices",
    "machine learning",
    "data analysis",
    "agile",
    "scrum",
    "devops",
    "html",
    "css",
];

/// Fixed alias -> canonical table. Canonical targets are guaranteed to exist
/// in the loaded vocabulary.
const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("k8s", "kubernetes"),
    ("golang", "go"),
    ("postgres", "postgresql"),
    ("reactjs", "react"),
    ("nodejs", "node.js"),
    ("gcp", "google cloud"),
];

/// Read-only skills vocabulary plus matching thresholds. Loaded once at
/// process start; safe for concurrent readers.
#[derive(Debug, Clone)]
pub struct SkillsEngine {
    vocab: IndexSet<String>,
    synonyms: HashMap<String, String>,
    threshold: f64,
}

impl SkillsEngine {
    /// Load newline-delimited skill phrases; fall back to built-in defaults
    /// when the source is unavailable. Never fails hard.
    pub fn load(path: &Path, threshold: f64) -> Self {
        let entries: Vec<String> = match std::fs::read_to_string(path) {
            Ok(content) => content
                .lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(err) => {
                warn!(path = %path.display(), %err, "skills vocabulary unavailable; using built-in defaults");
                DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
            }
        };
        let engine = Self::with_vocab(entries, threshold);
        info!(entries = engine.vocab.len(), threshold, "skills engine ready");
        engine
    }

    /// Build an engine from an explicit vocabulary (used directly by tests).
    pub fn with_vocab(entries: Vec<String>, threshold: f64) -> Self {
        let mut vocab: IndexSet<String> = entries
            .into_iter()
            .map(|entry| entry.to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect();
        let mut synonyms = HashMap::new();
        for (alias, canonical) in SYNONYMS {
            vocab.insert((*alias).to_string());
            vocab.insert((*canonical).to_string());
            synonyms.insert((*alias).to_string(), (*canonical).to_string());
        }
        Self {
            vocab,
            synonyms,
            threshold,
        }
    }

    pub fn from_defaults(threshold: f64) -> Self {
        Self::with_vocab(DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(), threshold)
    }

    /// Map a skill to its canonical form; already-canonical skills are a
    /// fixed point.
    pub fn canonical(&self, skill: &str) -> String {
        let lower = skill.to_lowercase();
        self.synonyms.get(&lower).cloned().unwrap_or(lower)
    }

    /// Extract canonical skills from text. Exact matching is scoped to the
    /// skills section when present; a fuzzy pass over the full text recovers
    /// near-misses above the threshold.
    pub fn extract(&self, text: &str, skills_section: Option<&str>) -> Vec<String> {
        let scope = skills_section.unwrap_or(text).to_lowercase();
        let full = text.to_lowercase();

        let mut found: IndexSet<String> = IndexSet::new();
        for skill in &self.vocab {
            if contains_term(&scope, skill) {
                found.insert(self.canonical(skill));
            } else if partial_ratio(skill, &full) >= self.threshold {
                found.insert(self.canonical(skill));
            }
        }

        let mut out: Vec<String> = found.into_iter().collect();
        out.sort();
        out.dedup();
        out
    }
}

/// Substring containment with non-alphanumeric boundaries on both sides, so
/// "go" never matches inside "google" and "js" never matches inside "json".
pub fn contains_term(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        from = end;
    }
    false
}

/// Best similarity (0-100) between the needle phrase and any same-length
/// token window of the haystack. Exact presence scores 100; lowering the
/// acceptance threshold never removes a previously accepted match.
pub fn partial_ratio(needle: &str, haystack: &str) -> f64 {
    let needle_tokens: Vec<&str> = needle.split_whitespace().collect();
    let hay_tokens: Vec<&str> = haystack.split_whitespace().collect();
    if needle_tokens.is_empty() || hay_tokens.is_empty() {
        return 0.0;
    }
    let window = needle_tokens.len().min(hay_tokens.len());
    let mut best = 0.0f64;
    for chunk in hay_tokens.windows(window) {
        let candidate = chunk.join(" ");
        let score = normalized_levenshtein(needle, &candidate) * 100.0;
        if score > best {
            best = score;
        }
    }
    best
}
