//! Weak-label bootstrapping: keyword families over raw resume text produce
//! character-span pseudo-labels for custom model training.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const LABEL_CERTIFICATION: &str = "CERTIFICATION";
pub const LABEL_TITLE: &str = "TITLE";
pub const LABEL_SKILL_PHRASE: &str = "SKILL_PHRASE";

const CERT_KEYWORDS: &[&str] = &[
    "certified",
    "certification",
    "certificate",
    "pmp",
    "aws certified",
    "azure fundamentals",
    "gcp professional",
    "scrum master",
    "oracle certified",
];

const TITLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "manager",
    "architect",
    "consultant",
    "analyst",
    "administrator",
    "intern",
];

const SKILL_KEYWORDS: &[&str] = &[
    "java",
    "python",
    "spring boot",
    "react",
    "node.js",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "microservices",
    "sql",
    "git",
    "terraform",
    "ci/cd",
    "devops",
];

/// One weakly labeled document: `entities` holds `[start, end, label]`
/// character spans. Overlaps across label families are kept as-is; they are
/// resolved at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub text: String,
    pub entities: Vec<(usize, usize, String)>,
}

static PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let mut patterns = Vec::new();
    for kw in CERT_KEYWORDS {
        let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))).expect("valid regex");
        patterns.push((re, LABEL_CERTIFICATION));
    }
    // Title keywords intentionally match inside compound words so
    // "co-developer" and "engineering" variants are captured.
    for kw in TITLE_KEYWORDS {
        let re = Regex::new(&format!(r"(?i)\b\w*{}\w*\b", regex::escape(kw))).expect("valid regex");
        patterns.push((re, LABEL_TITLE));
    }
    for kw in SKILL_KEYWORDS {
        let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))).expect("valid regex");
        patterns.push((re, LABEL_SKILL_PHRASE));
    }
    patterns
});

/// Scan one document and emit pseudo-label spans for every keyword hit.
pub fn bootstrap_record(text: &str) -> LabeledRecord {
    let mut entities = Vec::new();
    for (pattern, label) in PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            entities.push((m.start(), m.end(), (*label).to_string()));
        }
    }
    LabeledRecord {
        text: text.to_string(),
        entities,
    }
}

/// Bootstrap every `.txt` file directly under `input_dir` into a JSONL store,
/// one record per document. Returns the number of documents written.
pub fn bootstrap_directory(input_dir: &Path, output_file: &Path) -> Result<usize> {
    if let Some(parent) = output_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(output_file)
        .with_context(|| format!("creating {}", output_file.display()))?;
    let mut writer = BufWriter::new(file);

    let mut count = 0usize;
    if input_dir.is_dir() {
        for entry in WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }
            let text = match std::fs::read_to_string(entry.path()) {
                Ok(text) => text,
                Err(err) => {
                    warn!(path = %entry.path().display(), %err, "skipping unreadable resume");
                    continue;
                }
            };
            let record = bootstrap_record(&text);
            serde_json::to_writer(&mut writer, &record)?;
            writer.write_all(b"\n")?;
            count += 1;
        }
    } else {
        warn!(path = %input_dir.display(), "raw resume directory missing; labeled store will be empty");
    }
    writer.flush()?;
    info!(documents = count, path = %output_file.display(), "bootstrapped weak labels");
    Ok(count)
}
