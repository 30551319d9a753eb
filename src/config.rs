//! Runtime configuration utilities for ats-lens.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder for data artefacts (vocabulary, corpora, model files).
    pub data_dir: PathBuf,
    /// Newline-delimited skills vocabulary.
    pub skills_db: PathBuf,
    /// Directory of raw resume `.txt` files used to bootstrap weak labels.
    pub raw_resumes_dir: PathBuf,
    /// JSONL file accumulating weakly labeled records.
    pub labels_file: PathBuf,
    /// Persisted custom entity model artifact.
    pub model_file: PathBuf,
    /// Acceptance threshold for fuzzy skill matching, 0-100 scale.
    pub fuzzy_threshold: f64,
    /// How many job-description terms to suggest.
    pub suggest_top_n: usize,
    /// Optimization passes for custom model training.
    pub train_iterations: u64,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let skills_db = env::var("SKILLS_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("skills_db.txt"));
        let raw_resumes_dir = env::var("RAW_RESUMES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("raw_resumes"));
        let labels_file = env::var("LABELS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("custom_ner.jsonl"));
        let model_file = env::var("MODEL_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("custom_ner.json"));
        let fuzzy_threshold = env::var("FUZZY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(90.0);
        let suggest_top_n = env::var("SUGGEST_TOP_N")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        let train_iterations = env::var("TRAIN_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;

        Ok(Self {
            data_dir,
            skills_db,
            raw_resumes_dir,
            labels_file,
            model_file,
            fuzzy_threshold,
            suggest_top_n,
            train_iterations,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }
}
