//! Request/response DTOs for the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::nlp::{ExtractOutcome, ScoreOutcome};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub resume_skills: Option<Vec<String>>,
    pub job_description: String,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub extracted: ExtractOutcome,
    pub score: Option<ScoreOutcome>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub components: HealthComponents,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
    pub skills_engine: &'static str,
    pub custom_model: &'static str,
}

/// Retrain job lifecycle, reported by the status endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrainStatus {
    Idle,
    Running {
        started_at: DateTime<Utc>,
    },
    Completed {
        finished_at: DateTime<Utc>,
        documents: usize,
        heads: usize,
    },
    Failed {
        failed_at: DateTime<Utc>,
        error: String,
    },
}
