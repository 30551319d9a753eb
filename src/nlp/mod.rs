//! Analysis pipeline orchestration: shared read-only engines plus the one
//! swappable custom-model slot.

pub mod bootstrap;
pub mod custom;
pub mod embeddings;
pub mod entities;
pub mod ner;
pub mod preprocess;
pub mod score;
pub mod sections;
pub mod skills;

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::error::AppError;

use self::custom::ModelSlot;
use self::embeddings::Embedder;
use self::entities::Entities;
use self::ner::Ner;
use self::preprocess::{clean_text, detect_language, CleanOptions};
use self::score::MatchScore;
use self::sections::Sections;
use self::skills::SkillsEngine;

/// Process-wide pipeline state. Analysis calls are `&self` and lock-free;
/// the custom-model slot is the only mutable piece and swaps atomically.
pub struct Pipeline {
    settings: Settings,
    skills: SkillsEngine,
    embedder: Embedder,
    ner: Arc<dyn Ner>,
    custom: ModelSlot,
}

/// Structured output of the extract operation.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutcome {
    pub sections: Sections,
    pub entities: Entities,
    pub normalized_skills: Vec<String>,
    pub language: String,
}

/// Inputs accepted by the score operation.
#[derive(Debug, Clone, Default)]
pub struct ScoreInput {
    pub resume_text: Option<String>,
    pub resume_skills: Option<Vec<String>>,
    pub job_description: String,
    pub required_skills: Option<Vec<String>>,
}

/// Structured output of the score operation.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutcome {
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggested_terms: Vec<String>,
    pub details: MatchScore,
}

/// Summary of a completed retrain run.
#[derive(Debug, Clone, Serialize)]
pub struct RetrainReport {
    pub documents: usize,
    pub heads: usize,
}

impl Pipeline {
    /// Load every shared engine once. The custom model is restored from disk
    /// when a previous training run persisted one.
    pub fn init(settings: Settings) -> anyhow::Result<Self> {
        let skills = SkillsEngine::load(&settings.skills_db, settings.fuzzy_threshold);
        let embedder = Embedder::init()?;
        let ner = ner::load_model();
        let custom = ModelSlot::from_disk(&settings.model_file);
        info!(custom_model = custom.current().is_some(), "pipeline initialised");
        Ok(Self {
            settings,
            skills,
            embedder,
            ner,
            custom,
        })
    }

    pub fn has_custom_model(&self) -> bool {
        self.custom.current().is_some()
    }

    /// Segment, extract entities and skills, and detect the language of one
    /// resume text.
    pub fn extract(&self, text: &str) -> Result<ExtractOutcome, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("text is required".into()));
        }

        let language = detect_language(text);
        // Preserve case: the NER and custom model rely on it.
        let cleaned = clean_text(
            text,
            &CleanOptions {
                keep_case: true,
                ..CleanOptions::default()
            },
        );

        let mut sections = sections::split_sections(&cleaned);
        let custom_model = self.custom.current();
        let entities =
            entities::extract_entities(&cleaned, self.ner.as_ref(), custom_model.as_deref());
        let normalized_skills = self.skills.extract(&cleaned, sections.skills.as_deref());

        if sections.skills.is_none() && !normalized_skills.is_empty() {
            sections.skills = Some(normalized_skills.join(", "));
        }

        Ok(ExtractOutcome {
            sections,
            entities,
            normalized_skills,
            language,
        })
    }

    /// Score a resume against a job description. The job description must be
    /// present and non-empty; an empty resume yields defined neutral output.
    pub fn score(&self, input: &ScoreInput) -> Result<ScoreOutcome, AppError> {
        if input.job_description.trim().is_empty() {
            return Err(AppError::Validation("job_description is required".into()));
        }

        let clean_opts = CleanOptions {
            keep_case: false,
            remove_stopwords: true,
            lemmatize: true,
        };
        let resume_text = input.resume_text.as_deref().unwrap_or("");
        let resume_clean = clean_text(resume_text, &clean_opts);
        let jd_clean = clean_text(&input.job_description, &clean_opts);

        let resume_skills = match &input.resume_skills {
            Some(skills) if !skills.is_empty() => skills.clone(),
            _ => self.skills.extract(&resume_clean, None),
        };

        let semantic = self.embedder.similarity(&resume_clean, &jd_clean)?;
        let details = score::compute_match_score(
            &resume_skills,
            &input.job_description,
            input.required_skills.as_deref(),
            semantic,
        );
        let suggested_terms = self.embedder.suggest_terms(
            &resume_skills,
            &input.job_description,
            self.settings.suggest_top_n,
        )?;

        info!(
            score = details.total,
            matched = details.matched_skills.len(),
            missing = details.missing_keywords.len(),
            "computed match score"
        );
        Ok(ScoreOutcome {
            score: details.total,
            matched_skills: details.matched_skills.clone(),
            missing_keywords: details.missing_keywords.clone(),
            suggested_terms,
            details,
        })
    }

    /// Extract and score in one pass, reusing the extracted skills.
    pub fn analyze(
        &self,
        text: &str,
        job_description: Option<&str>,
        required_skills: Option<Vec<String>>,
    ) -> Result<(ExtractOutcome, Option<ScoreOutcome>), AppError> {
        let extracted = self.extract(text)?;
        let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) else {
            return Ok((extracted, None));
        };
        let outcome = self.score(&ScoreInput {
            resume_text: Some(text.to_string()),
            resume_skills: Some(extracted.normalized_skills.clone()),
            job_description: jd.to_string(),
            required_skills,
        })?;
        Ok((extracted, Some(outcome)))
    }

    /// Self-learning loop: bootstrap weak labels, train, persist, hot-swap.
    /// Any failure leaves the previously active model in place.
    pub fn retrain(&self) -> Result<RetrainReport, AppError> {
        let documents =
            bootstrap::bootstrap_directory(&self.settings.raw_resumes_dir, &self.settings.labels_file)
                .map_err(|err| AppError::Retrain(err.to_string()))?;

        let model = custom::train_custom_ner(&self.settings.labels_file, self.settings.train_iterations)
            .map_err(|err| AppError::Retrain(err.to_string()))?;
        model
            .save(&self.settings.model_file)
            .map_err(|err| AppError::Retrain(err.to_string()))?;

        let heads = model.heads.len();
        self.custom.replace(model);
        info!(documents, heads, "custom model retrained and hot-swapped");
        Ok(RetrainReport { documents, heads })
    }
}
