//! CLI entry-point for resume/job-description scoring.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    nlp::{Pipeline, ScoreInput},
};

/// Args for the `score` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Resume text file.
    pub resume: PathBuf,
    /// Job description text file.
    pub job_description: PathBuf,
    /// Required skills the job description insists on.
    #[arg(long = "require", value_name = "SKILL")]
    pub required: Vec<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let resume = std::fs::read_to_string(&args.resume)
        .with_context(|| format!("reading {}", args.resume.display()))?;
    let jd = std::fs::read_to_string(&args.job_description)
        .with_context(|| format!("reading {}", args.job_description.display()))?;

    let pipeline = Pipeline::init(settings)?;
    let outcome = pipeline.score(&ScoreInput {
        resume_text: Some(resume),
        resume_skills: None,
        job_description: jd,
        required_skills: (!args.required.is_empty()).then_some(args.required),
    })?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
