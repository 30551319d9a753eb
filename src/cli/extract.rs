//! CLI entry-point for resume extraction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, nlp::Pipeline};

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Resume text file to analyze.
    pub file: PathBuf,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let pipeline = Pipeline::init(settings)?;
    let outcome = pipeline.extract(&text)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
