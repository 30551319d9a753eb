//! CLI entry-point for weak-label bootstrapping.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, nlp::bootstrap};

/// Args for the `bootstrap` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Directory of raw resume `.txt` files; defaults to the configured one.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args.input.unwrap_or_else(|| settings.raw_resumes_dir.clone());
    let documents = bootstrap::bootstrap_directory(&input, &settings.labels_file)?;
    println!(
        "bootstrapped {documents} documents into {}",
        settings.labels_file.display()
    );
    Ok(())
}
