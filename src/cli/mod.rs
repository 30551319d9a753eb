//! Command-line interface wiring for ats-lens.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod bootstrap;
pub mod extract;
pub mod score;
pub mod serve;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Resume analysis and ATS scoring toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::Score(args) => score::run(args, settings).await,
            Commands::Bootstrap(args) => bootstrap::run(args, settings).await,
            Commands::Train => train::run(settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment a resume and extract entities and skills.
    Extract(extract::Args),
    /// Score a resume against a job description.
    Score(score::Args),
    /// Bootstrap weak training labels from raw resumes.
    Bootstrap(bootstrap::Args),
    /// Train and persist the custom entity model.
    Train,
    /// Serve the JSON API.
    Serve(serve::Args),
}
