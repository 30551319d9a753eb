//! CLI entry-point for custom model training.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, nlp::custom};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let model = custom::train_custom_ner(&settings.labels_file, settings.train_iterations)?;
    model.save(&settings.model_file)?;
    println!(
        "trained {} label heads into {}",
        model.heads.len(),
        settings.model_file.display()
    );
    Ok(())
}
