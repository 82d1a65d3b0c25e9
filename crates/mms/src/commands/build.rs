//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mms_content::Variant;
use mms_static::StaticBuilder;

use crate::config::{load_config, Overrides};

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    variant: Option<Variant>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = load_config(config_path)?;
    let config = file_config.build_config(Overrides {
        output,
        variant,
        minify,
    });
    let variant = config.variant;

    let result = StaticBuilder::new(config)
        .context("Failed to load site content")?
        .build()
        .await?;

    tracing::info!(
        "Built {} variant: {} sections, {} assets in {}ms",
        variant,
        result.sections,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
