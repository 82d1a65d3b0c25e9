//! Scaffold a site project in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mms_content::Catalog;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing site project...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let content_dir = Path::new("content");
    fs::create_dir_all(content_dir).context("Failed to create content directory")?;

    let catalog_path = content_dir.join("catalog.yaml");
    if !catalog_path.exists() || yes {
        fs::write(&catalog_path, Catalog::builtin_source())
            .context("Failed to write content/catalog.yaml")?;
        tracing::info!("Created content/catalog.yaml");
    }

    let assets_dir = Path::new("assets");
    if !assets_dir.exists() {
        fs::create_dir_all(assets_dir).context("Failed to create assets directory")?;
        tracing::info!("Created assets/ (add mms-logo.png and construction-site.jpg)");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'mms dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# MMS site configuration

[site]
# Document title
title = "MMS - Modern Material Supply"

# Base URL (for deployment)
base_url = "/"

# Page variant: "basic" or "extended"
variant = "extended"

# Content catalog (omit to use the builtin content)
content = "content/catalog.yaml"

# Logo, background image and other static files
assets = "assets"

# Output directory for the built site
output = "dist"

[build]
# Enable minification
minify = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use mms_content::Variant;

    #[test]
    fn default_config_parses() {
        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.site.variant, Variant::Extended);
        assert_eq!(config.site.content.as_deref(), Some("content/catalog.yaml"));
        assert!(config.build.minify);
    }
}
