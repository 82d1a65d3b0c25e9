//! Project configuration (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use mms_content::Variant;
use mms_static::BuildConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub variant: Variant,
    /// Catalog YAML; the builtin content is used when absent
    pub content: Option<String>,
    #[serde(default = "default_assets")]
    pub assets: String,
    #[serde(default = "default_output")]
    pub output: String,
    /// Paths to extra CSS stylesheets
    pub styles: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            variant: Variant::default(),
            content: None,
            assets: default_assets(),
            output: default_output(),
            styles: None,
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_title() -> String {
    "MMS - Modern Material Supply".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_assets() -> String {
    "assets".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_minify() -> bool {
    true
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No {} found, using defaults", path.display());
    Ok(ConfigFile::default())
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub variant: Option<Variant>,
    pub minify: Option<bool>,
}

impl ConfigFile {
    /// Resolve the build configuration.
    pub fn build_config(&self, overrides: Overrides) -> BuildConfig {
        BuildConfig {
            content: self.site.content.as_ref().map(PathBuf::from),
            assets_dir: PathBuf::from(&self.site.assets),
            output_dir: overrides
                .output
                .unwrap_or_else(|| PathBuf::from(&self.site.output)),
            variant: overrides.variant.unwrap_or(self.site.variant),
            minify: overrides.minify.unwrap_or(self.build.minify),
            base_url: self.site.base_url.clone(),
            title: self.site.title.clone(),
            styles: self.site.styles.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("site.toml")).unwrap();
        let build = config.build_config(Overrides::default());

        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert_eq!(build.variant, Variant::Extended);
        assert!(build.minify);
        assert!(build.content.is_none());
    }

    #[test]
    fn reads_site_settings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[site]
title = "MMS"
variant = "basic"
content = "content/catalog.yaml"
base_url = "/mms/"

[build]
minify = false
"#,
        )
        .unwrap();

        let build = load_config(&path).unwrap().build_config(Overrides::default());

        assert_eq!(build.title, "MMS");
        assert_eq!(build.variant, Variant::Basic);
        assert_eq!(build.content, Some(PathBuf::from("content/catalog.yaml")));
        assert_eq!(build.base_url, "/mms/");
        assert!(!build.minify);
    }

    #[test]
    fn flags_override_file() {
        let config = ConfigFile::default();

        let build = config.build_config(Overrides {
            output: Some(PathBuf::from("public")),
            variant: Some(Variant::Basic),
            minify: Some(false),
        });

        assert_eq!(build.output_dir, PathBuf::from("public"));
        assert_eq!(build.variant, Variant::Basic);
        assert!(!build.minify);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[site]\nvariant = \"c\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
