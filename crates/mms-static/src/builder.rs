//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use mms_components::{NavState, Page};
use mms_content::{Catalog, Variant};

use crate::assets::AssetPipeline;
use crate::templates::{Context, TemplateEngine};

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Catalog override; the builtin catalog is used when unset
    pub content: Option<PathBuf>,

    /// Directory holding the logo, background image and other static files
    pub assets_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Which page variant to build
    pub variant: Variant,

    /// Minify HTML/CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Document title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: None,
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("dist"),
            variant: Variant::default(),
            minify: true,
            base_url: "/".to_string(),
            title: "MMS - Modern Material Supply".to_string(),
            styles: vec![],
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of sections rendered
    pub sections: usize,

    /// Number of static assets copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to load content: {0}")]
    ContentError(#[from] mms_content::CatalogError),

    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    catalog: Catalog,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder, loading the catalog once.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let catalog = Catalog::load(config.content.as_deref())?;

        match &config.content {
            Some(path) => tracing::info!("Loaded content from {}", path.display()),
            None => tracing::debug!("Using builtin content"),
        }

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a builder around an already loaded catalog.
    pub fn with_catalog(config: BuildConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Render the page with the navigation in `nav_state`.
    ///
    /// `scripts` are appended after the site runtime.
    pub fn render_index(
        &self,
        nav_state: NavState,
        scripts: &[String],
    ) -> Result<String, BuildError> {
        let page = Page::with_nav_state(self.config.variant, nav_state);
        let base_url = &self.config.base_url;

        let nav = self
            .templates
            .render_nav(page.nav(), &self.catalog.company, base_url)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        // Rendered in parallel; collect keeps declared order.
        let sections = page
            .sections()
            .par_iter()
            .map(|kind| {
                self.templates
                    .render_section(*kind, &self.catalog, base_url)
                    .map_err(|e| BuildError::TemplateError(format!("{:?}: {}", kind, e)))
            })
            .collect::<Result<Vec<String>, BuildError>>()?;

        let context = Context {
            title: self.config.title.clone(),
            description: format!(
                "{} - {}",
                self.catalog.company.name, self.catalog.company.tagline
            ),
            variant: page.variant().to_string(),
            base_url: base_url.clone(),
            nav,
            sections,
            styles: self
                .config
                .styles
                .iter()
                .map(|s| {
                    let filename = Path::new(s)
                        .file_name()
                        .and_then(|f| f.to_str())
                        .unwrap_or("style.css");
                    format!("{}assets/{}", base_url, filename)
                })
                .collect(),
            scripts: scripts.to_vec(),
        };

        let html = self
            .templates
            .render_page(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok(if self.config.minify {
            AssetPipeline::minify_html(&html)
        } else {
            html
        })
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let html = self.render_index(NavState::Collapsed, &[])?;
        fs::write(self.config.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let assets = self.generate_assets()?;

        self.generate_sitemap()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            sections: Page::new(self.config.variant).sections().len(),
            assets,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Write generated CSS/JS and copy static assets. Returns copied file count.
    fn generate_assets(&self) -> Result<usize, BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let mut copied = 0;
        if self.config.assets_dir.exists() {
            copied = AssetPipeline::copy_dir(&self.config.assets_dir, &assets_dir)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
            tracing::debug!(
                "Copied {} assets from {}",
                copied,
                self.config.assets_dir.display()
            );
        } else {
            tracing::warn!(
                "Assets directory not found: {}",
                self.config.assets_dir.display()
            );
        }

        self.check_referenced_images(&assets_dir);

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                fs::write(assets_dir.join(filename), content)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(copied)
    }

    /// Warn about images the page references but the output lacks.
    fn check_referenced_images(&self, assets_dir: &Path) {
        let company = &self.catalog.company;
        let mut referenced = vec![&company.logo];
        if self.config.variant.has_background_image() {
            referenced.extend(company.background_image.as_ref());
        }

        for image in referenced {
            if !assets_dir.join(image).exists() {
                tracing::warn!("Referenced image missing from assets: {}", image);
            }
        }
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self) -> Result<(), BuildError> {
        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{}</loc>
  </url>
</urlset>"#,
            self.config.base_url
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use tempfile::tempdir;

    fn config_in(root: &Path, variant: Variant) -> BuildConfig {
        BuildConfig {
            assets_dir: root.join("assets"),
            output_dir: root.join("dist"),
            variant,
            minify: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_extended_site() {
        let temp = tempdir().unwrap();
        let assets = temp.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("mms-logo.png"), b"png").unwrap();

        let builder = StaticBuilder::new(config_in(temp.path(), Variant::Extended)).unwrap();
        let result = builder.build().await.unwrap();

        let out = temp.path().join("dist");
        assert_eq!(result.sections, 11);
        assert_eq!(result.assets, 1);
        assert!(out.join("index.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/main.js").exists());
        assert!(out.join("assets/mms-logo.png").exists());
        assert!(out.join("sitemap.xml").exists());
        assert!(out.join("robots.txt").exists());
    }

    #[tokio::test]
    async fn builds_without_assets_dir() {
        let temp = tempdir().unwrap();

        let builder = StaticBuilder::new(config_in(temp.path(), Variant::Basic)).unwrap();
        let result = builder.build().await.unwrap();

        assert_eq!(result.sections, 7);
        assert_eq!(result.assets, 0);
    }

    #[test]
    fn basic_page_has_no_extended_sections() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(config_in(temp.path(), Variant::Basic)).unwrap();

        let html = builder.render_index(NavState::Collapsed, &[]).unwrap();

        assert!(!html.contains(r#"id="bulk-order""#));
        assert!(!html.contains("testimonial"));
        assert!(!html.contains("hero-image"));
        assert!(html.contains(r#"<body class="variant-basic">"#));
    }

    #[test]
    fn section_anchors_follow_nav_order() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(config_in(temp.path(), Variant::Extended)).unwrap();

        let html = builder.render_index(NavState::Collapsed, &[]).unwrap();
        let ids = [
            r#"<section id="home""#,
            r#"<section id="products""#,
            r#"<section id="bulk-order""#,
            r#"<section id="services""#,
            r#"<section id="about""#,
            r#"<section id="contact""#,
        ];
        let found: Vec<usize> = ids.iter().map(|id| html.find(id).unwrap()).collect();

        assert!(found.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn phone_links_keep_exact_digits() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(config_in(temp.path(), Variant::Extended)).unwrap();

        let html = builder.render_index(NavState::Collapsed, &[]).unwrap();

        let tel = Regex::new(r#"href="tel:([^"]+)""#).unwrap();
        let tels: Vec<&str> = tel
            .captures_iter(&html)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(tels.len(), 4);
        assert!(tels
            .iter()
            .all(|t| *t == "+22246619392" || *t == "+22298765432"));

        let chat = Regex::new(r#"href="https://wa\.me/(\d+)(\?text=[^"]*)?""#).unwrap();
        let chats: Vec<_> = chat.captures_iter(&html).collect();
        assert!(!chats.is_empty());
        for c in &chats {
            let number = c.get(1).unwrap().as_str();
            assert!(number == "22246619392" || number == "22298765432");
        }
        assert!(chats.iter().any(|c| c
            .get(2)
            .is_some_and(|t| t.as_str().contains("bulk%20order"))));
    }

    #[test]
    fn injects_extra_scripts() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(config_in(temp.path(), Variant::Basic)).unwrap();

        let html = builder
            .render_index(NavState::Expanded, &["/__hmr.js".to_string()])
            .unwrap();

        assert!(html.contains(r#"<script src="/__hmr.js"></script>"#));
        assert!(html.contains(r#"data-state="expanded""#));
    }

    #[test]
    fn minified_output_has_no_gaps_between_tags() {
        let temp = tempdir().unwrap();
        let mut config = config_in(temp.path(), Variant::Basic);
        config.minify = true;
        let builder = StaticBuilder::new(config).unwrap();

        let html = builder.render_index(NavState::Collapsed, &[]).unwrap();

        assert!(!html.contains(">\n"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn reports_bad_content_path() {
        let temp = tempdir().unwrap();
        let mut config = config_in(temp.path(), Variant::Basic);
        config.content = Some(temp.path().join("missing.yaml"));

        let result = StaticBuilder::new(config);

        assert!(matches!(result, Err(BuildError::ContentError(_))));
    }
}
