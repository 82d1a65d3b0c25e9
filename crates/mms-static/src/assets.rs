//! Asset pipeline for CSS, JavaScript, HTML and static files.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the site stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the navigation runtime script.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Collapse whitespace between tags and blank lines.
    pub fn minify_html(html: &str) -> String {
        let html = BETWEEN_TAGS_RE.replace_all(html, "><");
        BLANK_RUNS_RE.replace_all(&html, "\n").trim().to_string()
    }

    /// Copy every file under `source` into `target`, keeping relative paths.
    ///
    /// Returns the number of files copied.
    pub fn copy_dir(source: &Path, target: &Path) -> std::io::Result<usize> {
        let mut copied = 0;

        for entry in WalkDir::new(source)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Dotfiles (editor swap files, .DS_Store) are not site assets
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if hidden {
                continue;
            }

            let relative = path.strip_prefix(source).unwrap_or(path);
            let dest = target.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}

static BETWEEN_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("Invalid between-tags regex"));

static BLANK_RUNS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid blank-runs regex"));

const DEFAULT_CSS: &str = r#"/* MMS site theme */

:root {
  --primary: #2563eb;
  --primary-hover: #1d4ed8;
  --whatsapp: #22c55e;
  --whatsapp-hover: #16a34a;
  --foreground: #111827;
  --muted-foreground: #4b5563;
  --background: #ffffff;
  --muted: #f9fafb;
  --accent: #eff6ff;
  --border: #e5e7eb;
  --radius: 0.5rem;
  --nav-height: 4rem;
  --content-max-width: 80rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  scroll-behavior: smooth;
  scroll-padding-top: var(--nav-height);
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  color: var(--foreground);
  background: var(--background);
  line-height: 1.6;
}

a {
  color: inherit;
}

.container {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 0 1.5rem;
}

.narrow {
  max-width: 48rem;
}

.centered {
  text-align: center;
}

.muted {
  color: var(--muted-foreground);
  font-size: 0.875rem;
}

/* Navigation */
.site-nav {
  position: fixed;
  top: 0;
  width: 100%;
  z-index: 50;
  background: var(--background);
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.08);
}

.nav-bar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  height: var(--nav-height);
}

.nav-logo img {
  height: 2.5rem;
  width: auto;
}

.nav-links {
  display: flex;
  gap: 1rem;
}

.nav-link,
.mobile-link {
  text-decoration: none;
  color: var(--muted-foreground);
  font-weight: 500;
  padding: 0.5rem 0.75rem;
  transition: color 0.15s;
}

.nav-link:hover,
.mobile-link:hover {
  color: var(--primary);
}

.nav-toggle {
  display: none;
  background: none;
  border: none;
  font-size: 1.5rem;
  cursor: pointer;
  color: var(--muted-foreground);
}

.mobile-menu {
  display: none;
  padding: 0.5rem 1rem 1rem;
}

.mobile-link {
  display: block;
}

@media (max-width: 768px) {
  .nav-links {
    display: none;
  }

  .nav-toggle {
    display: block;
  }

  .mobile-menu {
    display: block;
  }
}

/* Sections */
.hero {
  padding: calc(var(--nav-height) + 5rem) 0 5rem;
  background: linear-gradient(135deg, var(--accent), var(--background));
  text-align: center;
}

.hero-image {
  background-size: cover;
  background-position: center;
  color: #ffffff;
}

.hero h2 {
  font-size: 3rem;
  margin-bottom: 1.5rem;
}

.lead {
  font-size: 1.25rem;
  color: var(--muted-foreground);
  margin-bottom: 2rem;
}

.hero-image .lead {
  color: #e5e7eb;
}

.mission {
  margin: 4rem auto 0;
  max-width: 56rem;
  text-align: left;
  color: var(--foreground);
}

.section {
  padding: 5rem 0;
}

.section-muted {
  background: var(--muted);
}

.section-header {
  text-align: center;
  margin-bottom: 3rem;
}

.section-header h2 {
  font-size: 2.25rem;
  margin-bottom: 1rem;
}

.section-header p {
  font-size: 1.25rem;
  color: var(--muted-foreground);
}

.grid {
  display: grid;
  gap: 2rem;
}

.grid-2 {
  grid-template-columns: repeat(auto-fit, minmax(20rem, 1fr));
}

.grid-3 {
  grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr));
}

.card {
  background: var(--background);
  border-radius: var(--radius);
  padding: 2rem;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.06);
}

.card h3 {
  margin-bottom: 0.5rem;
}

.check-list {
  list-style: none;
  margin-top: 1rem;
}

.check-list li::before {
  content: "\203A";
  color: var(--primary);
  margin-right: 0.5rem;
  font-weight: 700;
}

.actions {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  justify-content: center;
}

.button {
  display: inline-block;
  padding: 0.75rem 2rem;
  border-radius: var(--radius);
  font-weight: 600;
  text-decoration: none;
  transition: background 0.15s;
}

.button-primary,
.button-email {
  background: var(--primary);
  color: #ffffff;
}

.button-primary:hover,
.button-email:hover {
  background: var(--primary-hover);
}

.button-outline {
  border: 2px solid var(--primary);
  color: var(--primary);
  background: var(--background);
}

.button-whatsapp {
  background: var(--whatsapp);
  color: #ffffff;
}

.button-whatsapp:hover {
  background: var(--whatsapp-hover);
}

.trust-stats {
  background: var(--primary);
  color: #ffffff;
  padding: 2.5rem 0;
}

.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr));
  text-align: center;
}

.stat-value {
  display: block;
  font-size: 2.25rem;
  font-weight: 700;
}

.field {
  margin-bottom: 1.25rem;
}

.field label {
  display: block;
  font-weight: 500;
  margin-bottom: 0.25rem;
}

.field input,
.field textarea {
  width: 100%;
  padding: 0.75rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font: inherit;
}

.field input:invalid:focus,
.field textarea:invalid:focus {
  outline: 2px solid #ef4444;
}

.required {
  color: #ef4444;
}

.testimonial blockquote {
  font-style: italic;
  margin-bottom: 1rem;
}

.testimonial figcaption span {
  display: block;
}

.testimonial .person {
  font-weight: 700;
}

.highlights {
  background: var(--accent);
  border-radius: var(--radius);
  padding: 1.5rem;
  margin: 2rem 0;
}

.contact-item {
  margin-bottom: 1.5rem;
}

.hours {
  display: grid;
  grid-template-columns: 1fr auto;
  gap: 0.75rem;
  margin-bottom: 2rem;
}

.hours dd {
  font-weight: 600;
}

.quick-contact {
  border-top: 1px solid var(--border);
  padding-top: 1.5rem;
}

.team-member {
  text-align: center;
}

.team-member a {
  display: block;
  text-decoration: none;
  margin-top: 0.5rem;
}

.avatar {
  width: 6rem;
  height: 6rem;
  border-radius: 50%;
  margin: 0 auto 1rem;
  display: flex;
  align-items: center;
  justify-content: center;
  background: linear-gradient(135deg, #60a5fa, var(--primary));
  color: #ffffff;
  font-size: 1.875rem;
  font-weight: 700;
}

.site-footer {
  background: #111827;
  color: #ffffff;
  padding: 2rem 0;
}

.site-footer p {
  color: #9ca3af;
}

.copyright {
  font-size: 0.875rem;
  margin-top: 1rem;
}
"#;

const DEFAULT_JS: &str = r#"// MMS site runtime
(function() {
  'use strict';

  const nav = document.querySelector('[data-nav]');
  const button = nav && nav.querySelector('[data-nav-toggle]');

  if (nav && button) {
    let state = nav.getAttribute('data-state') === 'expanded' ? 'expanded' : 'collapsed';

    // toggle flips; link_selected always collapses
    const next = function(current, event) {
      if (event === 'toggle') {
        return current === 'collapsed' ? 'expanded' : 'collapsed';
      }
      return 'collapsed';
    };

    const render = function() {
      const expanded = state === 'expanded';
      nav.setAttribute('data-state', state);
      button.setAttribute('aria-expanded', expanded ? 'true' : 'false');
      button.setAttribute('aria-label', expanded ? 'Close menu' : 'Open menu');
      button.querySelector('.nav-toggle-icon').textContent = expanded ? '×' : '☰';

      let panel = nav.querySelector('[data-nav-panel]');
      if (expanded && !panel) {
        panel = document.createElement('div');
        panel.className = 'mobile-menu';
        panel.id = 'mobile-menu';
        panel.setAttribute('data-nav-panel', '');
        nav.querySelectorAll('.nav-link').forEach(function(link) {
          const item = document.createElement('a');
          item.className = 'mobile-link';
          item.href = link.getAttribute('href');
          item.textContent = link.textContent;
          panel.appendChild(item);
        });
        nav.appendChild(panel);
      } else if (!expanded && panel) {
        panel.remove();
      }
    };

    const dispatch = function(event) {
      state = next(state, event);
      render();
    };

    button.addEventListener('click', function() {
      dispatch('toggle');
    });

    nav.addEventListener('click', function(e) {
      if (e.target.closest('[data-nav-panel] a')) {
        dispatch('link_selected');
      }
    });
  }

  // Hand-off links only leave the page once required fields are filled.
  document.querySelectorAll('[data-bulk-order]').forEach(function(form) {
    form.addEventListener('submit', function(e) {
      e.preventDefault();
    });

    form.querySelectorAll('[data-handoff]').forEach(function(link) {
      link.addEventListener('click', function(e) {
        if (!form.reportValidity()) {
          e.preventDefault();
        }
      });
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(":root"));
        assert!(css.contains(".mobile-menu"));
        assert!(css.contains("--primary"));
    }

    #[test]
    fn generates_nav_runtime() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("data-nav-toggle"));
        assert!(js.contains("link_selected"));
        assert!(js.contains("reportValidity"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn minifies_site_css() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();
        assert!(minified.len() < DEFAULT_CSS.len());
    }

    #[test]
    fn minifies_html() {
        let html = "<ul>\n  <li>One</li>\n\n\n  <li>Two</li>\n</ul>\n";

        assert_eq!(
            AssetPipeline::minify_html(html),
            "<ul><li>One</li><li>Two</li></ul>"
        );
    }

    #[test]
    fn minify_html_reuses_compiled_patterns() {
        let html = "<p>One</p>\n\n<p>Two</p>";

        let first = AssetPipeline::minify_html(html);
        let second = AssetPipeline::minify_html(html);

        assert_eq!(first, "<p>One</p><p>Two</p>");
        assert_eq!(first, second);
    }

    #[test]
    fn copies_nested_assets_and_skips_dotfiles() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("assets");
        let target = temp.path().join("dist/assets");

        fs::create_dir_all(source.join("img")).unwrap();
        fs::write(source.join("mms-logo.png"), b"png").unwrap();
        fs::write(source.join("img/site.jpg"), b"jpg").unwrap();
        fs::write(source.join(".DS_Store"), b"junk").unwrap();

        let copied = AssetPipeline::copy_dir(&source, &target).unwrap();

        assert_eq!(copied, 2);
        assert!(target.join("mms-logo.png").exists());
        assert!(target.join("img/site.jpg").exists());
        assert!(!target.join(".DS_Store").exists());
    }
}
