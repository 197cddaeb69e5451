//! reportdesk: content resolution for a financial research publisher
//!
//! Reports and models are markdown documents with YAML front-matter. This
//! crate parses them into typed records, renders their bodies to HTML and
//! attaches external slide decks to reports.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentService, FsSlides, FsStore, MarkdownRenderer};

/// A research site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Markdown content directory (holds `reports/` and `models/`)
    pub content_dir: std::path::PathBuf,
    /// Slide deck directory (holds `<report id>/slides.json`)
    pub slides_dir: std::path::PathBuf,
    /// Public (export) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let slides_dir = base_dir.join(&config.slides_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            slides_dir,
            public_dir,
        })
    }

    /// Build the content service over this site's directories
    pub fn content_service(&self) -> ContentService {
        let renderer = MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
        .escape_html(self.config.markdown.escape_html);

        ContentService::new(
            Arc::new(FsStore::new(&self.content_dir)),
            Arc::new(FsSlides::new(&self.slides_dir)),
        )
        .with_renderer(renderer)
        .with_sourcing(self.config.slides.sourcing)
    }

    /// Export every record as JSON
    pub async fn export(&self) -> Result<()> {
        commands::export::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
