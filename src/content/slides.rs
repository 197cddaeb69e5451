//! Slide-deck resolution for report presentations

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::{ContentError, Result};
use super::record::Slide;

/// Looks up the slide deck that belongs to a report.
///
/// Decks are keyed by report id; the report's `slidesSource` string only
/// signals that a deck exists.
#[async_trait]
pub trait SlideDeckResolver: Send + Sync {
    /// Ordered slides of a report's deck; `NotFound` if it has none
    async fn resolve_slides(&self, report_id: &str) -> Result<Vec<Slide>>;
}

/// In-memory id -> deck table
#[derive(Debug, Clone, Default)]
pub struct MemorySlides {
    decks: HashMap<String, Vec<Slide>>,
}

impl MemorySlides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, report_id: impl Into<String>, slides: Vec<Slide>) {
        self.decks.insert(report_id.into(), slides);
    }

    pub fn with_deck(mut self, report_id: impl Into<String>, slides: Vec<Slide>) -> Self {
        self.insert(report_id, slides);
        self
    }
}

#[async_trait]
impl SlideDeckResolver for MemorySlides {
    async fn resolve_slides(&self, report_id: &str) -> Result<Vec<Slide>> {
        self.decks
            .get(report_id)
            .cloned()
            .ok_or_else(|| ContentError::not_found(format!("slides for report {}", report_id)))
    }
}

/// JSON decks on disk at `<dir>/<report id>/slides.json`
#[derive(Debug, Clone)]
pub struct FsSlides {
    dir: PathBuf,
}

impl FsSlides {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Location of a report's deck file
    pub fn deck_path(&self, report_id: &str) -> PathBuf {
        self.dir.join(report_id).join("slides.json")
    }
}

#[async_trait]
impl SlideDeckResolver for FsSlides {
    async fn resolve_slides(&self, report_id: &str) -> Result<Vec<Slide>> {
        if report_id.is_empty() || report_id.contains(['/', '\\']) || report_id == ".." {
            return Err(ContentError::not_found(format!(
                "slides for report {:?}",
                report_id
            )));
        }

        let path = self.deck_path(report_id);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ContentError::from_io(&path.to_string_lossy(), e))?;

        let slides: Vec<Slide> = serde_json::from_str(&text)
            .map_err(|e| ContentError::parse(format!("{:?}: {}", path, e)))?;

        for (i, slide) in slides.iter().enumerate() {
            if let Some(chart) = &slide.chart_data {
                if !chart.is_consistent() {
                    tracing::warn!(
                        "Slide {} of report {} has {} chart labels but {} values",
                        i + 1,
                        report_id,
                        chart.labels.len(),
                        chart.values.len()
                    );
                }
            }
        }

        Ok(slides)
    }
}
