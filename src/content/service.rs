//! Content service - resolves reports and models from a content store

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ContentError, Result};
use super::frontmatter::{self, Metadata};
use super::markdown::MarkdownRenderer;
use super::record::{ModelFrontmatter, ModelRecord, ReportFrontmatter, ReportRecord, Slide};
use super::slides::SlideDeckResolver;
use super::store::{Category, ContentStore};

/// Where a report's slides come from on a detail fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideSourcing {
    /// Only the external deck, and only when `slidesSource` is set.
    /// Slides written in the front-matter are ignored.
    #[default]
    ExternalOnly,
    /// Front-matter slides when there are any, else the external deck
    PreferInline,
}

/// A document skipped while listing a category
#[derive(Debug)]
pub struct Diagnostic {
    pub path: String,
    pub error: ContentError,
}

/// Result of scanning one category
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Listing<T> {
    fn log_diagnostics(&self, category: Category) {
        for diagnostic in &self.diagnostics {
            tracing::warn!(
                "Skipping {} document {}: {}",
                category,
                diagnostic.path,
                diagnostic.error
            );
        }
    }
}

/// Document counts per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentStatus {
    pub reports: usize,
    pub models: usize,
    /// Documents that could not be parsed, across both categories
    pub skipped: usize,
}

/// Front-matter types that carry a lookup id
trait Identified: DeserializeOwned {
    fn id(&self) -> &str;
}

impl Identified for ReportFrontmatter {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ModelFrontmatter {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Resolves reports and models from a content store.
///
/// Every call reads the store afresh; nothing is cached between calls.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    slides: Arc<dyn SlideDeckResolver>,
    renderer: Arc<MarkdownRenderer>,
    sourcing: SlideSourcing,
}

impl ContentService {
    /// Create a service with the default renderer and slide sourcing
    pub fn new(store: Arc<dyn ContentStore>, slides: Arc<dyn SlideDeckResolver>) -> Self {
        Self {
            store,
            slides,
            renderer: Arc::new(MarkdownRenderer::new()),
            sourcing: SlideSourcing::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn with_sourcing(mut self, sourcing: SlideSourcing) -> Self {
        self.sourcing = sourcing;
        self
    }

    /// Front-matter of every report, plus the documents that were skipped
    pub async fn scan_reports(&self) -> Result<Listing<ReportFrontmatter>> {
        self.scan(Category::Reports).await
    }

    /// Front-matter of every model, plus the documents that were skipped
    pub async fn scan_models(&self) -> Result<Listing<ModelFrontmatter>> {
        self.scan(Category::Models).await
    }

    /// Front-matter of every report in store order. Bodies are not rendered.
    pub async fn list_reports(&self) -> Result<Vec<ReportFrontmatter>> {
        let listing = self.scan_reports().await?;
        listing.log_diagnostics(Category::Reports);
        Ok(listing.items)
    }

    /// Front-matter of every model in store order. Bodies are not rendered.
    pub async fn list_models(&self) -> Result<Vec<ModelFrontmatter>> {
        let listing = self.scan_models().await?;
        listing.log_diagnostics(Category::Models);
        Ok(listing.items)
    }

    /// Resolve one report with its rendered body and slides.
    ///
    /// `Ok(None)` means no report has this id.
    pub async fn get_report(&self, id: &str) -> Result<Option<ReportRecord>> {
        let Some(path) = self.locate::<ReportFrontmatter>(Category::Reports, id).await? else {
            return Ok(None);
        };

        let (meta, body) = self.load::<ReportFrontmatter>(&path).await?;
        let content = self.renderer.render(&body);
        let slides = self.resolve_slides(&meta).await?;

        Ok(Some(ReportRecord {
            meta,
            content,
            slides,
        }))
    }

    /// Resolve one model with its rendered body.
    ///
    /// `Ok(None)` means no model has this id.
    pub async fn get_model(&self, id: &str) -> Result<Option<ModelRecord>> {
        let Some(path) = self.locate::<ModelFrontmatter>(Category::Models, id).await? else {
            return Ok(None);
        };

        let (meta, body) = self.load::<ModelFrontmatter>(&path).await?;
        let content = self.renderer.render(&body);

        Ok(Some(ModelRecord { meta, content }))
    }

    /// Count the documents of both categories
    pub async fn status(&self) -> Result<ContentStatus> {
        let reports = self.scan_reports().await?;
        reports.log_diagnostics(Category::Reports);
        let models = self.scan_models().await?;
        models.log_diagnostics(Category::Models);
        Ok(ContentStatus {
            reports: reports.items.len(),
            models: models.items.len(),
            skipped: reports.diagnostics.len() + models.diagnostics.len(),
        })
    }

    async fn scan<T: DeserializeOwned>(&self, category: Category) -> Result<Listing<T>> {
        let paths = self.store.list_paths(category).await?;
        let mut listing = Listing {
            items: Vec::with_capacity(paths.len()),
            diagnostics: Vec::new(),
        };

        for path in paths {
            match self.load_meta::<T>(&path).await {
                Ok(meta) => listing.items.push(meta),
                Err(error @ ContentError::StoreError(_)) => return Err(error),
                Err(error) => listing.diagnostics.push(Diagnostic { path, error }),
            }
        }

        Ok(listing)
    }

    /// Path of the first document in `category` whose id matches
    async fn locate<T: Identified>(&self, category: Category, id: &str) -> Result<Option<String>> {
        for path in self.store.list_paths(category).await? {
            match self.load_meta::<T>(&path).await {
                Ok(meta) if meta.id() == id => return Ok(Some(path)),
                Ok(_) => {}
                Err(e @ ContentError::StoreError(_)) => return Err(e),
                Err(e) => tracing::warn!("Skipping {} document {}: {}", category, path, e),
            }
        }
        tracing::debug!("No {} document with id {:?}", category, id);
        Ok(None)
    }

    async fn load_meta<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.store.read_document(path).await?;
        let (metadata, _) = frontmatter::parse(&text)?;
        decode(metadata, path)
    }

    async fn load<T: DeserializeOwned>(&self, path: &str) -> Result<(T, String)> {
        let text = self.store.read_document(path).await?;
        let (metadata, body) = frontmatter::parse(&text)?;
        Ok((decode(metadata, path)?, body.to_string()))
    }

    async fn resolve_slides(&self, meta: &ReportFrontmatter) -> Result<Vec<Slide>> {
        if self.sourcing == SlideSourcing::PreferInline && !meta.inline_slides().is_empty() {
            return Ok(meta.inline_slides().to_vec());
        }

        if meta.slides_source.is_none() {
            return Ok(Vec::new());
        }

        match self.slides.resolve_slides(&meta.id).await {
            Ok(slides) => Ok(slides),
            Err(e) if e.is_not_found() => {
                tracing::warn!("Error loading slides for report {}: {}", meta.id, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Check the untyped front-matter against a record type
fn decode<T: DeserializeOwned>(metadata: Metadata, path: &str) -> Result<T> {
    let mapping: serde_yaml::Mapping = metadata
        .into_iter()
        .map(|(key, value)| (serde_yaml::Value::String(key), value))
        .collect();
    serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
        .map_err(|e| ContentError::InvalidMetadata(format!("{}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::slides::MemorySlides;
    use crate::content::store::MemoryStore;
    use async_trait::async_trait;

    const APPLE: &str = r#"---
layout: report
id: "1"
title: "Apple Inc. (AAPL) Valuation Analysis"
publishDate: "2023-06-15"
author: "John Smith"
researchType: "Equity Research"
summary: "A comprehensive valuation analysis of Apple Inc."
slidesSource: "assets/reports/1/slides.json"
---

## Executive Summary

Apple Inc. continues to demonstrate strong financial performance.
"#;

    const SEMIS: &str = r#"---
id: "2"
title: "Semiconductor Sector Outlook"
researchType: "Sector Analysis"
slides:
  - title: "Inline cover"
    type: title
  - title: "Inline body"
---

Cycle analysis.
"#;

    const DCF: &str = r#"---
layout: model
id: "1"
title: "Discounted Cash Flow (DCF) Model - Tech Companies"
modelType: "Valuation Model"
screenshots:
  - "/placeholder.svg"
  - "/placeholder.svg"
---

## Model Overview

1. **Instructions** - Detailed guide
"#;

    fn deck(n: usize) -> Vec<Slide> {
        (1..=n).map(|i| Slide::new(format!("Slide {}", i))).collect()
    }

    fn service(store: MemoryStore, slides: MemorySlides) -> ContentService {
        ContentService::new(Arc::new(store), Arc::new(slides))
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_document("content/reports/apple-valuation.md", APPLE)
            .with_document("content/models/dcf-model.md", DCF)
            .with_document("content/reports/semis.md", SEMIS)
    }

    #[tokio::test]
    async fn test_list_reports_returns_metadata_only() {
        let svc = service(sample_store(), MemorySlides::new());
        let reports = svc.list_reports().await.unwrap();

        let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        for report in &reports {
            let json = serde_json::to_value(report).unwrap();
            assert!(json.get("content").is_none());
            assert!(json.get("slides").is_none());
        }
    }

    #[tokio::test]
    async fn test_list_models() {
        let svc = service(sample_store(), MemorySlides::new());
        let models = svc.list_models().await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].model_type, "Valuation Model");
    }

    #[tokio::test]
    async fn test_get_report_missing_is_none() {
        let svc = service(sample_store(), MemorySlides::new());
        assert!(svc.get_report("missing-id").await.unwrap().is_none());
        assert!(svc.get_model("missing-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_report_attaches_external_slides_in_order() {
        let svc = service(sample_store(), MemorySlides::new().with_deck("1", deck(4)));
        let report = svc.get_report("1").await.unwrap().unwrap();

        assert_eq!(report.meta.title, "Apple Inc. (AAPL) Valuation Analysis");
        assert!(report.content.contains("<h2>Executive Summary</h2>"));
        assert_eq!(report.slides.len(), 4);
        let titles: Vec<&str> = report.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Slide 1", "Slide 2", "Slide 3", "Slide 4"]);
    }

    #[tokio::test]
    async fn test_inline_slides_ignored_without_slides_source() {
        let svc = service(sample_store(), MemorySlides::new().with_deck("2", deck(3)));
        let report = svc.get_report("2").await.unwrap().unwrap();
        assert_eq!(report.meta.inline_slides().len(), 2);
        assert!(report.slides.is_empty());
    }

    #[tokio::test]
    async fn test_prefer_inline_sourcing() {
        let svc = service(sample_store(), MemorySlides::new().with_deck("1", deck(4)))
            .with_sourcing(SlideSourcing::PreferInline);

        let semis = svc.get_report("2").await.unwrap().unwrap();
        let titles: Vec<&str> = semis.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Inline cover", "Inline body"]);

        // No inline slides: falls back to the external deck
        let apple = svc.get_report("1").await.unwrap().unwrap();
        assert_eq!(apple.slides.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_deck_yields_empty_slides() {
        let svc = service(sample_store(), MemorySlides::new());
        let report = svc.get_report("1").await.unwrap().unwrap();
        assert!(report.slides.is_empty());
    }

    #[tokio::test]
    async fn test_get_model_renders_body() {
        let svc = service(sample_store(), MemorySlides::new());
        let model = svc.get_model("1").await.unwrap().unwrap();
        assert_eq!(model.meta.screenshots.as_ref().map(Vec::len), Some(2));
        assert!(model.content.contains("<h2>Model Overview</h2>"));
        assert!(model.content.contains("<strong>Instructions</strong>"));
    }

    #[tokio::test]
    async fn test_malformed_document_is_isolated() {
        let store = MemoryStore::new()
            .with_document("content/reports/good.md", "---\nid: \"1\"\ntitle: Good\n---\nBody")
            .with_document("content/reports/bad.md", "---\nid: \"2\"\ntitle: Never closed\n");
        let svc = service(store, MemorySlides::new());

        let listing = svc.scan_reports().await.unwrap();
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].id, "1");
        assert_eq!(listing.diagnostics.len(), 1);
        assert_eq!(listing.diagnostics[0].path, "content/reports/bad.md");
        assert!(matches!(
            listing.diagnostics[0].error,
            ContentError::ParseError(_)
        ));

        assert_eq!(svc.list_reports().await.unwrap().len(), 1);
        assert!(svc.get_report("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_document_without_id_is_invalid_metadata() {
        let store = MemoryStore::new()
            .with_document("content/models/anon.md", "---\ntitle: No id\n---\n")
            .with_document("content/models/plain.md", "No front-matter at all");
        let svc = service(store, MemorySlides::new());

        let listing = svc.scan_models().await.unwrap();
        assert!(listing.items.is_empty());
        assert_eq!(listing.diagnostics.len(), 2);
        assert!(listing
            .diagnostics
            .iter()
            .all(|d| matches!(d.error, ContentError::InvalidMetadata(_))));
    }

    #[tokio::test]
    async fn test_duplicate_ids_first_wins() {
        let store = MemoryStore::new()
            .with_document("content/reports/a.md", "---\nid: dup\ntitle: First\n---\n")
            .with_document("content/reports/b.md", "---\nid: dup\ntitle: Second\n---\n");
        let svc = service(store, MemorySlides::new());
        let report = svc.get_report("dup").await.unwrap().unwrap();
        assert_eq!(report.meta.title, "First");
    }

    #[tokio::test]
    async fn test_status_counts() {
        let store = sample_store().with_document("content/models/broken.md", "---\nid: x");
        let svc = service(store, MemorySlides::new());
        let status = svc.status().await.unwrap();
        assert_eq!(
            status,
            ContentStatus {
                reports: 2,
                models: 1,
                skipped: 1
            }
        );
    }

    struct Unavailable;

    #[async_trait]
    impl ContentStore for Unavailable {
        async fn list_paths(&self, _category: Category) -> Result<Vec<String>> {
            Err(ContentError::store("connection refused"))
        }

        async fn read_document(&self, _path: &str) -> Result<String> {
            Err(ContentError::store("connection refused"))
        }
    }

    struct BrokenDecks;

    #[async_trait]
    impl SlideDeckResolver for BrokenDecks {
        async fn resolve_slides(&self, _report_id: &str) -> Result<Vec<Slide>> {
            Err(ContentError::store("deck storage offline"))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_distinct_from_not_found() {
        let svc = ContentService::new(Arc::new(Unavailable), Arc::new(MemorySlides::new()));
        assert!(matches!(
            svc.list_reports().await,
            Err(ContentError::StoreError(_))
        ));
        assert!(matches!(
            svc.get_model("1").await,
            Err(ContentError::StoreError(_))
        ));
    }

    /// Lists one document per category but cannot read any of them
    struct ReadOutage;

    #[async_trait]
    impl ContentStore for ReadOutage {
        async fn list_paths(&self, category: Category) -> Result<Vec<String>> {
            Ok(vec![format!("{}apple.md", category.prefix())])
        }

        async fn read_document(&self, _path: &str) -> Result<String> {
            Err(ContentError::store("read timed out"))
        }
    }

    #[tokio::test]
    async fn test_read_failure_is_not_masked_as_missing() {
        let svc = ContentService::new(Arc::new(ReadOutage), Arc::new(MemorySlides::new()));
        assert!(matches!(
            svc.get_report("1").await,
            Err(ContentError::StoreError(_))
        ));
        assert!(matches!(
            svc.get_model("1").await,
            Err(ContentError::StoreError(_))
        ));
        assert!(matches!(
            svc.list_reports().await,
            Err(ContentError::StoreError(_))
        ));
        assert!(matches!(svc.status().await, Err(ContentError::StoreError(_))));
    }

    #[tokio::test]
    async fn test_vanished_document_is_skipped() {
        let store = MemoryStore::new().with_document("content/reports/gone.md", APPLE);
        let svc = ContentService::new(
            Arc::new(ListedButGone(store)),
            Arc::new(MemorySlides::new()),
        );

        assert!(svc.get_report("1").await.unwrap().is_none());
        let listing = svc.scan_reports().await.unwrap();
        assert!(listing.items.is_empty());
        assert!(listing.diagnostics[0].error.is_not_found());
    }

    /// Lists what the inner store lists, but every read misses
    struct ListedButGone(MemoryStore);

    #[async_trait]
    impl ContentStore for ListedButGone {
        async fn list_paths(&self, category: Category) -> Result<Vec<String>> {
            self.0.list_paths(category).await
        }

        async fn read_document(&self, path: &str) -> Result<String> {
            Err(ContentError::not_found(path))
        }
    }

    #[tokio::test]
    async fn test_deck_store_failure_is_surfaced() {
        let svc = ContentService::new(Arc::new(sample_store()), Arc::new(BrokenDecks));
        assert!(matches!(
            svc.get_report("1").await,
            Err(ContentError::StoreError(_))
        ));
        // No slidesSource: the resolver is never asked
        assert!(svc.get_report("2").await.unwrap().is_some());
    }
}
