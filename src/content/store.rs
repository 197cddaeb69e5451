//! Content stores - where raw documents come from

use async_trait::async_trait;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};

/// Top-level document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Reports,
    Models,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Reports, Category::Models];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Reports => "reports",
            Category::Models => "models",
        }
    }

    /// Store-relative prefix of every document in this category
    pub fn prefix(&self) -> String {
        format!("content/{}/", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of raw documents, addressed by store-relative paths such as
/// `content/reports/apple-valuation.md`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Paths of every document in a category, in the store's own order
    async fn list_paths(&self, category: Category) -> Result<Vec<String>>;

    /// Raw text of one document; `NotFound` if the path does not exist
    async fn read_document(&self, path: &str) -> Result<String>;
}

/// In-memory path -> document table. Listing order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_paths(&self, category: Category) -> Result<Vec<String>> {
        let prefix = category.prefix();
        Ok(self
            .documents
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn read_document(&self, path: &str) -> Result<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| ContentError::not_found(path))
    }
}

/// Markdown files on disk.
///
/// The store path `content/<category>/<file>` maps onto
/// `<content dir>/<category>/<file>`.
#[derive(Debug, Clone)]
pub struct FsStore {
    content_dir: PathBuf,
}

impl FsStore {
    /// Create a store over a content directory
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = path
            .strip_prefix("content/")
            .map(Path::new)
            .ok_or_else(|| ContentError::not_found(path))?;
        // Store paths never climb out of the content directory
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.as_os_str().is_empty() || escapes {
            return Err(ContentError::not_found(path));
        }
        Ok(self.content_dir.join(relative))
    }
}

#[async_trait]
impl ContentStore for FsStore {
    async fn list_paths(&self, category: Category) -> Result<Vec<String>> {
        let dir = self.content_dir.join(category.as_str());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let root = self.content_dir.clone();
        let paths = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let mut paths = Vec::new();
            for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
                let entry = entry.map_err(|e| ContentError::store(format!("{:?}: {}", dir, e)))?;
                let path = entry.path();
                if !entry.file_type().is_file() || !is_markdown_file(path) {
                    continue;
                }
                let relative = path.strip_prefix(&root).unwrap_or(path);
                let key = std::iter::once(Cow::Borrowed("content"))
                    .chain(relative.components().map(|c| c.as_os_str().to_string_lossy()))
                    .collect::<Vec<_>>()
                    .join("/");
                paths.push(key);
            }
            Ok(paths)
        })
        .await
        .map_err(|e| ContentError::store(format!("listing task failed: {}", e)))??;

        tracing::debug!("Listed {} {} documents", paths.len(), category);
        Ok(paths)
    }

    async fn read_document(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        tracing::debug!("Reading {:?}", full);
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| ContentError::from_io(path, e))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
