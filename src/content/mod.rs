//! Content module - front-matter, markdown rendering, stores and the content service

mod error;
pub mod frontmatter;
mod markdown;
mod presentation;
mod record;
pub mod service;
pub mod slides;
pub mod store;

pub use error::{ContentError, Result};
pub use frontmatter::Metadata;
pub use markdown::MarkdownRenderer;
pub use presentation::SlideCursor;
pub use record::{ChartData, ModelFrontmatter, ModelRecord, ReportFrontmatter, ReportRecord, Slide};
pub use service::{ContentService, ContentStatus, Diagnostic, Listing, SlideSourcing};
pub use slides::{FsSlides, MemorySlides, SlideDeckResolver};
pub use store::{Category, ContentStore, FsStore, MemoryStore};
