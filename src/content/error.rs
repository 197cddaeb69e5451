//! Error types for content resolution

use thiserror::Error;

/// Errors produced while resolving content from a store
#[derive(Error, Debug)]
pub enum ContentError {
    /// Malformed frontmatter block (unclosed delimiter, undecodable YAML)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Frontmatter parsed, but does not describe a report/model
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// The requested path, deck or id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The content store itself failed
    #[error("Store error: {0}")]
    StoreError(String),
}

impl ContentError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    /// Whether this is the expected "missing content" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Map an I/O failure for `what` onto NotFound or StoreError
    pub fn from_io(what: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(what.to_string())
        } else {
            Self::StoreError(format!("{}: {}", what, err))
        }
    }
}

/// Result alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
