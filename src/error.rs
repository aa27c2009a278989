//! Error types for simple-article.
//!
//! Only faults live here. A page that is not an article is a normal outcome
//! ([`crate::Extraction::NotAnArticle`]) and text that could not be normalized
//! cleanly is reported as a warning on the result, never as an error.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input tree violates a structural assumption (nested document
    /// nodes, empty tag names, excessive depth, malformed node indexes).
    ///
    /// Aborts the current document only.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A scoring table could not be compiled (for example an invalid pattern).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encoding or decoding of a structured article failed.
    #[error("JSON adapter failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
