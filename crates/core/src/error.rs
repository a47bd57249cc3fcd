//! Error types for Page Zen operations.
//!
//! [`PageZenError`] covers every failure that is fatal to a single extraction
//! call: reaching the source page, decoding its body, and locating article
//! content. Markdown rendering and the debug artifact write are deliberately
//! absent here; those degrade silently and are only reported through logging.
//!
//! # Example
//!
//! ```rust
//! use page_zen_core::{PageZenError, Result};
//!
//! fn require_body(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(PageZenError::NotReadable("empty document".to_string()));
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction operations.
#[derive(Error, Debug)]
pub enum PageZenError {
    /// Transport-level failure reaching the source URL.
    ///
    /// Wraps DNS failures, refused connections, TLS errors and similar.
    /// HTTP status codes are never turned into this variant.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The outbound fetch exceeded the configured timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be decoded or parsed as HTML.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The readability pass found no article content.
    ///
    /// This is the dominant real-world failure: navigation pages, search
    /// results and error pages with nothing that scores as a main body.
    #[error("No readable article content: {0}")]
    NotReadable(String),

    /// A removal rule or boilerplate pattern could not be compiled.
    #[error("Invalid cleaning rule: {0}")]
    InvalidRule(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Local input (file or stdin) could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File I/O errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for PageZenError.
pub type Result<T> = std::result::Result<T, PageZenError>;
