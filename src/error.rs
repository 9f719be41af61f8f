//! Error types for the docalign library.

use std::io;
use thiserror::Error;

/// Result type alias for docalign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ingesting or querying a document.
///
/// "Not found" outcomes (text that cannot be located, a selection that
/// touches no paragraph) are represented as empty collections or `None`,
/// never as errors. Errors are reserved for I/O, malformed input, and
/// violated preconditions.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a document file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document JSON could not be deserialized.
    #[error("Document parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A page was queried before its regions were computed.
    #[error("Page {0} has no computed regions; annotate the document first")]
    MissingRegions(u32),

    /// The document structure is internally inconsistent.
    #[error("Invalid document structure: {0}")]
    InvalidDocument(String),
}
