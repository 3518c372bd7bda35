//! Error types for text extraction

use thiserror::Error;

/// Errors that can occur while extracting text
///
/// Only [`ExtractionError::UnsupportedFileType`] leaves
/// [`FileTextExtractor::extract`](crate::FileTextExtractor); the other
/// variants are rendered into the returned text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No adapter handles this extension
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// File could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// PDF parser failure
    #[error("{0}")]
    Pdf(String),

    /// DOCX container or XML failure
    #[error("{0}")]
    Docx(String),

    /// Blocking worker panicked or was cancelled
    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractionError>;
