//! docsort Text Extraction
//!
//! Turns an uploaded file into plain text for the classifier.
//!
//! # Supported formats
//!
//! | extension | adapter |
//! |---|---|
//! | `pdf` | `pdf-extract` on a blocking worker |
//! | `docx` | `zip` + `regex` over `word/document.xml` on a blocking worker |
//! | `txt` | UTF-8 read |
//! | `jpg`, `jpeg`, `png` | placeholder text (no OCR) |
//!
//! A file that is the right kind but cannot be read yields the string
//! `Error extracting <KIND> text: <reason>` so classification can still run.
//! Only an unknown extension is an error.
//!
//! # Examples
//!
//! ```no_run
//! use docsort_domain::traits::TextExtractor;
//! use docsort_text::FileTextExtractor;
//! use std::path::Path;
//!
//! # async fn example() {
//! let extractor = FileTextExtractor::new();
//! let text = extractor.extract(Path::new("uploads/notes.txt"), "txt").await.unwrap();
//! println!("{}", text);
//! # }
//! ```

#![warn(missing_docs)]

pub mod docx;
pub mod error;

use docsort_domain::traits::TextExtractor;
use std::path::Path;
use tracing::{debug, warn};

pub use error::{ExtractionError, Result};

/// Extensions (lower-case, no dot) with an adapter
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "jpg", "jpeg", "png"];

/// Dispatches on file extension to the matching format adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Whether `extension` (lower-case, no dot) has an adapter
    pub fn supports(extension: &str) -> bool {
        SUPPORTED_EXTENSIONS.contains(&extension)
    }

    async fn extract_pdf(path: &Path) -> Result<String> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text(&path).map_err(|e| ExtractionError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
    }

    async fn extract_docx(path: &Path) -> Result<String> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || docx::extract_docx(&path))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
    }

    async fn extract_txt(path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    fn describe_image(path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("Image file: {} (OCR not implemented yet)", name)
    }
}

/// Render an adapter failure as text the classifier can still work with
fn degrade(kind: &str, path: &Path, result: Result<String>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), kind, error = %e, "Text extraction failed");
            format!("Error extracting {} text: {}", kind, e)
        }
    }
}

impl TextExtractor for FileTextExtractor {
    type Error = ExtractionError;

    async fn extract(&self, path: &Path, extension: &str) -> Result<String> {
        let text = match extension {
            "pdf" => degrade("PDF", path, Self::extract_pdf(path).await),
            "docx" => degrade("DOCX", path, Self::extract_docx(path).await),
            "txt" => degrade("TXT", path, Self::extract_txt(path).await),
            "jpg" | "jpeg" | "png" => Self::describe_image(path),
            other => {
                return Err(ExtractionError::UnsupportedFileType(format!(".{}", other)));
            }
        };

        debug!(path = %path.display(), chars = text.chars().count(), "Extracted text");
        Ok(text)
    }
}
