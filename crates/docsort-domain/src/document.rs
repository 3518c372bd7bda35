//! Document module - uploaded files, stored documents, and their metadata sidecars

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Suffix appended to a stored file's stem to name its metadata sidecar
pub const METADATA_SUFFIX: &str = "_metadata.json";

/// A file received by the upload ingress, waiting on transient storage
///
/// The batch processor owns it for one processing call and removes
/// `path` afterwards, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Location on transient storage (named by [`generate_stored_filename`])
    pub path: PathBuf,

    /// Filename as supplied by the client
    pub original_filename: String,

    /// Size in bytes as received
    pub size: u64,
}

impl UploadedFile {
    /// Create a new uploaded file record
    pub fn new(path: impl Into<PathBuf>, original_filename: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            original_filename: original_filename.into(),
            size,
        }
    }

    /// Lower-cased extension of the on-disk path, without the leading dot
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default()
    }
}

/// Metadata persisted next to every stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Filename as supplied by the client
    pub original_filename: String,

    /// Generated name the document is stored under (unique per folder)
    pub stored_filename: String,

    /// Main category reported by the classifier
    pub category: String,

    /// Short specific description reported by the classifier
    pub subcategory: String,

    /// Classifier confidence in [0, 1]
    pub confidence: f64,

    /// One-line description of the document
    pub description: String,

    /// ISO-8601 UTC timestamp of when the document was stored
    pub upload_timestamp: String,

    /// Size of the stored file in bytes
    pub file_size: u64,

    /// Extension of the stored file including the leading dot (".pdf"), or empty
    pub file_extension: String,
}

impl DocumentMetadata {
    /// Name of the sidecar file this metadata is persisted under
    pub fn sidecar_filename(&self) -> String {
        sidecar_filename(&self.stored_filename)
    }
}

/// Result of storing one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreResult {
    /// Normalized folder the document landed in
    pub folder: String,

    /// The metadata written to the sidecar
    pub metadata: DocumentMetadata,

    /// Final location of the stored copy
    pub storage_path: PathBuf,
}

/// Generate a collision-resistant stored filename for an upload
///
/// The name is a UUIDv7 followed by the lower-cased extension of the
/// original filename, so names sort by upload time.
///
/// # Examples
///
/// ```
/// use docsort_domain::generate_stored_filename;
///
/// let name = generate_stored_filename("Scan 01.PDF");
/// assert!(name.ends_with(".pdf"));
/// assert_eq!(name.len(), 36 + 4);
/// ```
pub fn generate_stored_filename(original_filename: &str) -> String {
    let id = uuid::Uuid::now_v7();
    match Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}.{}", id, ext.to_lowercase()),
        None => id.to_string(),
    }
}

/// Derive the sidecar filename from a stored filename
///
/// The extension is stripped and [`METADATA_SUFFIX`] appended:
/// `"0190.pdf"` becomes `"0190_metadata.json"`.
pub fn sidecar_filename(stored_filename: &str) -> String {
    let stem = Path::new(stored_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(stored_filename);
    format!("{}{}", stem, METADATA_SUFFIX)
}
