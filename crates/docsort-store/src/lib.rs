//! docsort Storage Layer
//!
//! Implements the `DocumentStore` trait on the local filesystem.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   Bank Statements/
//!     0190a1b2-....pdf
//!     0190a1b2-..._metadata.json
//!   Receipts/
//!     ...
//! ```
//!
//! Every stored document has exactly one JSON sidecar next to it, named
//! `<stem>_metadata.json`. Folders are created on first store and removed
//! only by [`DocumentStore::delete_folder`].
//!
//! # Examples
//!
//! ```no_run
//! use docsort_store::FsDocumentStore;
//!
//! let store = FsDocumentStore::new("storage").unwrap();
//! // Store is now ready for document operations
//! ```

#![warn(missing_docs)]

use chrono::{SecondsFormat, Utc};
use docsort_domain::traits::{DocumentListing, DocumentStore};
use docsort_domain::{
    normalize, sidecar_filename, ClassificationResult, DocumentMetadata, StoreResult,
    FALLBACK_CATEGORY, METADATA_SUFFIX, UNCATEGORIZED,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Primary document file is missing
    #[error("File not found")]
    FileNotFound,

    /// Document exists but its sidecar is missing
    #[error("Metadata file not found")]
    MetadataNotFound,

    /// Folder is missing
    #[error("Folder not found")]
    FolderNotFound,

    /// Folder name resolves to something other than a directory
    #[error("Path is not a directory")]
    NotADirectory,

    /// Document name resolves to something other than a regular file
    #[error("Path is not a file")]
    NotAFile,

    /// Caller-supplied folder or file name is unusable as a path component
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sidecar could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Reject names that are not a single plain path component
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Folder a classification is filed under
///
/// The suggestion is normalized; separators that survive normalization
/// (custom labels such as "Taxes/2023") are replaced with `-` so the
/// folder stays one level below the root.
pub fn folder_name(classification: &ClassificationResult) -> String {
    let folder = normalize(classification.folder_suggestion()).replace(['/', '\\', '\0'], "-");
    if validate_name(&folder).is_ok() {
        folder
    } else {
        FALLBACK_CATEGORY.to_string()
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn exists(path: &Path) -> Result<bool> {
    Ok(tokio::fs::try_exists(path).await?)
}

/// Filesystem-backed implementation of `DocumentStore`
///
/// All operations are safe to run concurrently: folder creation is
/// idempotent and every document owns a unique generated filename.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an existing stored document, for preview
    ///
    /// # Errors
    ///
    /// - `InvalidName` if either name is not a plain path component
    /// - `FileNotFound` if nothing exists at that location
    /// - `NotAFile` if the location is not a regular file
    pub async fn document_path(&self, folder: &str, stored_filename: &str) -> Result<PathBuf> {
        validate_name(folder)?;
        validate_name(stored_filename)?;

        let path = self.root.join(folder).join(stored_filename);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StoreError::NotAFile),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::FileNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Read every valid sidecar in one folder, oldest first
    ///
    /// Returns `None` when the folder vanished after the root was listed.
    async fn read_folder(&self, folder_path: &Path) -> Result<Option<Vec<DocumentMetadata>>> {
        let mut documents = Vec::new();
        let mut entries = match tokio::fs::read_dir(folder_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.ends_with(METADATA_SUFFIX) {
                continue;
            }

            let sidecar_path = entry.path();
            let metadata = match tokio::fs::read_to_string(&sidecar_path).await {
                Ok(raw) => match serde_json::from_str::<DocumentMetadata>(&raw) {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        warn!(path = %sidecar_path.display(), error = %e, "Skipping unparseable sidecar");
                        continue;
                    }
                },
                Err(e) => {
                    warn!(path = %sidecar_path.display(), error = %e, "Skipping unreadable sidecar");
                    continue;
                }
            };

            // Orphan sidecars (primary file gone) are not listed
            if validate_name(&metadata.stored_filename).is_err()
                || !exists(&folder_path.join(&metadata.stored_filename)).await?
            {
                debug!(path = %sidecar_path.display(), "Skipping sidecar without document");
                continue;
            }

            documents.push(metadata);
        }

        documents.sort_by(|a, b| {
            a.upload_timestamp
                .cmp(&b.upload_timestamp)
                .then_with(|| a.stored_filename.cmp(&b.stored_filename))
        });
        Ok(Some(documents))
    }
}

impl DocumentStore for FsDocumentStore {
    type Error = StoreError;

    async fn store(
        &self,
        file_path: &Path,
        classification: &ClassificationResult,
        original_filename: &str,
    ) -> Result<StoreResult> {
        let stored_filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| StoreError::InvalidName(file_path.display().to_string()))?;

        let folder = folder_name(classification);
        let folder_path = self.root.join(&folder);
        tokio::fs::create_dir_all(&folder_path).await?;

        let file_size = tokio::fs::metadata(file_path).await?.len();

        let storage_path = folder_path.join(&stored_filename);
        tokio::fs::copy(file_path, &storage_path).await?;

        let file_extension = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let category = if classification.category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            classification.category.clone()
        };

        let metadata = DocumentMetadata {
            original_filename: original_filename.to_string(),
            stored_filename: stored_filename.clone(),
            category,
            subcategory: classification.subcategory.clone(),
            confidence: classification.confidence,
            description: classification.description.clone(),
            upload_timestamp: now_timestamp(),
            file_size,
            file_extension,
        };

        let json = serde_json::to_string_pretty(&metadata)?;
        tokio::fs::write(folder_path.join(sidecar_filename(&stored_filename)), json).await?;

        info!(
            original_filename,
            stored_filename = %stored_filename,
            folder = %folder,
            "Stored document"
        );

        Ok(StoreResult {
            folder,
            metadata,
            storage_path,
        })
    }

    async fn list(&self) -> Result<DocumentListing> {
        let mut listing = DocumentListing::new();

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(listing),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Ok(folder) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "Skipping folder with non-UTF-8 name");
                continue;
            };

            match self.read_folder(&entry.path()).await? {
                Some(documents) => {
                    listing.insert(folder, documents);
                }
                None => debug!(folder, "Folder removed while listing"),
            }
        }

        Ok(listing)
    }

    async fn delete_document(&self, folder: &str, stored_filename: &str) -> Result<()> {
        validate_name(folder)?;
        validate_name(stored_filename)?;

        let folder_path = self.root.join(folder);
        let file_path = folder_path.join(stored_filename);
        let sidecar_path = folder_path.join(sidecar_filename(stored_filename));

        if !exists(&file_path).await? {
            return Err(StoreError::FileNotFound);
        }
        if !exists(&sidecar_path).await? {
            return Err(StoreError::MetadataNotFound);
        }

        tokio::fs::remove_file(&file_path).await?;
        tokio::fs::remove_file(&sidecar_path).await?;

        info!(folder, stored_filename, "Deleted document");
        Ok(())
    }

    async fn delete_folder(&self, folder: &str) -> Result<()> {
        validate_name(folder)?;

        let folder_path = self.root.join(folder);
        match tokio::fs::metadata(&folder_path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StoreError::NotADirectory),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::FolderNotFound),
            Err(e) => return Err(e.into()),
        }

        tokio::fs::remove_dir_all(&folder_path).await?;

        info!(folder, "Deleted folder");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(folder: &str) -> ClassificationResult {
        ClassificationResult::new("c", "s", 0.5, Some(folder.to_string()), "d")
    }

    #[tokio::test]
    async fn test_read_folder_missing_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path()).unwrap();

        let result = store.read_folder(&dir.path().join("Gone")).await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Bank Statements").is_ok());
        assert!(validate_name("a.pdf").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }

    #[test]
    fn test_folder_name_normalizes() {
        assert_eq!(folder_name(&suggestion("my bank statements")), "Bank Statements");
        assert_eq!(folder_name(&suggestion("Fahrenheit 451")), "Fahrenheit 451");
    }

    #[test]
    fn test_folder_name_defaults_to_uncategorized() {
        let classification = ClassificationResult::new("c", "s", 0.5, None, "d");
        assert_eq!(folder_name(&classification), "Uncategorized");
    }

    #[test]
    fn test_folder_name_stays_one_level_deep() {
        assert_eq!(folder_name(&suggestion("Taxes/2023")), "Taxes-2023");
        assert_eq!(folder_name(&suggestion("..")), "Other Documents");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = now_timestamp();
        // 2024-03-01T12:34:56.789Z
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[19..20], ".");
    }
}
