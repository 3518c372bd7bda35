//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates; the batch processor
//! and the server receive them at construction so tests can swap in doubles.

use crate::{ClassificationResult, DocumentMetadata, StoreResult};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;
use std::path::Path;

/// Folder name → documents in that folder
pub type DocumentListing = BTreeMap<String, Vec<DocumentMetadata>>;

/// Trait for pulling text out of an uploaded file
///
/// Implemented by the infrastructure layer (docsort-text)
pub trait TextExtractor: Send + Sync {
    /// Error type for extraction operations
    type Error: Display + Send;

    /// Extract text from the file at `path`
    ///
    /// `extension` is lower-case without the leading dot. Readable-but-broken
    /// files yield a best-effort error string as text; only files that cannot
    /// be handled at all (unsupported extension) return `Err`.
    fn extract(
        &self,
        path: &Path,
        extension: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (docsort-llm)
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: Display + Send;

    /// Generate a completion for `prompt` under the given system instruction
    fn generate(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str;
}

/// Trait for persisting classified documents
///
/// Implemented by the infrastructure layer (docsort-store)
pub trait DocumentStore: Send + Sync {
    /// Error type for store operations
    type Error: Display + Send;

    /// Store a copy of `file_path` under the normalized folder for `classification`
    fn store(
        &self,
        file_path: &Path,
        classification: &ClassificationResult,
        original_filename: &str,
    ) -> impl Future<Output = Result<StoreResult, Self::Error>> + Send;

    /// List every folder with its documents
    fn list(&self) -> impl Future<Output = Result<DocumentListing, Self::Error>> + Send;

    /// Delete one document and its sidecar
    fn delete_document(
        &self,
        folder: &str,
        stored_filename: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete a folder and everything in it
    fn delete_folder(&self, folder: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
