//! docsort Domain Layer
//!
//! This crate contains the core vocabulary of docsort: the records that flow
//! through the upload pipeline, the category normalizer, and the trait
//! interfaces that every other crate implements or consumes.
//!
//! ## Key Concepts
//!
//! - **Canonical folder name**: one of the fixed taxonomy strings every
//!   suggested category converges to (see [`category`])
//! - **Sidecar**: the JSON metadata file paired one-to-one with a stored document
//! - **Chunk**: a fixed-size group of uploads processed concurrently
//! - **Outcome**: the per-file success/failure record of a batch
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business logic only (no I/O)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod classification;
pub mod document;
pub mod outcome;
pub mod traits;

// Re-exports for convenience
pub use category::{normalize, CANONICAL_CATEGORIES, FALLBACK_CATEGORY, UNCATEGORIZED};
pub use classification::ClassificationResult;
pub use document::{
    generate_stored_filename, sidecar_filename, DocumentMetadata, StoreResult, UploadedFile,
    METADATA_SUFFIX,
};
pub use outcome::ProcessingOutcome;
pub use traits::DocumentListing;
