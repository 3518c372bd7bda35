//! docsort Pipeline
//!
//! Batch processing of uploaded files: extract text, classify, store.
//!
//! # Overview
//!
//! The [`BatchProcessor`] owns a batch of [`UploadedFile`](docsort_domain::UploadedFile)s
//! for the duration of one call and:
//! - **Chunks** the batch into groups of `chunk_size` (default 3)
//! - **Runs** every file of a chunk concurrently through extract → classify → store
//! - **Cleans up** each transient upload once its file is done
//! - **Aggregates** per-file outcomes into a [`BatchSummary`] in submission order
//!
//! # Usage
//!
//! ```no_run
//! use docsort_classifier::{Classifier, ClassifierConfig};
//! use docsort_domain::UploadedFile;
//! use docsort_llm::MockProvider;
//! use docsort_pipeline::{BatchProcessor, PipelineConfig};
//! use docsort_store::FsDocumentStore;
//! use docsort_text::FileTextExtractor;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = BatchProcessor::new(
//!     Arc::new(FileTextExtractor::new()),
//!     Arc::new(Classifier::new(MockProvider::default(), ClassifierConfig::default())),
//!     Arc::new(FsDocumentStore::new("storage")?),
//!     PipelineConfig::default(),
//! );
//!
//! let summary = processor
//!     .process_batch(vec![UploadedFile::new("uploads/0190.pdf", "march.pdf", 1024)])
//!     .await;
//! println!("{}", summary.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod processor;
mod summary;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use processor::BatchProcessor;
pub use summary::BatchSummary;
