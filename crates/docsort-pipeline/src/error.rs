//! Error types for batch processing

use thiserror::Error;

/// Errors that can fail a single file in a batch
///
/// Rendered into the failed outcome's `error` string; a batch itself never fails.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Text extraction rejected the file
    #[error("{0}")]
    Extraction(String),

    /// Document store could not persist the file
    #[error("Storage error: {0}")]
    Storage(String),
}
