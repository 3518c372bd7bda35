//! Chunked concurrent processing of uploaded files

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::summary::BatchSummary;
use docsort_classifier::Classifier;
use docsort_domain::traits::{DocumentStore, LlmProvider, TextExtractor};
use docsort_domain::{ProcessingOutcome, StoreResult, UploadedFile};
use futures::future::join_all;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs extract → classify → store for every uploaded file
///
/// Files are taken in chunks of `chunk_size`; all files of a chunk run
/// concurrently and the next chunk starts once the whole chunk is done.
/// Every transient upload is removed after its file finishes, whatever
/// the outcome.
pub struct BatchProcessor<E, L, S>
where
    E: TextExtractor,
    L: LlmProvider,
    S: DocumentStore,
{
    extractor: Arc<E>,
    classifier: Arc<Classifier<L>>,
    store: Arc<S>,
    config: PipelineConfig,
}

impl<E, L, S> BatchProcessor<E, L, S>
where
    E: TextExtractor,
    L: LlmProvider,
    S: DocumentStore,
{
    /// Create a new BatchProcessor
    pub fn new(
        extractor: Arc<E>,
        classifier: Arc<Classifier<L>>,
        store: Arc<S>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            extractor,
            classifier,
            store,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a batch; outcomes are returned in submission order
    ///
    /// A batch never fails as a whole: each file's failure is recorded in
    /// its own outcome and the remaining files carry on.
    pub async fn process_batch(&self, files: Vec<UploadedFile>) -> BatchSummary {
        let chunk_size = self.config.chunk_size.max(1);
        let chunk_count = files.len().div_ceil(chunk_size);
        info!(files = files.len(), chunk_size, "Processing batch");

        let mut outcomes = Vec::with_capacity(files.len());
        for (idx, chunk) in files.chunks(chunk_size).enumerate() {
            debug!("Processing chunk {}/{}", idx + 1, chunk_count);
            // join_all yields results in input order regardless of completion order
            let results = join_all(chunk.iter().map(|file| self.process_file(file))).await;
            outcomes.extend(results);
        }

        let summary = BatchSummary::from_outcomes(outcomes);
        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Batch complete"
        );
        debug!("{}", summary.summary());
        summary
    }

    /// Process one file and remove its transient upload
    pub async fn process_file(&self, file: &UploadedFile) -> ProcessingOutcome {
        let outcome = match self.run_stages(file).await {
            Ok(result) => ProcessingOutcome::stored(&file.original_filename, result),
            Err(e) => {
                warn!(file = %file.original_filename, error = %e, "Failed to process file");
                ProcessingOutcome::failed(&file.original_filename, e.to_string())
            }
        };

        remove_upload(&file.path).await;
        outcome
    }

    async fn run_stages(&self, file: &UploadedFile) -> Result<StoreResult, PipelineError> {
        let text = self
            .extractor
            .extract(&file.path, &file.extension())
            .await
            .map_err(|e| PipelineError::Extraction(e.to_string()))?;

        let classification = self
            .classifier
            .classify(&file.original_filename, &text)
            .await;

        self.store
            .store(&file.path, &classification, &file.original_filename)
            .await
            .map_err(|e| PipelineError::Storage(e.to_string()))
    }
}

async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed transient upload"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove transient upload"),
    }
}
