//! docsort Server
//!
//! HTTP front end for the document sorter: multipart uploads are streamed to
//! a transient directory, run through the batch processor, and filed into
//! the category folder tree. Listing, deletion and inline preview routes
//! read that tree back.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use docsort_classifier::Classifier;
use docsort_llm::{LlmError, OpenAiProvider};
use docsort_pipeline::BatchProcessor;
use docsort_store::{FsDocumentStore, StoreError};
use docsort_text::FileTextExtractor;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[source] std::io::Error),

    /// Upload directory could not be prepared
    #[error("Failed to prepare upload directory: {0}")]
    UploadDir(#[source] std::io::Error),

    /// Storage root could not be prepared
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// LLM client could not be built
    #[error("LLM client error: {0}")]
    Llm(#[from] LlmError),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `level`. Calling this twice is harmless.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the shared state: directories, classifier, store and processor
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    std::fs::create_dir_all(&config.upload_dir).map_err(ServerError::UploadDir)?;
    let store = Arc::new(FsDocumentStore::new(config.storage_dir.clone())?);

    let classifier_config = config.classifier.clone();
    let classifier = match classifier_config.api_key.clone() {
        Some(key) if !key.trim().is_empty() => {
            let provider = OpenAiProvider::new(
                &classifier_config.endpoint,
                &classifier_config.model,
                key,
            )?
            .with_temperature(classifier_config.temperature)
            .with_timeout(classifier_config.timeout())?;
            info!("Classifier configured with model {}", classifier_config.model);
            Classifier::new(provider, classifier_config)
        }
        _ => {
            warn!(
                "No API key configured; uploads will be filed under \"Other Documents\""
            );
            Classifier::unavailable(classifier_config)
        }
    };
    let classifier_model = classifier.model_name().map(str::to_string);

    let processor = BatchProcessor::new(
        Arc::new(FileTextExtractor::new()),
        Arc::new(classifier),
        store.clone(),
        config.pipeline.clone(),
    );

    Ok(AppState {
        processor: Arc::new(processor),
        store,
        upload_dir: Arc::new(config.upload_dir.clone()),
        allowed_extensions: Arc::new(config.allowed_extensions.clone()),
        max_files: config.max_files_per_request,
        max_request_bytes: config.max_request_bytes,
        classifier_model,
    })
}

/// Start the HTTP server
///
/// Validates configuration, prepares directories and the classifier, and
/// serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting docsort server");
    info!("Storage directory: {}", config.storage_dir.display());
    info!("Upload directory: {}", config.upload_dir.display());

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr())
        .await
        .map_err(ServerError::Bind)?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> ServerConfig {
        ServerConfig {
            storage_dir: dir.path().join("storage"),
            upload_dir: dir.path().join("uploads"),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_build_state_creates_directories() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let state = build_state(&config).unwrap();
        assert!(config.storage_dir.is_dir());
        assert!(config.upload_dir.is_dir());
        assert_eq!(state.max_files, 10);
        assert!(state.classifier_model.is_none());
    }

    #[test]
    fn test_build_state_with_api_key() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.classifier.api_key = Some("sk-test".to_string());
        config.classifier.model = "gpt-4o-mini".to_string();

        let state = build_state(&config).unwrap();
        assert_eq!(state.classifier_model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_blank_api_key_is_unconfigured() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.classifier.api_key = Some("   ".to_string());

        let state = build_state(&config).unwrap();
        assert!(state.classifier_model.is_none());
    }
}
