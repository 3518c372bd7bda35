//! Error types for the Classifier

use thiserror::Error;

/// Errors that can occur during classification
///
/// These never leave [`Classifier::classify`](crate::Classifier::classify);
/// they are folded into a fallback [`ClassificationResult`](docsort_domain::ClassificationResult).
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// No LLM provider configured
    #[error("Classifier not configured")]
    NotConfigured,

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model call exceeded the configured timeout
    #[error("Classification timeout after {0}s")]
    Timeout(u64),

    /// Response was JSON but not a classification object
    #[error("Invalid classification format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::JsonParse(e.to_string())
    }
}
