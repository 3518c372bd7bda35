//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_classification;
use crate::prompt::{excerpt, PromptBuilder, SYSTEM_PROMPT};
use docsort_domain::traits::LlmProvider;
use docsort_domain::{ClassificationResult, FALLBACK_CATEGORY, UNCATEGORIZED};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Record returned when no LLM provider is configured
pub fn unconfigured_fallback(filename: &str) -> ClassificationResult {
    ClassificationResult::new(
        FALLBACK_CATEGORY,
        "Unknown",
        0.0,
        Some(FALLBACK_CATEGORY.to_string()),
        format!("Basic classification for {} (classifier not configured)", filename),
    )
}

/// Record returned when classification fails for any reason
pub fn error_fallback(reason: &str) -> ClassificationResult {
    ClassificationResult::new(
        UNCATEGORIZED,
        "Unknown",
        0.0,
        Some(UNCATEGORIZED.to_string()),
        format!("Error in classification: {}", reason),
    )
}

/// The Classifier asks an LLM which folder a document belongs in
///
/// Constructed either with a provider or as [`Classifier::unavailable`];
/// in both cases [`classify`](Self::classify) always returns a record.
pub struct Classifier<L>
where
    L: LlmProvider,
{
    provider: Option<Arc<L>>,
    config: ClassifierConfig,
}

impl<L> Classifier<L>
where
    L: LlmProvider,
{
    /// Create a classifier backed by `provider`
    pub fn new(provider: L, config: ClassifierConfig) -> Self {
        Self {
            provider: Some(Arc::new(provider)),
            config,
        }
    }

    /// Create a classifier with no provider; every call yields the unconfigured fallback
    pub fn unavailable(config: ClassifierConfig) -> Self {
        Self {
            provider: None,
            config,
        }
    }

    /// Whether a provider is attached
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Model name of the attached provider
    pub fn model_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model_name())
    }

    /// The active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a document; never fails
    ///
    /// Any provider, timeout or parse failure is logged and returned as the
    /// "Uncategorized" fallback record with confidence 0.0.
    pub async fn classify(&self, filename: &str, text: &str) -> ClassificationResult {
        match self.try_classify(filename, text).await {
            Ok(result) => result,
            Err(ClassifierError::NotConfigured) => {
                debug!(filename, "Classifier not configured, using fallback classification");
                unconfigured_fallback(filename)
            }
            Err(e) => {
                warn!(filename, error = %e, "Classification failed");
                error_fallback(&e.to_string())
            }
        }
    }

    /// Classify a document, surfacing the failure reason
    pub async fn try_classify(
        &self,
        filename: &str,
        text: &str,
    ) -> Result<ClassificationResult, ClassifierError> {
        let provider = self.provider.as_ref().ok_or(ClassifierError::NotConfigured)?;

        info!(
            filename,
            content_chars = text.chars().count(),
            "Attempting AI classification"
        );

        let prompt = PromptBuilder::new(filename, excerpt(text, self.config.excerpt_chars)).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(
            self.config.timeout(),
            provider.generate(SYSTEM_PROMPT, &prompt),
        )
        .await
        .map_err(|_| ClassifierError::Timeout(self.config.timeout_secs))?
        .map_err(|e| ClassifierError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        let result = parse_classification(&response)?;
        info!(
            filename,
            category = %result.category,
            folder = %result.folder_suggestion(),
            confidence = result.confidence,
            "Classified document"
        );
        Ok(result)
    }
}
