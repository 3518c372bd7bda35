//! Configuration for the Classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the Classifier and its chat-completions provider
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// API base URL (without `/chat/completions`)
    pub endpoint: String,

    /// Chat model name
    pub model: String,

    /// Bearer token; the classifier runs unconfigured without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// How many leading characters of the document are sent to the model
    pub excerpt_chars: usize,

    /// Maximum time for a single classification call (seconds)
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("excerpt_chars", &self.excerpt_chars)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClassifierConfig {
    /// Get the classification timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Fill `api_key` from `OPENAI_API_KEY` when it is set and non-empty
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.excerpt_chars == 0 {
            return Err("excerpt_chars must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: docsort_llm::openai::DEFAULT_ENDPOINT.to_string(),
            model: docsort_llm::openai::DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: docsort_llm::openai::DEFAULT_TEMPERATURE,
            excerpt_chars: 1000,
            timeout_secs: 60,
        }
    }
}

impl ClassifierConfig {
    /// Aggressive preset: short excerpt and timeout for fast batches
    pub fn aggressive() -> Self {
        Self {
            excerpt_chars: 500,
            timeout_secs: 15,
            ..Self::default()
        }
    }

    /// Lenient preset: longer excerpt and timeout, deterministic sampling
    pub fn lenient() -> Self {
        Self {
            temperature: 0.0,
            excerpt_chars: 4000,
            timeout_secs: 180,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
