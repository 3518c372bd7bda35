//! Configuration for batch processing

use serde::{Deserialize, Serialize};

/// Configuration for the batch processor
///
/// # Examples
///
/// ```
/// use docsort_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.chunk_size, 3);
///
/// let config = PipelineConfig::sequential();
/// assert_eq!(config.chunk_size, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Files processed concurrently; the next chunk starts when this one finishes
    /// Default: 3
    pub chunk_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { chunk_size: 3 }
    }
}

impl PipelineConfig {
    /// One file at a time
    pub fn sequential() -> Self {
        Self { chunk_size: 1 }
    }

    /// Wider chunks for a classifier with generous rate limits
    pub fn aggressive() -> Self {
        Self { chunk_size: 8 }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        Ok(())
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
