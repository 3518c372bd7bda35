//! Configuration file parsing for the server.
//!
//! Loads settings from TOML: bind address, storage and upload directories,
//! upload limits, and the classifier, pipeline and logging sections.
//! `PORT` and `OPENAI_API_KEY` from the environment override the file.

use docsort_classifier::{ClassifierConfig, API_KEY_ENV};
use docsort_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `bind_port`
pub const PORT_ENV: &str = "PORT";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Environment override could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// A field failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (default 5000)
    pub bind_port: u16,

    /// Root of the category folder tree
    pub storage_dir: PathBuf,

    /// Where uploads wait while their batch is processed
    pub upload_dir: PathBuf,

    /// Files accepted in one upload request
    pub max_files_per_request: usize,

    /// Request body limit in bytes
    pub max_request_bytes: usize,

    /// Accepted extensions, lower-case with the leading dot
    pub allowed_extensions: Vec<String>,

    /// Classifier and LLM provider settings
    pub classifier: ClassifierConfig,

    /// Batch processing settings
    pub pipeline: PipelineConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
            storage_dir: PathBuf::from("storage"),
            upload_dir: PathBuf::from("uploads"),
            max_files_per_request: 10,
            max_request_bytes: 100 * 1024 * 1024,
            allowed_extensions: [".pdf", ".docx", ".txt", ".jpg", ".jpeg", ".png"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            classifier: ClassifierConfig::default(),
            pipeline: PipelineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PORT` and `OPENAI_API_KEY` from the process environment
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            self.bind_port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: PORT_ENV,
                value: port.clone(),
            })?;
        }
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.classifier.api_key = Some(key);
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files_per_request == 0 {
            return Err(ConfigError::Invalid(
                "max_files_per_request must be greater than 0".to_string(),
            ));
        }
        if self.max_request_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_request_bytes must be greater than 0".to_string(),
            ));
        }
        if let Some(bad) = self
            .allowed_extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(ConfigError::Invalid(format!(
                "allowed extension {:?} must start with '.'",
                bad
            )));
        }
        self.classifier
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("classifier: {}", e)))?;
        self.pipeline
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("pipeline: {}", e)))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

/// Lower-cased extension of `filename` with its leading dot
pub fn dotted_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.max_files_per_request, 10);
        assert_eq!(config.pipeline.chunk_size, 3);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 8080
            storage_dir = "/srv/docs"
            max_files_per_request = 4

            [classifier]
            model = "gpt-4o-mini"
            excerpt_chars = 2000

            [pipeline]
            chunk_size = 2

            [logging]
            level = "debug"
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage_dir, PathBuf::from("/srv/docs"));
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_files_per_request, 4);
        assert_eq!(config.classifier.model, "gpt-4o-mini");
        assert_eq!(config.classifier.excerpt_chars, 2000);
        assert_eq!(config.classifier.timeout_secs, 60);
        assert_eq!(config.pipeline.chunk_size, 2);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml_section() {
        let result = ServerConfig::from_toml("[pipeline]\nchunk_size = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::default()
            .apply_env_with(|var| match var {
                "PORT" => Some("6001".to_string()),
                "OPENAI_API_KEY" => Some("sk-test".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.bind_port, 6001);
        assert!(config.classifier.has_api_key());
    }

    #[test]
    fn test_bad_port_env() {
        let result = ServerConfig::default().apply_env_with(|var| {
            (var == "PORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEnv { var: "PORT", .. })));
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension("scan.PDF").as_deref(), Some(".pdf"));
        assert_eq!(dotted_extension("a.b.jpeg").as_deref(), Some(".jpeg"));
        assert_eq!(dotted_extension("README"), None);
    }
}
