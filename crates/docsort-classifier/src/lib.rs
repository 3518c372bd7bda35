//! docsort Classifier
//!
//! Asks a language model which folder a document belongs in.
//!
//! # Overview
//!
//! The classifier sends the filename and a leading excerpt of the extracted
//! text to an [`LlmProvider`](docsort_domain::traits::LlmProvider) and parses
//! the JSON it answers with into a
//! [`ClassificationResult`](docsort_domain::ClassificationResult).
//!
//! # Architecture
//!
//! ```text
//! filename + text → excerpt → prompt → LLM → fence stripping → JSON → ClassificationResult
//! ```
//!
//! Classification never fails outward: an unconfigured classifier returns an
//! "Other Documents" record, and any failure returns an "Uncategorized"
//! record carrying the reason.
//!
//! # Example Usage
//!
//! ```no_run
//! use docsort_classifier::{Classifier, ClassifierConfig};
//! use docsort_llm::MockProvider;
//!
//! # async fn example() {
//! let llm = MockProvider::new(r#"{"category": "Finance", "suggested_folder_name": "Bank Statements"}"#);
//! let classifier = Classifier::new(llm, ClassifierConfig::default());
//!
//! let result = classifier.classify("march.pdf", "Statement period: March").await;
//! assert_eq!(result.folder_suggestion(), "Bank Statements");
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;

#[cfg(test)]
mod tests;

pub use classifier::{error_fallback, unconfigured_fallback, Classifier};
pub use config::{ClassifierConfig, API_KEY_ENV};
pub use error::ClassifierError;
pub use parser::{extract_json, parse_classification};
pub use prompt::{excerpt, PromptBuilder, SYSTEM_PROMPT};
