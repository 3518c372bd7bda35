//! Classification module - what the classifier says about a document

use serde::{Deserialize, Serialize};

/// Structured classification of one document
///
/// Produced by the classifier and consumed by the document store; the folder
/// suggestion is normalized before anything is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Main category
    pub category: String,

    /// Brief specific description
    pub subcategory: String,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Broad folder name suggested by the model, if any
    pub suggested_folder_name: Option<String>,

    /// Brief description of what the document is
    pub description: String,
}

impl ClassificationResult {
    /// Create a classification record, clamping confidence into [0, 1]
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        confidence: f64,
        suggested_folder_name: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            confidence: clamp_confidence(confidence),
            suggested_folder_name,
            description: description.into(),
        }
    }

    /// The folder suggestion, or [`crate::UNCATEGORIZED`] when absent
    pub fn folder_suggestion(&self) -> &str {
        self.suggested_folder_name
            .as_deref()
            .unwrap_or(crate::UNCATEGORIZED)
    }
}

/// Clamp a confidence value into [0, 1]; NaN becomes 0
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
