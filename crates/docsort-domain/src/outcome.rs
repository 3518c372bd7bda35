//! Outcome module - per-file results of batch processing

use crate::document::StoreResult;
use serde::{Deserialize, Serialize};

/// Result of processing one uploaded file
///
/// Exactly one of `result` and `error` is set, matching `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    /// Whether the file was stored
    pub success: bool,

    /// Original filename of the upload
    pub file: String,

    /// Where and how the file was stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<StoreResult>,

    /// Human-readable failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingOutcome {
    /// A successful outcome
    pub fn stored(file: impl Into<String>, result: StoreResult) -> Self {
        Self {
            success: true,
            file: file.into(),
            result: Some(result),
            error: None,
        }
    }

    /// A failed outcome
    pub fn failed(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            file: file.into(),
            result: None,
            error: Some(error.into()),
        }
    }

    /// Folder the document was stored in, if it succeeded
    pub fn folder(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.folder.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_serializes_without_result() {
        let outcome = ProcessingOutcome::failed("notes.xyz", "Unsupported file type: .xyz");
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["file"], "notes.xyz");
        assert_eq!(json["error"], "Unsupported file type: .xyz");
        assert!(json.get("result").is_none());
        assert!(outcome.folder().is_none());
    }
}
