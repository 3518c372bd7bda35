//! Aggregated results of one batch

use docsort_domain::ProcessingOutcome;
use serde::{Deserialize, Serialize};

/// Outcome of a whole batch, in submission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of files submitted
    pub total: usize,

    /// Files stored
    pub successful: usize,

    /// Files that failed
    pub failed: usize,

    /// One outcome per submitted file, same order as submitted
    pub results: Vec<ProcessingOutcome>,
}

impl BatchSummary {
    /// Build a summary, counting successes and failures
    pub fn from_outcomes(results: Vec<ProcessingOutcome>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }

    /// Whether every file was stored
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Generate a summary report of the batch
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Batch Summary".to_string(),
            "=============".to_string(),
            format!(
                "Files: {} ({} stored, {} failed)",
                self.total, self.successful, self.failed
            ),
        ];

        for outcome in &self.results {
            match (outcome.folder(), &outcome.error) {
                (Some(folder), _) => lines.push(format!("  {} → {}", outcome.file, folder)),
                (None, Some(error)) => {
                    lines.push(format!("  {} ✗ {}", outcome.file, error))
                }
                (None, None) => lines.push(format!("  {} ✗", outcome.file)),
            }
        }

        lines.join("\n")
    }
}
