//! Parse LLM output into a classification record

use crate::error::ClassifierError;
use docsort_domain::classification::clamp_confidence;
use docsort_domain::{ClassificationResult, UNCATEGORIZED};
use serde_json::{Map, Value};

/// Parse an LLM response into a [`ClassificationResult`]
///
/// Missing or non-string text fields fall back to defaults (`category` to
/// "Uncategorized", the rest to empty); a missing or non-numeric confidence
/// becomes 0.0 and any number is clamped into [0, 1].
pub fn parse_classification(response: &str) -> Result<ClassificationResult, ClassifierError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ClassifierError::InvalidFormat("Expected JSON object".to_string()))?;

    let suggested_folder_name = string_field(obj, "suggested_folder_name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ClassificationResult {
        category: string_field(obj, "category")
            .unwrap_or(UNCATEGORIZED)
            .to_string(),
        subcategory: string_field(obj, "subcategory").unwrap_or_default().to_string(),
        confidence: clamp_confidence(obj.get("confidence").and_then(Value::as_f64).unwrap_or(0.0)),
        suggested_folder_name,
        description: string_field(obj, "description").unwrap_or_default().to_string(),
    })
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Extract JSON from a response, handling markdown code fences
///
/// The fence may open the response or sit inside surrounding prose; the
/// content of the first fenced block wins. Unfenced responses are returned
/// trimmed.
pub fn extract_json(response: &str) -> Result<&str, ClassifierError> {
    let trimmed = response.trim();

    let Some(open) = trimmed.find("```") else {
        return Ok(trimmed);
    };

    let after = &trimmed[open + 3..];
    let after = after
        .strip_prefix("json")
        .or_else(|| after.strip_prefix("JSON"))
        .unwrap_or(after);

    let body = match after.find("```") {
        Some(close) => &after[..close],
        None => after,
    };

    let body = body.trim();
    if body.is_empty() {
        return Err(ClassifierError::InvalidFormat("Empty code block".to_string()));
    }
    Ok(body)
}
