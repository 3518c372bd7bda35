//! Classifier behaviour against a scripted provider

#[cfg(test)]
mod tests {
    use crate::{Classifier, ClassifierConfig, SYSTEM_PROMPT};
    use docsort_domain::traits::LlmProvider;
    use docsort_llm::{LlmError, MockProvider};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const BANK_RESPONSE: &str = r#"{
        "category": "Banking",
        "subcategory": "Checking account statement",
        "confidence": 0.93,
        "suggested_folder_name": "Bank Statements",
        "description": "March statement"
    }"#;

    /// Records the system message alongside the prompt
    struct RecordingProvider {
        seen: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl LlmProvider for RecordingProvider {
        type Error = LlmError;

        async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            Ok(BANK_RESPONSE.to_string())
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_full_classification_flow() {
        let llm = MockProvider::new(BANK_RESPONSE);
        let classifier = Classifier::new(llm.clone(), ClassifierConfig::default());

        let result = classifier.classify("march.pdf", "Account summary").await;

        assert_eq!(result.category, "Banking");
        assert_eq!(result.subcategory, "Checking account statement");
        assert_eq!(result.confidence, 0.93);
        assert_eq!(result.folder_suggestion(), "Bank Statements");
        assert_eq!(llm.call_count(), 1);
        assert!(classifier.is_configured());
        assert_eq!(classifier.model_name(), Some("mock"));
    }

    #[tokio::test]
    async fn test_system_message_is_sent() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let classifier = Classifier::new(
            RecordingProvider { seen: seen.clone() },
            ClassifierConfig::default(),
        );

        classifier.classify("a.txt", "text").await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_PROMPT);
        assert!(seen[0].1.contains("Document Name: a.txt"));
    }

    #[tokio::test]
    async fn test_fenced_response() {
        let llm = MockProvider::new(format!("```json\n{}\n```", BANK_RESPONSE));
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let result = classifier.classify("march.pdf", "text").await;
        assert_eq!(result.folder_suggestion(), "Bank Statements");
    }

    #[tokio::test]
    async fn test_unavailable_classifier_never_fails() {
        let classifier: Classifier<MockProvider> =
            Classifier::unavailable(ClassifierConfig::default());

        let result = classifier.classify("notes.txt", "anything").await;

        assert!(!classifier.is_configured());
        assert_eq!(result.category, "Other Documents");
        assert_eq!(result.subcategory, "Unknown");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.folder_suggestion(), "Other Documents");
        assert!(result.description.contains("notes.txt"));
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back() {
        let llm = MockProvider::new("I think this is a bank statement.");
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let result = classifier.classify("march.pdf", "text").await;

        assert_eq!(result.category, "Uncategorized");
        assert_eq!(result.subcategory, "Unknown");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.folder_suggestion(), "Uncategorized");
        assert!(result.description.starts_with("Error in classification: "));
    }

    #[tokio::test]
    async fn test_non_object_json_falls_back() {
        let llm = MockProvider::new("42");
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let result = classifier.classify("a.pdf", "text").await;
        assert_eq!(result.category, "Uncategorized");
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let mut llm = MockProvider::new(BANK_RESPONSE);
        llm.add_error("broken.pdf");
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let result = classifier.classify("broken.pdf", "text").await;
        assert_eq!(result.category, "Uncategorized");
        assert!(result.description.contains("Mock error"));

        let ok = classifier.classify("fine.pdf", "text").await;
        assert_eq!(ok.category, "Banking");
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let llm = MockProvider::new(BANK_RESPONSE).with_delay(Duration::from_secs(5));
        let config = ClassifierConfig {
            timeout_secs: 1,
            ..ClassifierConfig::default()
        };
        let classifier = Classifier::new(llm, config);

        let result = classifier.classify("slow.pdf", "text").await;
        assert_eq!(result.category, "Uncategorized");
        assert!(result.description.contains("timeout"));
    }

    #[tokio::test]
    async fn test_excerpt_is_capped() {
        let llm = MockProvider::new(BANK_RESPONSE);
        let config = ClassifierConfig {
            excerpt_chars: 10,
            ..ClassifierConfig::default()
        };
        let classifier = Classifier::new(llm.clone(), config);

        classifier.classify("long.txt", "0123456789ABCDEF").await;

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Content Preview: 0123456789..."));
        assert!(!prompt.contains("ABCDEF"));
    }

    #[tokio::test]
    async fn test_default_excerpt_is_1000_chars() {
        let llm = MockProvider::new(BANK_RESPONSE);
        let classifier = Classifier::new(llm.clone(), ClassifierConfig::default());

        let text = format!("{}{}", "a".repeat(1000), "b".repeat(50));
        classifier.classify("big.txt", &text).await;

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains(&"a".repeat(1000)));
        assert!(!prompt.contains(&format!("{}b", "a".repeat(1000))));
    }
}
