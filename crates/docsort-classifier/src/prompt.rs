//! LLM prompt engineering for document classification

/// System message sent with every classification request
pub const SYSTEM_PROMPT: &str =
    "You are a document classification expert. Provide accurate JSON responses only.";

const CLASSIFICATION_RULES: &str = r#"CLASSIFICATION RULES - Create broad, reusable folder names:

For BANKING & FINANCIAL documents:
- Bank statements, credit card statements, investment statements → "Bank Statements"
- Salary statements, pay stubs, earnings reports → "Pay Stubs"
- Financial summaries, account summaries → "Financial Documents"

For TAX documents:
- Tax returns, W2s, 1099s, tax receipts → "Tax Documents"
- Tax-related correspondence → "Tax Documents"

For MEDICAL documents:
- Medical bills, insurance claims, doctor reports → "Medical Bills"
- Prescriptions, health records → "Medical Records"

For LEGAL documents:
- Contracts, agreements, legal correspondence → "Legal Documents"
- Court documents, wills, deeds → "Legal Documents"

For PERSONAL documents:
- ID cards, passports, birth certificates → "Personal Documents"
- Marriage certificates, personal correspondence → "Personal Documents"

For JOB & CAREER documents:
- Resumes, job applications, work contracts → "Resumes"
- Performance reviews, work-related correspondence → "Work Documents"

For SCHOOL & ACADEMIC documents:
- Essays, assignments, research papers → "School Work"
- Class notes, academic documents → "School Work"
- Certificates, diplomas → "Academic Certificates"

For RECEIPTS & BILLS:
- Purchase receipts, utility bills → "Receipts"
- Service invoices, subscription bills → "Bills"

For anything else:
- Use "Other Documents"

IMPORTANT: Create broad, practical folder names that can be reused for similar documents!"#;

const OUTPUT_FORMAT: &str = r#"Please provide a JSON response with this structure:
{
  "category": "The main category",
  "subcategory": "A brief specific description",
  "confidence": 0.95,
  "suggested_folder_name": "The broad, practical folder name",
  "description": "Brief description of what this document is"
}"#;

/// The first `max_chars` characters of `text`
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the user prompt for one document
pub struct PromptBuilder<'a> {
    filename: &'a str,
    excerpt: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder; `excerpt` is sent verbatim
    pub fn new(filename: &'a str, excerpt: &'a str) -> Self {
        Self { filename, excerpt }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            CLASSIFICATION_RULES.len() + OUTPUT_FORMAT.len() + self.excerpt.len() + 256,
        );

        prompt.push_str(
            "Analyze this document and classify it into a practical, broad category \
             that would be useful for document organization.\n\n",
        );
        prompt.push_str(&format!("Document Name: {}\n", self.filename));
        prompt.push_str(&format!("Content Preview: {}...\n\n", self.excerpt));
        prompt.push_str(CLASSIFICATION_RULES);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);

        prompt
    }
}
