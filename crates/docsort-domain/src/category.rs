//! Category module - maps free-text folder suggestions onto the canonical taxonomy
//!
//! The classifier's `suggested_folder_name` is free text. Before a document is
//! stored, the suggestion is normalized so that variations such as
//! "Monthly bank statement" and "BANK STATEMENTS" land in the same folder.

/// Folder used when a suggestion cannot be kept
pub const FALLBACK_CATEGORY: &str = "Other Documents";

/// Folder suggestion used when the classifier produced none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Longest unrecognized label (in characters) kept verbatim as a folder name
pub const MAX_CUSTOM_FOLDER_CHARS: usize = 50;

/// The fixed taxonomy of canonical folder names
pub const CANONICAL_CATEGORIES: &[&str] = &[
    "Bank Statements",
    "Pay Stubs",
    "Financial Documents",
    "Tax Documents",
    "Medical Bills",
    "Medical Records",
    "Legal Documents",
    "Personal Documents",
    "Resumes",
    "Work Documents",
    "School Work",
    "Academic Certificates",
    "Receipts",
    "Bills",
    "Other Documents",
];

/// Ordered (keyword, canonical) pairs; the first keyword contained in the
/// lower-cased label wins.
///
/// Multi-word keys must stay ahead of any looser key they contain
/// ("academic certificate" before "academic", "medical bill" before "bill").
const KEYWORD_TABLE: &[(&str, &str)] = &[
    // Banking & financial
    ("earnings statement", "Pay Stubs"),
    ("earnings statements", "Pay Stubs"),
    ("salary statement", "Pay Stubs"),
    ("salary statements", "Pay Stubs"),
    ("pay stub", "Pay Stubs"),
    ("pay stubs", "Pay Stubs"),
    ("bank statement", "Bank Statements"),
    ("bank statements", "Bank Statements"),
    ("credit card statement", "Bank Statements"),
    ("credit card statements", "Bank Statements"),
    ("financial statement", "Financial Documents"),
    ("financial statements", "Financial Documents"),
    ("investment statement", "Bank Statements"),
    ("investment statements", "Bank Statements"),
    // Tax
    ("tax document", "Tax Documents"),
    ("tax documents", "Tax Documents"),
    ("tax return", "Tax Documents"),
    ("tax returns", "Tax Documents"),
    // Medical
    ("medical record", "Medical Records"),
    ("medical records", "Medical Records"),
    ("medical bill", "Medical Bills"),
    ("medical bills", "Medical Bills"),
    // Legal
    ("legal document", "Legal Documents"),
    ("legal documents", "Legal Documents"),
    ("contract", "Legal Documents"),
    ("contracts", "Legal Documents"),
    // Personal
    ("personal document", "Personal Documents"),
    ("personal documents", "Personal Documents"),
    // Job & career
    ("resume", "Resumes"),
    ("resumes", "Resumes"),
    ("work document", "Work Documents"),
    ("work documents", "Work Documents"),
    // School & academic
    ("essay", "School Work"),
    ("essays", "School Work"),
    ("assignment", "School Work"),
    ("assignments", "School Work"),
    ("school work", "School Work"),
    ("academic certificate", "Academic Certificates"),
    ("academic certificates", "Academic Certificates"),
    ("academic", "School Work"),
    ("academic document", "School Work"),
    ("academic documents", "School Work"),
    ("class notes", "School Work"),
    ("research paper", "School Work"),
    ("research papers", "School Work"),
    // Receipts & bills
    ("receipt", "Receipts"),
    ("receipts", "Receipts"),
    ("invoice", "Bills"),
    ("invoices", "Bills"),
    ("bill", "Bills"),
    ("bills", "Bills"),
];

/// Normalize a suggested folder label to a canonical folder name
///
/// 1. Keyword match on the trimmed, lower-cased label (first table entry wins)
/// 2. Exact (case-sensitive) canonical name
/// 3. Any other label of 1 to 50 characters, verbatim
/// 4. Otherwise [`FALLBACK_CATEGORY`]
///
/// # Examples
///
/// ```
/// use docsort_domain::normalize;
///
/// assert_eq!(normalize("Chase bank statement, March"), "Bank Statements");
/// assert_eq!(normalize("  Fahrenheit 451 "), "Fahrenheit 451");
/// assert_eq!(normalize(""), "Other Documents");
/// ```
pub fn normalize(raw_label: &str) -> String {
    let trimmed = raw_label.trim();
    let lowered = trimmed.to_lowercase();

    if let Some(canonical) = match_keyword(&lowered) {
        return canonical.to_string();
    }

    if is_canonical(trimmed) {
        return trimmed.to_string();
    }

    let length = trimmed.chars().count();
    if length > 0 && length <= MAX_CUSTOM_FOLDER_CHARS {
        return trimmed.to_string();
    }

    FALLBACK_CATEGORY.to_string()
}

/// Check whether a name is exactly one of [`CANONICAL_CATEGORIES`]
pub fn is_canonical(name: &str) -> bool {
    CANONICAL_CATEGORIES.contains(&name)
}

fn match_keyword(lowered: &str) -> Option<&'static str> {
    KEYWORD_TABLE
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(normalize("BANK STATEMENT"), "Bank Statements");
        assert_eq!(normalize("Quarterly Investment Statement"), "Bank Statements");
        assert_eq!(normalize("pay stubs 2024"), "Pay Stubs");
        assert_eq!(normalize("Earnings Statement"), "Pay Stubs");
    }

    #[test]
    fn test_specific_keys_win_over_loose_keys() {
        assert_eq!(normalize("Medical Bill from clinic"), "Medical Bills");
        assert_eq!(normalize("utility bill"), "Bills");
        assert_eq!(normalize("Academic Certificate"), "Academic Certificates");
        assert_eq!(normalize("academic transcript"), "School Work");
        assert_eq!(normalize("Credit Card Statement"), "Bank Statements");
    }

    #[test]
    fn test_table_order_decides_overlapping_labels() {
        // "pay stub" is checked before "bill"
        assert_eq!(normalize("pay stub and bill"), "Pay Stubs");
        // "contract" is checked before "resume"
        assert_eq!(normalize("resume contract"), "Legal Documents");
    }

    #[test]
    fn test_every_canonical_name_maps_to_itself() {
        for name in CANONICAL_CATEGORIES {
            assert_eq!(normalize(name), *name, "canonical name {name} changed");
        }
    }

    #[test]
    fn test_canonical_check_is_case_sensitive() {
        // no keyword, not canonical, short: kept verbatim with its own casing
        assert_eq!(normalize("other documents"), "other documents");
        assert!(!is_canonical("other documents"));
        assert!(is_canonical("Other Documents"));
    }

    #[test]
    fn test_short_custom_labels_are_kept() {
        assert_eq!(normalize("Fahrenheit 451"), "Fahrenheit 451");
        assert_eq!(normalize("  English Literature  "), "English Literature");
        assert_eq!(normalize(UNCATEGORIZED), UNCATEGORIZED);
    }

    #[test]
    fn test_empty_and_whitespace_fall_back() {
        assert_eq!(normalize(""), FALLBACK_CATEGORY);
        assert_eq!(normalize("   "), FALLBACK_CATEGORY);
        assert_eq!(normalize("\t\n"), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_length_boundary() {
        let fifty = "x".repeat(50);
        let fifty_one = "x".repeat(51);
        assert_eq!(normalize(&fifty), fifty);
        assert_eq!(normalize(&fifty_one), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let label = "é".repeat(50);
        assert_eq!(normalize(&label), label);
    }

    #[test]
    fn test_long_label_with_keyword_still_matches() {
        let label = format!("{} tax return {}", "x".repeat(40), "y".repeat(40));
        assert_eq!(normalize(&label), "Tax Documents");
    }
}
