//! Raw text from Office Open XML word-processing documents
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`.
//! Paragraph ends and explicit breaks become newlines, tabs become `\t`,
//! every other tag is dropped and the five XML entities are unescaped.

use crate::error::{ExtractionError, Result};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

const BODY_PART: &str = "word/document.xml";

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("valid regex"));

static TAB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:tab\s*/>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Read the document body of a `.docx` file (blocking)
pub fn extract_docx(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(|e| ExtractionError::Docx(format!("{}: {}", BODY_PART, e)))?
        .read_to_string(&mut xml)?;

    Ok(xml_to_text(&xml))
}

/// Convert WordprocessingML body markup into plain text
pub fn xml_to_text(xml: &str) -> String {
    let text = LINE_BREAK_RE.replace_all(xml, "\n");
    let text = TAB_RE.replace_all(&text, "\t");
    let text = TAG_RE.replace_all(&text, "");
    unescape(&text).trim().to_string()
}

fn unescape(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
