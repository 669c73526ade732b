//! Labeled spans and redaction results

use serde::{Deserialize, Serialize};

/// Labeled character span produced by a span producer (NER model, gazetteer, file)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalSpan {
    /// Entity label, e.g. "JUDGE" or "PETITIONER"
    pub label: String,
    /// Start character index
    pub start_char: usize,
    /// End character index (exclusive)
    pub end_char: usize,
}

impl ExternalSpan {
    /// Create a new span
    pub fn new(label: impl Into<String>, start_char: usize, end_char: usize) -> Self {
        Self {
            label: label.into(),
            start_char,
            end_char,
        }
    }

    /// Whether the span covers no characters
    pub fn is_empty(&self) -> bool {
        self.start_char == self.end_char
    }
}

/// Outcome of masking a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionResult {
    /// Text with every qualifying span replaced by the mask token
    pub masked_text: String,
    /// Number of replacements applied
    pub entities_masked: usize,
}

impl RedactionResult {
    /// Result for a text that needed no masking
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            masked_text: text.into(),
            entities_masked: 0,
        }
    }
}
