//! Offset-safe span redaction

use crate::domain::offsets::clamped_byte_offset;
use crate::domain::{ExternalSpan, InvalidInputError, RedactionResult, Result};
use std::collections::HashSet;

/// Placeholder written in place of every masked span
pub const DEFAULT_MASK_TOKEN: &str = "[REDACTED]";

/// Labels masked unless configured otherwise
pub const DEFAULT_MASK_LABELS: &[&str] = &[
    "PETITIONER",
    "RESPONDENT",
    "JUDGE",
    "LAWYER",
    "WITNESS",
    "OTHER_PERSON",
    "ORG",
];

/// Replaces labeled spans with a mask token
#[derive(Debug, Clone)]
pub struct SpanRedactor {
    allowed_labels: HashSet<String>,
    mask_token: String,
}

impl SpanRedactor {
    /// Create a redactor for the given labels and token
    pub fn new<I, S>(allowed_labels: I, mask_token: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_labels: allowed_labels.into_iter().map(Into::into).collect(),
            mask_token: mask_token.into(),
        }
    }

    /// Labels that are masked
    pub fn allowed_labels(&self) -> &HashSet<String> {
        &self.allowed_labels
    }

    /// Configured mask token
    pub fn mask_token(&self) -> &str {
        &self.mask_token
    }

    /// Whether a span carries a label that is masked
    pub fn qualifies(&self, span: &ExternalSpan) -> bool {
        self.allowed_labels.contains(&span.label)
    }

    /// Mask `spans` in `text` with the configured token
    pub fn mask(&self, text: &str, spans: &[ExternalSpan]) -> Result<RedactionResult> {
        mask_spans(text, spans, &self.allowed_labels, &self.mask_token)
    }

    /// Mask `spans` in `text` with a caller-supplied token
    pub fn mask_with_token(
        &self,
        text: &str,
        spans: &[ExternalSpan],
        mask_token: &str,
    ) -> Result<RedactionResult> {
        mask_spans(text, spans, &self.allowed_labels, mask_token)
    }
}

impl Default for SpanRedactor {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_LABELS.iter().copied(), DEFAULT_MASK_TOKEN)
    }
}

/// Replace every span whose label is in `allowed_labels` with `mask_token`
///
/// All spans are validated against the original text before anything is
/// replaced, so an invalid span leaves the text untouched. Qualifying spans are
/// applied rightmost first; the prefix before each span is therefore still the
/// original text when it is replaced. An end offset running past the already
/// shortened text is clamped, which makes overlapping spans
/// last-processed-wins.
pub fn mask_spans(
    text: &str,
    spans: &[ExternalSpan],
    allowed_labels: &HashSet<String>,
    mask_token: &str,
) -> Result<RedactionResult> {
    let char_len = text.chars().count();
    for span in spans {
        validate_span(span, char_len)?;
    }

    let mut qualifying: Vec<&ExternalSpan> = spans
        .iter()
        .filter(|s| allowed_labels.contains(&s.label))
        .collect();
    if qualifying.is_empty() {
        return Ok(RedactionResult::unchanged(text));
    }

    // Stable: equal starts keep producer order
    qualifying.sort_by(|a, b| b.start_char.cmp(&a.start_char));

    let mut masked = text.to_string();
    for span in &qualifying {
        let start = clamped_byte_offset(&masked, span.start_char);
        let end = clamped_byte_offset(&masked, span.end_char).max(start);
        masked.replace_range(start..end, mask_token);
    }

    Ok(RedactionResult {
        masked_text: masked,
        entities_masked: qualifying.len(),
    })
}

fn validate_span(span: &ExternalSpan, char_len: usize) -> Result<()> {
    if span.start_char > span.end_char {
        return Err(InvalidInputError::InvertedSpan {
            start: span.start_char,
            end: span.end_char,
        }
        .into());
    }
    if span.end_char > char_len {
        return Err(InvalidInputError::SpanOutOfBounds {
            start: span.start_char,
            end: span.end_char,
            len: char_len,
        }
        .into());
    }
    Ok(())
}
