//! Span producers
//!
//! A span producer labels person and organisation names in a text. The NER
//! model behind the original service is an external collaborator; here it is
//! represented by precomputed spans loaded from JSON, and by a gazetteer of
//! known names.

use crate::domain::{CharIndex, ExternalSpan, InvalidInputError, LexmaskError, Result};
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::BTreeMap;
use std::path::Path;

/// Trait for components that label spans in a text
pub trait SpanProducer: Send + Sync {
    /// Producer name, reported by health checks
    fn name(&self) -> &str;

    /// Label spans in `text` using character offsets
    fn label_spans(&self, text: &str) -> Result<Vec<ExternalSpan>>;
}

/// Producer returning a fixed list of spans
///
/// Used to feed the output of an external NER model into the redactor.
#[derive(Debug, Clone, Default)]
pub struct StaticSpanProducer {
    spans: Vec<ExternalSpan>,
}

impl StaticSpanProducer {
    /// Create a producer returning `spans` for every text
    pub fn new(spans: Vec<ExternalSpan>) -> Self {
        Self { spans }
    }

    /// Load spans from a JSON array of `{label, start_char, end_char}`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LexmaskError::Io(format!("Failed to read spans file {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse spans from JSON content
    ///
    /// Content that is not a list of spans with non-negative offsets is
    /// invalid input.
    pub fn from_json(content: &str) -> Result<Self> {
        let spans: Vec<ExternalSpan> =
            serde_json::from_str(content).map_err(|e| InvalidInputError::MalformedSpans {
                reason: e.to_string(),
            })?;
        Ok(Self::new(spans))
    }

    /// Spans returned by this producer
    pub fn spans(&self) -> &[ExternalSpan] {
        &self.spans
    }
}

impl SpanProducer for StaticSpanProducer {
    fn name(&self) -> &str {
        "static"
    }

    fn label_spans(&self, _text: &str) -> Result<Vec<ExternalSpan>> {
        Ok(self.spans.clone())
    }
}

/// Producer matching configured names per label
///
/// Matching is ASCII case-insensitive. Only names that start and end on a word
/// boundary count; among those the leftmost, then longest, wins.
#[derive(Debug, Clone)]
pub struct GazetteerSpanProducer {
    automaton: AhoCorasick,
    labels: Vec<String>,
}

impl GazetteerSpanProducer {
    /// Build from a `label -> names` map
    pub fn new(entries: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut names = Vec::new();
        let mut labels = Vec::new();
        for (label, values) in entries {
            for name in values {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                names.push(name.to_string());
                labels.push(label.clone());
            }
        }

        if names.is_empty() {
            return Err(LexmaskError::Configuration(
                "Gazetteer contains no names".to_string(),
            ));
        }

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(true)
            .build(&names)
            .map_err(|e| LexmaskError::Configuration(format!("Failed to build gazetteer: {e}")))?;

        tracing::debug!(names = names.len(), "Built gazetteer span producer");

        Ok(Self { automaton, labels })
    }

    /// Number of names in the gazetteer
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the gazetteer is empty (never true once built)
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl SpanProducer for GazetteerSpanProducer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn label_spans(&self, text: &str) -> Result<Vec<ExternalSpan>> {
        let index = CharIndex::new(text);

        // Boundary check before selection so a rejected long name cannot hide
        // a shorter one at the same position
        let mut matches: Vec<_> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| on_word_boundary(text, m.start(), m.end()))
            .collect();
        matches.sort_by(|a, b| {
            a.start()
                .cmp(&b.start())
                .then_with(|| b.end().cmp(&a.end()))
                .then_with(|| a.pattern().cmp(&b.pattern()))
        });

        let mut spans = Vec::new();
        let mut covered = 0;
        for m in matches {
            if m.start() < covered {
                continue;
            }
            covered = m.end();
            spans.push(ExternalSpan::new(
                self.labels[m.pattern().as_usize()].clone(),
                index.char_at_byte(m.start()),
                index.char_at_byte(m.end()),
            ));
        }
        Ok(spans)
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
