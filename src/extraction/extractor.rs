//! Pattern-based legal entity extractor

use super::catalog::PatternCatalog;
use super::confidence::{ConfidencePolicy, ConfidenceScorer, DocumentSignals};
use super::overlap::{resolve_overlaps, Candidate};
use crate::domain::{CharIndex, InvalidInputError, LegalEntity, Result};
use std::sync::Arc;

/// Default number of characters taken on each side of a match
pub const DEFAULT_CONTEXT_WINDOW: usize = 50;

/// Default cap on the stored context snippet
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 160;

/// Trait for legal entity extraction implementations
pub trait EntityExtractor: Send + Sync {
    /// Extract entities whose confidence reaches `confidence_threshold`
    fn extract(&self, text: &str, confidence_threshold: f32) -> Result<Vec<LegalEntity>>;

    /// Name of the extractor, reported by health checks
    fn name(&self) -> &str;
}

/// Extractor driven by an ordered regex catalog
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    catalog: Arc<PatternCatalog>,
    scorer: ConfidenceScorer,
    context_window: usize,
    max_context_chars: usize,
}

impl PatternExtractor {
    /// Create an extractor over the built-in catalog with default settings
    pub fn new() -> Result<Self> {
        let catalog = Arc::new(PatternCatalog::default_catalog()?);
        Self::with_catalog(catalog, ConfidencePolicy::default())
    }

    /// Create an extractor over a shared catalog
    pub fn with_catalog(catalog: Arc<PatternCatalog>, policy: ConfidencePolicy) -> Result<Self> {
        let scorer = ConfidenceScorer::new(policy, Arc::clone(&catalog))?;
        Ok(Self {
            catalog,
            scorer,
            context_window: DEFAULT_CONTEXT_WINDOW,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        })
    }

    /// Set the context window (characters on each side of a match)
    pub fn with_context_window(mut self, chars: usize) -> Self {
        self.context_window = chars;
        self
    }

    /// Set the maximum stored context length
    pub fn with_max_context_chars(mut self, chars: usize) -> Self {
        self.max_context_chars = chars;
        self
    }

    /// Catalog in use
    pub fn catalog(&self) -> &Arc<PatternCatalog> {
        &self.catalog
    }

    /// Confidence policy in use
    pub fn policy(&self) -> &ConfidencePolicy {
        self.scorer.policy()
    }

    /// Run every rule and score every raw match
    fn collect_candidates(
        &self,
        text: &str,
        index: &CharIndex,
        document: &DocumentSignals,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (rule_index, rule) in self.catalog.rules().iter().enumerate() {
            for m in rule.regex.find_iter(text) {
                if m.is_empty() {
                    continue;
                }

                let start = index.char_at_byte(m.start());
                let end = index.char_at_byte(m.end());
                let context = index.slice(
                    text,
                    start.saturating_sub(self.context_window),
                    end.saturating_add(self.context_window),
                );

                let confidence = self.scorer.calculate_confidence(
                    m.as_str(),
                    rule.entity_type,
                    context,
                    document,
                    rule.base_confidence,
                );

                candidates.push(Candidate {
                    text: m.as_str().to_string(),
                    entity_type: rule.entity_type,
                    start,
                    end,
                    confidence,
                    rule_index,
                    context: Some(truncate_chars(context, self.max_context_chars)),
                });
            }
        }

        candidates
    }
}

impl EntityExtractor for PatternExtractor {
    fn extract(&self, text: &str, confidence_threshold: f32) -> Result<Vec<LegalEntity>> {
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(InvalidInputError::ThresholdOutOfRange {
                threshold: confidence_threshold,
            }
            .into());
        }

        if text.is_empty() {
            return Ok(Vec::new());
        }

        let index = CharIndex::new(text);
        let document = self.scorer.document_signals(text);
        let candidates = self.collect_candidates(text, &index, &document);
        let raw = candidates.len();
        let entities = resolve_overlaps(candidates, confidence_threshold);

        tracing::debug!(
            raw_matches = raw,
            entities = entities.len(),
            threshold = confidence_threshold,
            "Pattern extraction finished"
        );

        Ok(entities)
    }

    fn name(&self) -> &str {
        "regex_ner"
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => text[..byte].to_string(),
        None => text.to_string(),
    }
}
