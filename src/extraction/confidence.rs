//! Context-based confidence scoring
//!
//! A match starts at its rule's base confidence and gains small boosts for
//! corroborating context. The result never drops below the base and never
//! exceeds the ceiling; a rule whose base already sits at or above the ceiling
//! keeps its base (capped at 1.0).

use super::catalog::PatternCatalog;
use crate::domain::{EntityType, LexmaskError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Tunable confidence weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Maximum confidence reachable through boosts
    #[serde(default = "default_ceiling")]
    pub ceiling: f32,

    /// Year (1800-2099) in the context that is not part of the match
    #[serde(default = "default_year_boost")]
    pub year_boost: f32,

    /// Act mentioned near a provision, or a provision mentioned near an act
    #[serde(default = "default_cross_reference_boost")]
    pub cross_reference_boost: f32,

    /// Citation keyword nearby ("under", "per", "u/s", "read with", ...)
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f32,

    /// Abbreviation whose full title also appears in the document
    #[serde(default = "default_abbreviation_boost")]
    pub abbreviation_boost: f32,
}

fn default_ceiling() -> f32 {
    0.95
}

fn default_year_boost() -> f32 {
    0.01
}

fn default_cross_reference_boost() -> f32 {
    0.02
}

fn default_keyword_boost() -> f32 {
    0.01
}

fn default_abbreviation_boost() -> f32 {
    0.03
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            ceiling: default_ceiling(),
            year_boost: default_year_boost(),
            cross_reference_boost: default_cross_reference_boost(),
            keyword_boost: default_keyword_boost(),
            abbreviation_boost: default_abbreviation_boost(),
        }
    }
}

impl ConfidencePolicy {
    /// Validate the policy
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.ceiling > 0.0 && self.ceiling <= 1.0) {
            return Err(format!(
                "confidence ceiling must be within (0.0, 1.0], got {}",
                self.ceiling
            ));
        }
        let boosts = [
            ("year_boost", self.year_boost),
            ("cross_reference_boost", self.cross_reference_boost),
            ("keyword_boost", self.keyword_boost),
            ("abbreviation_boost", self.abbreviation_boost),
        ];
        for (name, value) in boosts {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0.0, 1.0], got {value}"));
            }
        }
        Ok(())
    }

    /// Upper bound for a rule with the given base confidence
    pub fn cap_for(&self, base_confidence: f32) -> f32 {
        if base_confidence >= self.ceiling {
            base_confidence.min(1.0)
        } else {
            self.ceiling
        }
    }
}

/// Whole-document facts gathered once per extraction
#[derive(Debug, Clone, Default)]
pub struct DocumentSignals {
    /// Keys of abbreviations whose full title appears in the document
    expanded: HashSet<String>,
}

impl DocumentSignals {
    /// Whether the full title of the abbreviation with `key` was seen
    pub fn has_expansion(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }
}

/// Scores matches against their context
///
/// Holds the compiled context signals; cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    policy: ConfidencePolicy,
    catalog: Arc<PatternCatalog>,
    year: Regex,
    keyword: Regex,
    act_reference: Regex,
    provision_reference: Regex,
}

impl ConfidenceScorer {
    /// Create a scorer for the given policy and catalog
    pub fn new(policy: ConfidencePolicy, catalog: Arc<PatternCatalog>) -> Result<Self> {
        let mut act_words = vec![
            "act".to_string(),
            "code".to_string(),
            "constitution".to_string(),
            "sanhita".to_string(),
            "adhiniyam".to_string(),
        ];
        act_words.extend(
            catalog
                .abbreviations()
                .iter()
                .map(|a| regex::escape(&a.short)),
        );

        Ok(Self {
            year: build(r"\b(?:18|19|20)\d{2}\b")?,
            keyword: build(
                r"\b(?:under|per|vide|u/s|r/w|read\s+with|pursuant\s+to|in\s+terms\s+of)\b",
            )?,
            act_reference: build(&format!(r"\b(?:{})\b", act_words.join("|")))?,
            provision_reference: build(
                r"\b(?:sections?\s+\d|sec\.?\s*\d|u/s|s\.\s*\d|articles?\s+\d|art\.\s*\d|order\s+[ivxlc\d]+|rules?\s+\d)",
            )?,
            policy,
            catalog,
        })
    }

    /// Active policy
    pub fn policy(&self) -> &ConfidencePolicy {
        &self.policy
    }

    /// Scan `full_text` once for the signals that depend on the whole document
    pub fn document_signals(&self, full_text: &str) -> DocumentSignals {
        let lowered = full_text.to_lowercase();
        let expanded = self
            .catalog
            .abbreviations()
            .iter()
            .filter(|a| lowered.contains(&a.expansion.to_lowercase()))
            .map(|a| a.key.clone())
            .collect();
        DocumentSignals { expanded }
    }

    /// Final confidence for a match
    ///
    /// `context` is the window around the match (including the match itself)
    /// and `document` comes from [`ConfidenceScorer::document_signals`].
    pub fn calculate_confidence(
        &self,
        match_text: &str,
        entity_type: EntityType,
        context: &str,
        document: &DocumentSignals,
        base_confidence: f32,
    ) -> f32 {
        let mut boost = 0.0_f32;

        if self
            .year
            .find_iter(context)
            .any(|y| !match_text.contains(y.as_str()))
        {
            boost += self.policy.year_boost;
        }

        let cross_referenced = if entity_type.is_provision() {
            self.act_reference.is_match(context)
        } else if entity_type == EntityType::Act {
            self.provision_reference.is_match(context)
        } else {
            false
        };
        if cross_referenced {
            boost += self.policy.cross_reference_boost;
        }

        if self.keyword.is_match(context) {
            boost += self.policy.keyword_boost;
        }

        if entity_type == EntityType::Act {
            if let Some(abbr) = self.catalog.abbreviation_for(match_text) {
                if document.has_expansion(&abbr.key) {
                    boost += self.policy.abbreviation_boost;
                }
            }
        }

        let cap = self.policy.cap_for(base_confidence);
        (base_confidence + boost)
            .min(cap)
            .max(base_confidence)
            .clamp(0.0, 1.0)
    }
}

fn build(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            LexmaskError::Configuration(format!("Invalid context signal pattern: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ConfidenceScorer {
        let catalog = Arc::new(PatternCatalog::default_catalog().unwrap());
        ConfidenceScorer::new(ConfidencePolicy::default(), catalog).unwrap()
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(ConfidencePolicy::default().validate().is_ok());
    }

    #[test]
    fn test_policy_rejects_bad_values() {
        let policy = ConfidencePolicy {
            ceiling: 1.5,
            ..Default::default()
        };
        assert!(policy.validate().is_err());

        let policy = ConfidencePolicy {
            keyword_boost: -0.1,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    fn score_in(
        scorer: &ConfidenceScorer,
        matched: &str,
        entity_type: EntityType,
        context: &str,
        full_text: &str,
        base: f32,
    ) -> f32 {
        let document = scorer.document_signals(full_text);
        scorer.calculate_confidence(matched, entity_type, context, &document, base)
    }

    #[test]
    fn test_no_context_keeps_base() {
        let score = score_in(
            &scorer(),
            "Article 21",
            EntityType::Article,
            "Article 21",
            "Article 21",
            0.88,
        );
        assert!((score - 0.88).abs() < 1e-6);
    }

    #[test]
    fn test_section_with_act_year_and_keyword() {
        let text = "Under Section 420 of Indian Penal Code, 1860";
        let score = score_in(&scorer(), "Section 420", EntityType::Section, text, text, 0.85);
        assert!((0.85..=0.90).contains(&score), "score was {score}");
        assert!(score > 0.85);
    }

    #[test]
    fn test_ceiling_holds_with_every_boost() {
        let policy = ConfidencePolicy {
            year_boost: 0.5,
            cross_reference_boost: 0.5,
            keyword_boost: 0.5,
            abbreviation_boost: 0.5,
            ..Default::default()
        };
        let catalog = Arc::new(PatternCatalog::default_catalog().unwrap());
        let scorer = ConfidenceScorer::new(policy, catalog).unwrap();
        let text = "under Section 302 IPC read with Indian Penal Code of 1860";
        let score = score_in(&scorer, "IPC", EntityType::Act, text, text, 0.78);
        assert!((score - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_base_above_ceiling_is_kept() {
        let score = score_in(
            &scorer(),
            "Indian Penal Code, 1860",
            EntityType::Act,
            "Section 420 of Indian Penal Code, 1860",
            "Section 420 of Indian Penal Code, 1860",
            0.97,
        );
        assert!((score - 0.97).abs() < 1e-6);
    }

    #[test]
    fn test_abbreviation_expansion_boost() {
        let with_expansion = "The Indian Penal Code applies. IPC is the short form.";
        let without = "IPC is the short form.";
        let s = scorer();
        let boosted = score_in(&s, "IPC", EntityType::Act, without, with_expansion, 0.78);
        let plain = score_in(&s, "IPC", EntityType::Act, without, without, 0.78);
        assert!(boosted > plain);
    }

    #[test]
    fn test_document_signals_match_expansions_case_insensitively() {
        let s = scorer();
        let document = s.document_signals("charged under the INDIAN PENAL CODE");
        assert!(document.has_expansion("IPC"));
        assert!(!document.has_expansion("CRPC"));
        assert!(!s.document_signals("").has_expansion("IPC"));
    }

    #[test]
    fn test_year_inside_match_does_not_boost() {
        let score = score_in(
            &scorer(),
            "AIR 1973 SC 1461",
            EntityType::CaseCitation,
            "AIR 1973 SC 1461",
            "AIR 1973 SC 1461",
            0.92,
        );
        assert!((score - 0.92).abs() < 1e-6);
    }
}
