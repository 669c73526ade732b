//! Overlap resolution for candidate matches

use crate::domain::{EntityType, LegalEntity};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Scored match before overlap resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Matched text
    pub text: String,
    /// Entity type of the producing rule
    pub entity_type: EntityType,
    /// Start character offset
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Final confidence after context scoring
    pub confidence: f32,
    /// Position of the producing rule in the catalog
    pub rule_index: usize,
    /// Context snippet
    pub context: Option<String>,
}

impl Candidate {
    /// Span length in characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn into_entity(self) -> LegalEntity {
        let entity = LegalEntity::new(
            self.text,
            self.entity_type,
            self.confidence,
            self.start,
            self.end,
        );
        match self.context {
            Some(context) => entity.with_context(context),
            None => entity,
        }
    }
}

/// Priority order: higher confidence, longer span, earlier rule, earlier start
fn priority(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.rule_index.cmp(&b.rule_index))
        .then_with(|| a.start.cmp(&b.start))
}

/// Greedily keep the best candidate of every overlapping group
///
/// Candidates are visited in priority order and kept only if they intersect
/// nothing already kept. Losers are dropped, never merged. The result is
/// filtered by `threshold` and ordered by start offset. Empty candidates are
/// discarded.
pub fn resolve_overlaps(mut candidates: Vec<Candidate>, threshold: f32) -> Vec<LegalEntity> {
    candidates.retain(|c| !c.is_empty());
    candidates.sort_by(priority);

    // Kept spans are disjoint, so only the nearest one starting before
    // `candidate.end` can intersect it
    let mut occupied: BTreeMap<usize, usize> = BTreeMap::new();
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let blocked = occupied
            .range(..candidate.end)
            .next_back()
            .is_some_and(|(_, &end)| end > candidate.start);
        if !blocked {
            occupied.insert(candidate.start, candidate.end);
            kept.push(candidate);
        }
    }

    kept.retain(|c| c.confidence >= threshold);
    kept.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
    kept.into_iter().map(Candidate::into_entity).collect()
}
