//! Legal entity data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of legal reference recognised by the pattern catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A statute or code, by full title or abbreviation (e.g. "Indian Penal Code, 1860", "IPC")
    Act,
    /// A section reference (e.g. "Section 420", "u/s 302")
    Section,
    /// A constitutional article (e.g. "Article 21")
    Article,
    /// A law report citation (e.g. "AIR 1973 SC 1461", "(2017) 10 SCC 1")
    CaseCitation,
    /// An order/rule reference of the Code of Civil Procedure (e.g. "Order VII Rule 11")
    Order,
}

impl EntityType {
    /// Wire label used in serialized output and catalog files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Act => "act",
            Self::Section => "section",
            Self::Article => "article",
            Self::CaseCitation => "case_citation",
            Self::Order => "order",
        }
    }

    /// Whether this type refers to a provision inside an act
    pub fn is_provision(&self) -> bool {
        matches!(self, Self::Section | Self::Article | Self::Order)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "act" | "statute" => Ok(Self::Act),
            "section" => Ok(Self::Section),
            "article" => Ok(Self::Article),
            "case_citation" | "citation" => Ok(Self::CaseCitation),
            "order" => Ok(Self::Order),
            _ => Err(format!("Unknown entity type: {s}")),
        }
    }
}

/// Extracted legal entity
///
/// Offsets are character (not byte) offsets into the original text, so
/// `entity` always equals the characters `start_idx..end_idx` of that text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalEntity {
    /// Matched text
    pub entity: String,
    /// Entity type
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Final confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Start character index
    pub start_idx: usize,
    /// End character index (exclusive)
    pub end_idx: usize,
    /// Surrounding context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl LegalEntity {
    /// Create a new entity without context
    pub fn new(
        entity: impl Into<String>,
        entity_type: EntityType,
        confidence: f32,
        start_idx: usize,
        end_idx: usize,
    ) -> Self {
        Self {
            entity: entity.into(),
            entity_type,
            confidence: confidence.clamp(0.0, 1.0),
            start_idx,
            end_idx,
            context: None,
        }
    }

    /// Attach a context snippet
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Length of the entity in characters
    pub fn char_len(&self) -> usize {
        self.end_idx - self.start_idx
    }

    /// Check if this entity's range intersects another's
    pub fn overlaps(&self, other: &LegalEntity) -> bool {
        self.start_idx < other.end_idx && other.start_idx < self.end_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_labels_parse_back() {
        for ty in [
            EntityType::Act,
            EntityType::Section,
            EntityType::Article,
            EntityType::CaseCitation,
            EntityType::Order,
        ] {
            assert_eq!(ty.label().parse::<EntityType>().unwrap(), ty);
        }
        assert!("regulation".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_entity_serializes_type_field() {
        let entity = LegalEntity::new("Article 21", EntityType::Article, 0.9, 4, 14);
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "article");
        assert_eq!(json["entity"], "Article 21");
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_confidence_clamped_on_construction() {
        let entity = LegalEntity::new("IPC", EntityType::Act, 1.7, 0, 3);
        assert_eq!(entity.confidence, 1.0);
    }

    #[test]
    fn test_overlaps() {
        let a = LegalEntity::new("Section 420", EntityType::Section, 0.9, 6, 17);
        let b = LegalEntity::new("420 of", EntityType::Section, 0.9, 14, 20);
        let c = LegalEntity::new("IPC", EntityType::Act, 0.8, 17, 20);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.char_len(), 11);
    }
}
