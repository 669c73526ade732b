//! Pattern catalog for legal entity extraction
//!
//! The catalog is an ordered, versioned list of `(pattern, entity_type,
//! base_confidence)` rules loaded from TOML. It is compiled once at startup;
//! any rule that fails to compile rejects the whole catalog.

use crate::domain::{EntityType, LexmaskError, Result};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Compiled-size cap per rule, large enough for the built-in catalog
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// Unique rule name
    pub name: String,
    /// Regex source (matched case-insensitively)
    pub pattern: String,
    /// Entity type label
    pub entity_type: String,
    /// Base confidence score (0.0 - 1.0)
    pub base_confidence: f32,
}

/// Abbreviation and its full title, used when scoring abbreviation matches
#[derive(Debug, Clone, Deserialize)]
pub struct AbbreviationDefinition {
    /// Abbreviation as written, e.g. "CrPC"
    pub short: String,
    /// Full title, e.g. "Code of Criminal Procedure"
    pub expansion: String,
}

/// Catalog file layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: String,
    rules: Vec<RuleDefinition>,
    #[serde(default)]
    abbreviations: Vec<AbbreviationDefinition>,
}

/// Compiled rule with metadata
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Rule name from the catalog
    pub name: String,
    /// Compiled, case-insensitive regex
    pub regex: Regex,
    /// Entity type assigned to matches
    pub entity_type: EntityType,
    /// Base confidence score
    pub base_confidence: f32,
}

/// Abbreviation with its lookup key precomputed
#[derive(Debug, Clone)]
pub struct Abbreviation {
    /// Abbreviation as written in the catalog
    pub short: String,
    /// Full title
    pub expansion: String,
    /// Normalised key, see [`normalize_abbreviation`]
    pub key: String,
}

/// Ordered, immutable pattern catalog
///
/// Rule order is significant: it is the final tie-break when overlapping
/// matches have equal confidence and length.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    version: String,
    rules: Vec<PatternRule>,
    abbreviations: Vec<Abbreviation>,
}

impl PatternCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LexmaskError::Configuration(format!(
                "Failed to read pattern catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Load the catalog at `path`, or the embedded default when none is given
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::default_catalog(),
        }
    }

    /// Compile a catalog from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| {
            LexmaskError::Configuration(format!("Failed to parse pattern catalog TOML: {e}"))
        })?;

        if file.version.trim().is_empty() {
            return Err(LexmaskError::Configuration(
                "Pattern catalog version cannot be empty".to_string(),
            ));
        }
        if file.rules.is_empty() {
            return Err(LexmaskError::Configuration(
                "Pattern catalog contains no rules".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(file.rules.len());
        for def in file.rules {
            if !seen.insert(def.name.clone()) {
                return Err(LexmaskError::Configuration(format!(
                    "Duplicate rule name in pattern catalog: {}",
                    def.name
                )));
            }
            rules.push(Self::compile_rule(def)?);
        }

        let abbreviations = file
            .abbreviations
            .into_iter()
            .map(|def| Abbreviation {
                key: normalize_abbreviation(&def.short),
                short: def.short,
                expansion: def.expansion,
            })
            .collect();

        tracing::debug!(
            version = %file.version,
            rules = rules.len(),
            "Compiled pattern catalog"
        );

        Ok(Self {
            version: file.version,
            rules,
            abbreviations,
        })
    }

    /// Built-in catalog embedded at compile time
    pub fn default_catalog() -> Result<Self> {
        let default_toml = include_str!("../../patterns/legal_patterns.toml");
        Self::from_toml(default_toml)
    }

    fn compile_rule(def: RuleDefinition) -> Result<PatternRule> {
        let entity_type: EntityType = def.entity_type.parse().map_err(|e| {
            LexmaskError::Configuration(format!("Invalid entity type in rule '{}': {}", def.name, e))
        })?;

        if !(0.0..=1.0).contains(&def.base_confidence) {
            return Err(LexmaskError::Configuration(format!(
                "Base confidence of rule '{}' must be within [0.0, 1.0], got {}",
                def.name, def.base_confidence
            )));
        }

        let regex = RegexBuilder::new(&def.pattern)
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| {
                LexmaskError::Configuration(format!(
                    "Invalid regex in rule '{}': {}",
                    def.name, e
                ))
            })?;

        if regex.is_match("") {
            return Err(LexmaskError::Configuration(format!(
                "Rule '{}' matches the empty string",
                def.name
            )));
        }

        Ok(PatternRule {
            name: def.name,
            regex,
            entity_type,
            base_confidence: def.base_confidence,
        })
    }

    /// Catalog version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// All rules in priority order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog has no rules (never true for a compiled catalog)
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Known abbreviations
    pub fn abbreviations(&self) -> &[Abbreviation] {
        &self.abbreviations
    }

    /// Look up the abbreviation a matched text stands for
    pub fn abbreviation_for(&self, matched: &str) -> Option<&Abbreviation> {
        let key = normalize_abbreviation(matched);
        self.abbreviations.iter().find(|a| a.key == key)
    }
}

/// Uppercase and strip dots and whitespace ("Cr. P.C." -> "CRPC")
pub fn normalize_abbreviation(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
