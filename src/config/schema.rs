//! Configuration schema types
//!
//! Every section has serde defaults, so an empty file (or no file at all) is
//! a valid configuration.

use crate::extraction::confidence::ConfidencePolicy;
use crate::redaction::{DEFAULT_MASK_LABELS, DEFAULT_MASK_TOKEN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest accepted context window, in characters per side
pub const MAX_CONTEXT_WINDOW: usize = 1000;

/// Main lexmask configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexmaskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Pattern extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// PII masking settings
    #[serde(default)]
    pub masking: MaskingConfig,

    /// Masking audit trail
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LexmaskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.extraction.validate()?;
        self.masking.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Pattern extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Threshold used when a request does not supply one
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Characters taken on each side of a match for scoring
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Maximum length of the context snippet stored on an entity
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Reject texts longer than this many characters
    #[serde(default)]
    pub max_text_chars: Option<usize>,

    /// Pattern catalog file replacing the built-in catalog
    #[serde(default)]
    pub pattern_catalog: Option<String>,

    /// Confidence weights
    #[serde(default)]
    pub confidence: ConfidencePolicy,
}

impl ExtractionConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "extraction.confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            ));
        }

        if self.context_window > MAX_CONTEXT_WINDOW {
            return Err(format!(
                "extraction.context_window must be at most {}, got {}",
                MAX_CONTEXT_WINDOW, self.context_window
            ));
        }

        if self.max_context_chars == 0 {
            return Err("extraction.max_context_chars must be > 0".to_string());
        }

        if self.max_text_chars == Some(0) {
            return Err("extraction.max_text_chars must be > 0 when set".to_string());
        }

        if let Some(path) = &self.pattern_catalog {
            if path.trim().is_empty() {
                return Err("extraction.pattern_catalog cannot be empty when set".to_string());
            }
        }

        self.confidence
            .validate()
            .map_err(|e| format!("extraction.confidence: {e}"))
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            context_window: default_context_window(),
            max_context_chars: default_max_context_chars(),
            max_text_chars: None,
            pattern_catalog: None,
            confidence: ConfidencePolicy::default(),
        }
    }
}

/// PII masking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// Token written in place of masked spans
    #[serde(default = "default_mask_token")]
    pub mask_token: String,

    /// Span labels that are masked
    #[serde(default = "default_entities_to_mask")]
    pub entities_to_mask: Vec<String>,

    /// Known names per label, used when no spans file is given
    #[serde(default)]
    pub gazetteer: BTreeMap<String, Vec<String>>,
}

impl MaskingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mask_token.is_empty() {
            return Err("masking.mask_token cannot be empty".to_string());
        }

        if self.entities_to_mask.is_empty() {
            return Err("masking.entities_to_mask cannot be empty".to_string());
        }

        if let Some(label) = self.entities_to_mask.iter().find(|l| l.trim().is_empty()) {
            return Err(format!(
                "masking.entities_to_mask contains an empty label: '{label}'"
            ));
        }

        Ok(())
    }

    /// Whether a gazetteer with at least one name is configured
    pub fn has_gazetteer(&self) -> bool {
        self.gazetteer.values().any(|names| !names.is_empty())
    }
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            mask_token: default_mask_token(),
            entities_to_mask: default_entities_to_mask(),
            gazetteer: BTreeMap::new(),
        }
    }
}

/// Masking audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the audit trail
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: String,

    /// Write JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.trim().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_confidence_threshold() -> f32 {
    0.70
}

fn default_context_window() -> usize {
    crate::extraction::extractor::DEFAULT_CONTEXT_WINDOW
}

fn default_max_context_chars() -> usize {
    crate::extraction::extractor::DEFAULT_MAX_CONTEXT_CHARS
}

fn default_mask_token() -> String {
    DEFAULT_MASK_TOKEN.to_string()
}

fn default_entities_to_mask() -> Vec<String> {
    DEFAULT_MASK_LABELS.iter().map(|l| l.to_string()).collect()
}

fn default_audit_log_path() -> String {
    "./audit/masking.log".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LexmaskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.confidence_threshold, 0.70);
        assert_eq!(config.extraction.context_window, 50);
        assert_eq!(config.masking.mask_token, "[REDACTED]");
        assert_eq!(config.masking.entities_to_mask.len(), 7);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: LexmaskConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert!(!config.audit.enabled);
        assert!(config.extraction.max_text_chars.is_none());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extraction_config_validation() {
        let mut config = ExtractionConfig::default();
        assert!(config.validate().is_ok());

        config.confidence_threshold = 1.2;
        assert!(config.validate().is_err());

        config.confidence_threshold = 0.7;
        config.context_window = 5000;
        assert!(config.validate().is_err());

        config.context_window = 50;
        config.max_text_chars = Some(0);
        assert!(config.validate().is_err());

        config.max_text_chars = Some(512);
        config.confidence.ceiling = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_masking_config_validation() {
        let mut config = MaskingConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_gazetteer());

        config.entities_to_mask = vec![];
        assert!(config.validate().is_err());

        config.entities_to_mask = vec!["JUDGE".to_string(), " ".to_string()];
        assert!(config.validate().is_err());

        config.entities_to_mask = vec!["JUDGE".to_string()];
        config.mask_token = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "hourly".to_string();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gazetteer_section_parses() {
        let config: LexmaskConfig = toml::from_str(
            r#"
[masking.gazetteer]
JUDGE = ["Justice Sharma"]
PETITIONER = []
"#,
        )
        .unwrap();
        assert!(config.masking.has_gazetteer());
        assert_eq!(config.masking.gazetteer["JUDGE"], vec!["Justice Sharma"]);
    }
}
