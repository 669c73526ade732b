//! Batch processing report
//!
//! Summarises a batch run: documents processed and failed, entities by type,
//! spans masked, timings and warnings.

use crate::domain::{EntityType, LegalEntity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of processing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Document file name
    pub document: String,
    /// Extracted entities
    pub entities: Vec<LegalEntity>,
    /// Spans masked, `None` when masking was skipped
    pub entities_masked: Option<usize>,
    /// Wall time for the document
    pub processing_time_ms: f64,
}

/// Document that could not be processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFailure {
    /// Document file name
    pub document: String,
    /// Error message
    pub error: String,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Average processing time per document (ms)
    pub avg_processing_time_ms: f64,

    /// Total processing time (ms)
    pub total_processing_time_ms: f64,

    /// Documents with at least one entity
    pub documents_with_entities: usize,

    /// Documents where masking ran
    pub documents_masked: usize,
}

/// Batch run report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Documents processed successfully
    pub documents_processed: usize,

    /// Documents that failed
    pub documents_failed: usize,

    /// Total entities extracted
    pub total_entities: usize,

    /// Entities by type
    pub entities_by_type: BTreeMap<EntityType, usize>,

    /// Total spans masked
    pub spans_masked: usize,

    /// Per-document failures
    pub failures: Vec<DocumentFailure>,

    /// Warnings raised during the run
    pub warnings: Vec<String>,

    /// Whether the run stopped early on a shutdown signal
    pub interrupted: bool,

    /// Processing statistics
    pub stats: ProcessingStats,
}

impl BatchReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a processed document
    pub fn add_document(&mut self, result: &DocumentResult) {
        self.documents_processed += 1;
        self.stats.total_processing_time_ms += result.processing_time_ms;

        if !result.entities.is_empty() {
            self.stats.documents_with_entities += 1;
            self.total_entities += result.entities.len();
            for entity in &result.entities {
                *self.entities_by_type.entry(entity.entity_type).or_insert(0) += 1;
            }
        }

        if let Some(masked) = result.entities_masked {
            self.stats.documents_masked += 1;
            self.spans_masked += masked;
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.documents_processed as f64;
    }

    /// Add a failed document
    pub fn add_failure(&mut self, document: impl Into<String>, error: impl Into<String>) {
        self.documents_failed += 1;
        self.failures.push(DocumentFailure {
            document: document.into(),
            error: error.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Whether every scheduled document succeeded
    pub fn is_successful(&self) -> bool {
        self.documents_failed == 0 && !self.interrupted
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                     LEXMASK BATCH REPORT                      \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Documents Processed:   {}\n",
            self.documents_processed
        ));
        output.push_str(&format!("  Documents Failed:      {}\n", self.documents_failed));
        output.push_str(&format!(
            "  Documents Masked:      {}\n",
            self.stats.documents_masked
        ));
        output.push_str(&format!("  Entities Extracted:    {}\n", self.total_entities));
        output.push_str(&format!("  Spans Masked:          {}\n", self.spans_masked));
        output.push_str(&format!(
            "  Avg Processing Time:   {:.2} ms\n",
            self.stats.avg_processing_time_ms
        ));
        if self.interrupted {
            output.push_str("  Interrupted:           yes\n");
        }
        output.push('\n');

        if !self.entities_by_type.is_empty() {
            output.push_str("🔍 ENTITIES BY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut types: Vec<_> = self.entities_by_type.iter().collect();
            types.sort_by(|a, b| b.1.cmp(a.1));

            for (entity_type, count) in types {
                output.push_str(&format!("  {:30} {:>5}\n", entity_type.label(), count));
            }
            output.push('\n');
        }

        if !self.failures.is_empty() {
            output.push_str("❌ FAILURES\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for failure in self.failures.iter().take(10) {
                output.push_str(&format!("  • {}: {}\n", failure.document, failure.error));
            }
            if self.failures.len() > 10 {
                output.push_str(&format!(
                    "  ... and {} more failures\n",
                    self.failures.len() - 10
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(entities: Vec<LegalEntity>, masked: Option<usize>, ms: f64) -> DocumentResult {
        DocumentResult {
            document: "order.txt".to_string(),
            entities,
            entities_masked: masked,
            processing_time_ms: ms,
        }
    }

    #[test]
    fn test_report_creation() {
        let report = BatchReport::new();
        assert_eq!(report.documents_processed, 0);
        assert!(report.entities_by_type.is_empty());
        assert!(report.is_successful());
    }

    #[test]
    fn test_add_documents() {
        let mut report = BatchReport::new();
        report.add_document(&result(
            vec![
                LegalEntity::new("Section 420", EntityType::Section, 0.89, 6, 17),
                LegalEntity::new("IPC", EntityType::Act, 0.8, 21, 24),
                LegalEntity::new("Section 34", EntityType::Section, 0.87, 30, 40),
            ],
            Some(2),
            10.0,
        ));
        report.add_document(&result(vec![], None, 20.0));

        assert_eq!(report.documents_processed, 2);
        assert_eq!(report.total_entities, 3);
        assert_eq!(report.entities_by_type.get(&EntityType::Section), Some(&2));
        assert_eq!(report.spans_masked, 2);
        assert_eq!(report.stats.documents_masked, 1);
        assert_eq!(report.stats.documents_with_entities, 1);
        assert!((report.stats.avg_processing_time_ms - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_failures_and_warnings() {
        let mut report = BatchReport::new();
        report.add_failure("broken.txt", "stream did not contain valid UTF-8");
        report.add_warning("Span model not loaded; masking skipped");
        report.add_warning("Span model not loaded; masking skipped");

        assert!(!report.is_successful());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_format_console() {
        let mut report = BatchReport::new();
        report.add_document(&result(
            vec![LegalEntity::new("Article 21", EntityType::Article, 0.88, 0, 10)],
            Some(1),
            3.0,
        ));

        let output = report.format_console();
        assert!(output.contains("LEXMASK BATCH REPORT"));
        assert!(output.contains("Documents Processed:   1"));
        assert!(output.contains("article"));
    }

    #[test]
    fn test_format_json_uses_type_labels() {
        let mut report = BatchReport::new();
        report.add_document(&result(
            vec![LegalEntity::new("AIR 1973 SC 1461", EntityType::CaseCitation, 0.92, 0, 16)],
            None,
            1.0,
        ));
        let json: serde_json::Value = serde_json::from_str(&report.format_json().unwrap()).unwrap();
        assert_eq!(json["entities_by_type"]["case_citation"], 1);
    }
}
