//! Legal analysis engine
//!
//! [`LegalAnalysisEngine`] is the in-process service facade. It combines:
//! - **Extractor**: recognises statutes, provisions and citations
//! - **Span model**: labels person and organisation names
//! - **Redactor**: replaces qualifying spans with a mask token
//! - **Audit logger**: records masking operations with hashed values
//!
//! # Examples
//!
//! ```
//! use lexmask::config::LexmaskConfig;
//! use lexmask::engine::{ExtractRequest, LegalAnalysisEngine};
//! use lexmask::redaction::SpanModel;
//!
//! let engine = LegalAnalysisEngine::from_config(&LexmaskConfig::default(), SpanModel::not_loaded())?;
//! let outcome = engine.extract_entities(&ExtractRequest::new("as per IPC guidelines"))?;
//! assert_eq!(outcome.total_found, 1);
//! # Ok::<(), lexmask::domain::LexmaskError>(())
//! ```

use crate::audit::{AuditLogger, MaskingAudit};
use crate::config::{LexmaskConfig, MaskingConfig};
use crate::domain::{ExternalSpan, InvalidInputError, LegalEntity, LexmaskError, Result};
use crate::extraction::{EntityExtractor, PatternCatalog, PatternExtractor};
use crate::redaction::{
    GazetteerSpanProducer, SpanModel, SpanProducer, SpanRedactor, StaticSpanProducer,
};
use crate::{log_extraction_complete, log_masking_complete};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Service name reported by [`LegalAnalysisEngine::service_info`]
pub const SERVICE_NAME: &str = "Legal NER and PII Masking";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default threshold when neither request nor configuration supplies one
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.70;

/// Entity extraction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Text to analyse
    pub text: String,
    /// Minimum confidence, defaults to the configured threshold
    #[serde(default)]
    pub confidence_threshold: Option<f32>,
}

impl ExtractRequest {
    /// Request with the default threshold
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence_threshold: None,
        }
    }

    /// Set the confidence threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = Some(threshold);
        self
    }
}

/// Entity extraction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Entities ordered by start offset
    pub entities: Vec<LegalEntity>,
    /// Number of entities returned
    pub total_found: usize,
    /// Wall time spent extracting
    pub processing_time_ms: f64,
}

/// PII masking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskRequest {
    /// Text to mask
    pub text: String,
    /// Replacement token, defaults to the configured token
    #[serde(default)]
    pub mask_token: Option<String>,
}

impl MaskRequest {
    /// Request with the default token
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mask_token: None,
        }
    }

    /// Set the mask token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.mask_token = Some(token.into());
        self
    }
}

/// PII masking response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskOutcome {
    /// Masked text
    pub masked_text: String,
    /// Number of spans replaced
    pub entities_masked: usize,
    /// Wall time spent labelling and masking
    pub processing_time_ms: f64,
}

/// Overall service health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Both models loaded
    Healthy,
    /// At least one model unavailable
    Unhealthy,
}

/// Load state of one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelHealth {
    /// Whether the model can serve requests
    pub loaded: bool,
    /// Backing implementation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Why the model is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Per-model health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsHealth {
    /// Pattern extractor
    pub regex_ner: ModelHealth,
    /// Span model used for masking
    pub span_masking: ModelHealth,
}

/// Health check report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status
    pub status: HealthStatus,
    /// Service version
    pub version: String,
    /// Per-model state
    pub models: ModelsHealth,
}

/// Service description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Short description
    pub description: String,
    /// Available operations
    pub operations: Vec<String>,
}

/// Service facade over extraction and masking
pub struct LegalAnalysisEngine {
    extractor: Arc<dyn EntityExtractor>,
    span_model: SpanModel,
    redactor: SpanRedactor,
    audit_logger: AuditLogger,
    default_threshold: f32,
    max_text_chars: Option<usize>,
}

impl LegalAnalysisEngine {
    /// Create an engine with default settings and no audit trail
    pub fn new(
        extractor: Arc<dyn EntityExtractor>,
        span_model: SpanModel,
        redactor: SpanRedactor,
    ) -> Self {
        Self {
            extractor,
            span_model,
            redactor,
            audit_logger: AuditLogger::disabled(),
            default_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_text_chars: None,
        }
    }

    /// Create an engine from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pattern catalog cannot be loaded
    /// or compiled, or if the audit log directory cannot be created.
    pub fn from_config(config: &LexmaskConfig, span_model: SpanModel) -> Result<Self> {
        let extraction = &config.extraction;

        let catalog = PatternCatalog::load_or_default(extraction.pattern_catalog.as_deref())?;
        tracing::info!(
            version = catalog.version(),
            rules = catalog.len(),
            "Pattern catalog loaded"
        );

        let extractor =
            PatternExtractor::with_catalog(Arc::new(catalog), extraction.confidence.clone())?
                .with_context_window(extraction.context_window)
                .with_max_context_chars(extraction.max_context_chars);

        let redactor = SpanRedactor::new(
            config.masking.entities_to_mask.iter().cloned(),
            config.masking.mask_token.clone(),
        );

        let mut engine = Self::new(Arc::new(extractor), span_model, redactor)
            .with_default_threshold(extraction.confidence_threshold)
            .with_audit_logger(AuditLogger::from_config(&config.audit)?);
        engine.max_text_chars = extraction.max_text_chars;

        Ok(engine)
    }

    /// Set the threshold used when a request carries none
    pub fn with_default_threshold(mut self, threshold: f32) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Reject texts longer than `max` characters
    pub fn with_max_text_chars(mut self, max: usize) -> Self {
        self.max_text_chars = Some(max);
        self
    }

    /// Attach an audit logger
    pub fn with_audit_logger(mut self, audit_logger: AuditLogger) -> Self {
        self.audit_logger = audit_logger;
        self
    }

    /// Span model in use
    pub fn span_model(&self) -> &SpanModel {
        &self.span_model
    }

    /// Redactor in use
    pub fn redactor(&self) -> &SpanRedactor {
        &self.redactor
    }

    fn check_length(&self, text: &str) -> Result<()> {
        if let Some(max) = self.max_text_chars {
            let len = text.chars().count();
            if len > max {
                return Err(InvalidInputError::TextTooLong { len, max }.into());
            }
        }
        Ok(())
    }

    /// Extract legal entities
    pub fn extract_entities(&self, request: &ExtractRequest) -> Result<ExtractionOutcome> {
        let start = Instant::now();
        self.check_length(&request.text)?;

        let threshold = request
            .confidence_threshold
            .unwrap_or(self.default_threshold);
        let entities = self.extractor.extract(&request.text, threshold)?;

        let processing_time_ms = elapsed_ms(start);
        log_extraction_complete!(entities.len(), processing_time_ms);

        Ok(ExtractionOutcome {
            total_found: entities.len(),
            entities,
            processing_time_ms,
        })
    }

    /// Mask personally identifying spans
    ///
    /// # Errors
    ///
    /// - [`crate::domain::LexmaskError::SpanProducerUnavailable`] if the span model is not ready
    /// - [`crate::domain::LexmaskError::InvalidInput`] if the text is too long or a produced span is invalid
    pub fn mask_pii(&self, request: &MaskRequest) -> Result<MaskOutcome> {
        let start = Instant::now();
        self.check_length(&request.text)?;

        let spans = self.span_model.label_spans(&request.text)?;
        let mask_token = request
            .mask_token
            .as_deref()
            .unwrap_or_else(|| self.redactor.mask_token());
        let result = self
            .redactor
            .mask_with_token(&request.text, &spans, mask_token)?;

        let processing_time_ms = elapsed_ms(start);
        log_masking_complete!(result.entities_masked, processing_time_ms);

        if self.audit_logger.is_enabled() {
            let masked_spans: Vec<ExternalSpan> = spans
                .into_iter()
                .filter(|s| self.redactor.qualifies(s))
                .collect();
            self.audit_logger.log_masking(&MaskingAudit {
                original_text: &request.text,
                masked_spans: &masked_spans,
                entities_masked: result.entities_masked,
                processing_time_ms,
                mask_token,
            })?;
        }

        Ok(MaskOutcome {
            masked_text: result.masked_text,
            entities_masked: result.entities_masked,
            processing_time_ms,
        })
    }

    /// Report model readiness
    pub fn health(&self) -> HealthReport {
        let regex_ner = ModelHealth {
            loaded: true,
            backend: Some(self.extractor.name().to_string()),
            reason: None,
        };

        let span_status = self.span_model.status();
        let span_masking = ModelHealth {
            loaded: self.span_model.is_ready(),
            backend: self.span_model.producer_name().map(str::to_string),
            reason: (!span_status.is_ready()).then(|| span_status.to_string()),
        };

        let status = if regex_ner.loaded && span_masking.loaded {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthReport {
            status,
            version: VERSION.to_string(),
            models: ModelsHealth {
                regex_ner,
                span_masking,
            },
        }
    }

    /// Describe the service
    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: VERSION.to_string(),
            description: "Regex-based legal entity extraction and privilege-preserving PII masking"
                .to_string(),
            operations: vec![
                "extract_entities".to_string(),
                "mask_pii".to_string(),
                "health".to_string(),
            ],
        }
    }
}

impl std::fmt::Debug for LegalAnalysisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegalAnalysisEngine")
            .field("extractor", &self.extractor.name())
            .field("span_model", &self.span_model)
            .field("default_threshold", &self.default_threshold)
            .field("max_text_chars", &self.max_text_chars)
            .finish()
    }
}

/// Build the span model from a JSON spans file
///
/// A file that cannot be read yields a failed model. A file that reads but
/// does not hold a valid span list is rejected as invalid input.
pub fn span_model_from_spans_file(path: &Path) -> Result<SpanModel> {
    match StaticSpanProducer::from_json_file(path) {
        Ok(producer) => Ok(SpanModel::ready(Arc::new(producer))),
        Err(e @ LexmaskError::InvalidInput(_)) => Err(e),
        Err(e) => Ok(SpanModel::from_load_result(Err(e))),
    }
}

/// Build the span model from the configured gazetteer
///
/// Without a gazetteer the model is not loaded; a gazetteer that fails to
/// build yields a failed model rather than an error.
pub fn span_model_from_config(masking: &MaskingConfig) -> SpanModel {
    if masking.has_gazetteer() {
        return SpanModel::from_load_result(
            GazetteerSpanProducer::new(&masking.gazetteer)
                .map(|p| Arc::new(p) as Arc<dyn SpanProducer>),
        );
    }

    SpanModel::not_loaded()
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
