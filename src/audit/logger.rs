//! Audit logger for masking operations

use crate::config::AuditConfig;
use crate::domain::{CharIndex, ExternalSpan, LexmaskError, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    request_id: String,
    timestamp: String,
    entities_masked: usize,
    processing_time_ms: f64,
    mask_token: String,
    spans: Vec<AuditSpan>,
}

/// Masked span with its value hashed
#[derive(Debug, Serialize)]
struct AuditSpan {
    label: String,
    start_char: usize,
    end_char: usize,
    /// SHA-256 hash of the original span text (never log plaintext)
    value_hash: String,
}

/// Masking operation to be audited
#[derive(Debug, Clone, Copy)]
pub struct MaskingAudit<'a> {
    /// Text before masking
    pub original_text: &'a str,
    /// Spans that were masked
    pub masked_spans: &'a [ExternalSpan],
    /// Number of replacements applied
    pub entities_masked: usize,
    /// Time spent masking
    pub processing_time_ms: f64,
    /// Token written in place of the spans
    pub mask_token: &'a str,
}

/// Append-only audit trail for masking operations
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LexmaskError::Io(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    /// Create from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(
            PathBuf::from(&config.log_path),
            config.json_format,
            config.enabled,
        )
    }

    /// Logger that records nothing
    pub fn disabled() -> Self {
        Self {
            log_path: PathBuf::new(),
            json_format: true,
            enabled: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Whether entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Audit log location
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record a masking operation
    ///
    /// Returns the request id of the written entry, or `None` when disabled.
    pub fn log_masking(&self, audit: &MaskingAudit<'_>) -> Result<Option<Uuid>> {
        if !self.enabled {
            return Ok(None);
        }

        let request_id = Uuid::new_v4();
        let index = CharIndex::new(audit.original_text);
        let entry = AuditLogEntry {
            request_id: request_id.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            entities_masked: audit.entities_masked,
            processing_time_ms: audit.processing_time_ms,
            mask_token: audit.mask_token.to_string(),
            spans: audit
                .masked_spans
                .iter()
                .map(|span| AuditSpan {
                    label: span.label.clone(),
                    start_char: span.start_char,
                    end_char: span.end_char,
                    value_hash: hash_value(index.slice(
                        audit.original_text,
                        span.start_char,
                        span.end_char,
                    )),
                })
                .collect(),
        };

        self.write_entry(&entry)?;
        Ok(Some(request_id))
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            let labels: Vec<&str> = entry.spans.iter().map(|s| s.label.as_str()).collect();
            format!(
                "[{}] Request: {} | Masked: {} | Labels: {} | Time: {:.2}ms",
                entry.timestamp,
                entry.request_id,
                entry.entities_masked,
                labels.join(","),
                entry.processing_time_ms
            )
        };

        // Keep concurrent entries on separate lines
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LexmaskError::Other("Audit log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                LexmaskError::Io(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Hash a value using SHA-256
pub fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
