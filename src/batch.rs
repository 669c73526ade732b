//! Directory batch processing
//!
//! Every `*.txt` file in the input directory is processed on a blocking
//! worker: entities are written to `<name>.entities.json` and, when the span
//! model is ready, the masked text to `<name>.masked.txt`. Concurrency is
//! bounded by a semaphore, and no new document is scheduled once the shutdown
//! signal fires.

use crate::domain::{LexmaskError, Result};
use crate::engine::{ExtractRequest, LegalAnalysisEngine, MaskRequest};
use crate::report::{BatchReport, DocumentResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

/// Default number of documents processed in parallel
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Batch run options
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory holding `*.txt` documents
    pub input_dir: PathBuf,
    /// Directory receiving the outputs
    pub output_dir: PathBuf,
    /// Maximum documents in flight
    pub concurrency: usize,
    /// Threshold override for extraction
    pub confidence_threshold: Option<f32>,
}

impl BatchOptions {
    /// Options with default concurrency and threshold
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            concurrency: DEFAULT_CONCURRENCY,
            confidence_threshold: None,
        }
    }
}

/// Runs the engine over a directory of documents
pub struct BatchRunner {
    engine: Arc<LegalAnalysisEngine>,
    options: BatchOptions,
}

impl BatchRunner {
    /// Create a runner
    pub fn new(engine: Arc<LegalAnalysisEngine>, options: BatchOptions) -> Self {
        Self { engine, options }
    }

    /// Process every document, stopping early on shutdown
    ///
    /// Per-document failures are recorded in the report; only problems with
    /// the directories themselves are returned as errors.
    pub async fn run(&self, shutdown_signal: watch::Receiver<bool>) -> Result<BatchReport> {
        if self.options.concurrency == 0 {
            return Err(LexmaskError::Configuration(
                "batch concurrency must be at least 1".to_string(),
            ));
        }

        let documents = list_documents(&self.options.input_dir)?;
        std::fs::create_dir_all(&self.options.output_dir).map_err(|e| {
            LexmaskError::Io(format!(
                "Failed to create output directory {}: {}",
                self.options.output_dir.display(),
                e
            ))
        })?;

        let mut report = BatchReport::new();
        let masking = self.engine.span_model().is_ready();
        if !masking {
            report.add_warning(format!(
                "Span model {}; masking skipped",
                self.engine.span_model().status()
            ));
        }

        tracing::info!(
            documents = documents.len(),
            concurrency = self.options.concurrency,
            masking,
            "Starting batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));
        let mut workers = JoinSet::new();

        for path in documents {
            if *shutdown_signal.borrow() {
                tracing::info!("Shutdown requested, no further documents scheduled");
                report.interrupted = true;
                break;
            }

            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| LexmaskError::Other(format!("Worker pool closed: {e}")))?;

            let engine = Arc::clone(&self.engine);
            let output_dir = self.options.output_dir.clone();
            let threshold = self.options.confidence_threshold;

            workers.spawn_blocking(move || {
                let _permit = permit;
                let name = document_name(&path);
                let outcome = process_document(&engine, &path, &output_dir, threshold, masking);
                (name, outcome)
            });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((_, Ok(result))) => report.add_document(&result),
                Ok((name, Err(e))) => {
                    tracing::warn!(document = %name, error = %e, "Document failed");
                    report.add_failure(name, e.to_string());
                }
                Err(e) => {
                    tracing::error!(error = %e, "Batch worker panicked");
                    report.add_failure("<unknown>", format!("worker failed: {e}"));
                }
            }
        }

        tracing::info!(
            processed = report.documents_processed,
            failed = report.documents_failed,
            entities = report.total_entities,
            spans_masked = report.spans_masked,
            interrupted = report.interrupted,
            "Batch finished"
        );

        Ok(report)
    }
}

/// `*.txt` files directly inside `dir`, sorted by path
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        LexmaskError::Io(format!("Failed to read input directory {}: {}", dir.display(), e))
    })?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn process_document(
    engine: &LegalAnalysisEngine,
    path: &Path,
    output_dir: &Path,
    threshold: Option<f32>,
    masking: bool,
) -> Result<DocumentResult> {
    let start = Instant::now();
    let text = std::fs::read_to_string(path)
        .map_err(|e| LexmaskError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let extraction = engine.extract_entities(&ExtractRequest {
        text: text.clone(),
        confidence_threshold: threshold,
    })?;
    let entities_json = serde_json::to_string_pretty(&extraction.entities)?;
    std::fs::write(output_dir.join(format!("{stem}.entities.json")), entities_json)?;

    let entities_masked = if masking {
        let masked = engine.mask_pii(&MaskRequest::new(text))?;
        std::fs::write(
            output_dir.join(format!("{stem}.masked.txt")),
            &masked.masked_text,
        )?;
        Some(masked.entities_masked)
    } else {
        None
    };

    Ok(DocumentResult {
        document: document_name(path),
        entities: extraction.entities,
        entities_masked,
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}
