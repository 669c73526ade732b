//! Batch command implementation
//!
//! Processes a directory of `*.txt` documents and prints a batch report.

use super::{load_settings, report_error};
use crate::batch::{BatchOptions, BatchRunner, DEFAULT_CONCURRENCY};
use crate::engine::{span_model_from_config, LegalAnalysisEngine};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing `*.txt` documents
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory receiving `.entities.json` and `.masked.txt` outputs
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Number of documents processed in parallel
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Minimum confidence (0.0 - 1.0), defaults to the configured threshold
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl BatchArgs {
    /// Execute the batch command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let span_model = span_model_from_config(&config.masking);
        let engine = match LegalAnalysisEngine::from_config(&config, span_model) {
            Ok(e) => Arc::new(e),
            Err(e) => return Ok(report_error(&e, "Failed to initialize engine")),
        };

        let options = BatchOptions {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            concurrency: self.concurrency,
            confidence_threshold: self.threshold,
        };

        if !self.json {
            println!("📂 Processing documents in {}", self.input_dir.display());
        }

        let report = match BatchRunner::new(engine, options).run(shutdown_signal).await {
            Ok(r) => r,
            Err(e) => return Ok(report_error(&e, "Batch failed")),
        };

        if self.json {
            println!("{}", report.format_json()?);
        } else {
            print!("{}", report.format_console());
        }

        if let Some(path) = &self.report {
            report.write_to_file(path)?;
            tracing::info!(path = %path.display(), "Batch report written");
        }

        if report.interrupted {
            tracing::warn!("Batch was interrupted before all documents were scheduled");
            Ok(130)
        } else if report.documents_failed > 0 {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
