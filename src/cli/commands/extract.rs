//! Extract command implementation
//!
//! Runs legal entity extraction over a file or stdin.

use super::{load_settings, read_input, report_error, OutputFormat};
use crate::engine::{ExtractRequest, ExtractionOutcome, LegalAnalysisEngine};
use crate::redaction::SpanModel;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input text file (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Minimum confidence (0.0 - 1.0), defaults to the configured threshold
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl ExtractArgs {
    /// Execute the extract command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let engine = match LegalAnalysisEngine::from_config(&config, SpanModel::not_loaded()) {
            Ok(e) => e,
            Err(e) => return Ok(report_error(&e, "Failed to initialize extractor")),
        };

        let text = read_input(self.input.as_deref())?;
        let request = ExtractRequest {
            text,
            confidence_threshold: self.threshold,
        };

        let outcome = match engine.extract_entities(&request) {
            Ok(o) => o,
            Err(e) => return Ok(report_error(&e, "Extraction failed")),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            OutputFormat::Table => print!("{}", format_table(&outcome)),
        }

        Ok(0)
    }
}

fn format_table(outcome: &ExtractionOutcome) -> String {
    let mut output = format!(
        "{:<14} {:>6} {:>6} {:>6}  {}\n",
        "TYPE", "START", "END", "CONF", "ENTITY"
    );
    for entity in &outcome.entities {
        output.push_str(&format!(
            "{:<14} {:>6} {:>6} {:>6.2}  {}\n",
            entity.entity_type.label(),
            entity.start_idx,
            entity.end_idx,
            entity.confidence,
            entity.entity
        ));
    }
    output.push_str(&format!(
        "\n{} entities in {:.2} ms\n",
        outcome.total_found, outcome.processing_time_ms
    ));
    output
}
