//! Mask command implementation
//!
//! Masks person and organisation spans in a file or stdin. Spans come from a
//! JSON spans file, otherwise from the configured gazetteer.

use super::{load_settings, read_input, report_error};
use crate::engine::{
    span_model_from_config, span_model_from_spans_file, LegalAnalysisEngine, MaskRequest,
};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Input text file (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON file of `{label, start_char, end_char}` spans
    #[arg(short, long)]
    pub spans: Option<PathBuf>,

    /// Replacement token, defaults to the configured token
    #[arg(short, long)]
    pub token: Option<String>,

    /// Labels to mask (comma-separated), overrides the configured list
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Print the full result as JSON instead of the masked text
    #[arg(long)]
    pub json: bool,
}

impl MaskArgs {
    /// Execute the mask command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_settings(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if let Some(labels) = &self.labels {
            let labels: Vec<String> = labels
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
            tracing::info!(labels = ?labels, "Overriding masked labels from CLI");
            config.masking.entities_to_mask = labels;
            if let Err(e) = config.validate() {
                eprintln!("❌ Invalid labels: {e}");
                return Ok(2);
            }
        }

        let span_model = match self.spans.as_deref() {
            Some(path) => match span_model_from_spans_file(path) {
                Ok(model) => model,
                Err(e) => return Ok(report_error(&e, "Failed to load spans file")),
            },
            None => span_model_from_config(&config.masking),
        };
        let engine = match LegalAnalysisEngine::from_config(&config, span_model) {
            Ok(e) => e,
            Err(e) => return Ok(report_error(&e, "Failed to initialize masking")),
        };

        let text = read_input(self.input.as_deref())?;
        let request = MaskRequest {
            text,
            mask_token: self.token.clone(),
        };

        let outcome = match engine.mask_pii(&request) {
            Ok(o) => o,
            Err(e) => return Ok(report_error(&e, "Masking failed")),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print!("{}", outcome.masked_text);
            if !outcome.masked_text.ends_with('\n') {
                println!();
            }
            eprintln!("✅ Masked {} entities", outcome.entities_masked);
        }

        Ok(0)
    }
}
