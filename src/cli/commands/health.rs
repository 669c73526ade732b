//! Health command implementation

use super::{load_settings, report_error};
use crate::engine::{span_model_from_config, HealthStatus, LegalAnalysisEngine};
use clap::Args;

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Print service information alongside the health report
    #[arg(long)]
    pub info: bool,
}

impl HealthArgs {
    /// Execute the health command
    ///
    /// Exits with 4 when the span masking model is not loaded.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let span_model = span_model_from_config(&config.masking);
        let engine = match LegalAnalysisEngine::from_config(&config, span_model) {
            Ok(e) => e,
            Err(e) => return Ok(report_error(&e, "Failed to initialize engine")),
        };

        if self.info {
            println!("{}", serde_json::to_string_pretty(&engine.service_info())?);
        }

        let health = engine.health();
        println!("{}", serde_json::to_string_pretty(&health)?);

        Ok(match health.status {
            HealthStatus::Healthy => 0,
            HealthStatus::Unhealthy => 4,
        })
    }
}
