//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Besides schema
//! validation it compiles the pattern catalog and the gazetteer, so a config
//! that passes here will start.

use crate::config::load_config;
use crate::engine::span_model_from_config;
use crate::extraction::{ConfidenceScorer, PatternCatalog};
use clap::Args;
use std::sync::Arc;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates the schema as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded and valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let catalog =
            match PatternCatalog::load_or_default(config.extraction.pattern_catalog.as_deref()) {
                Ok(c) => Arc::new(c),
                Err(e) => {
                    println!("❌ Pattern catalog failed to compile");
                    println!("   Error: {e}");
                    return Ok(2);
                }
            };
        let policy = config.extraction.confidence.clone();
        if let Err(e) = ConfidenceScorer::new(policy, Arc::clone(&catalog)) {
            println!("❌ Confidence policy rejected");
            println!("   Error: {e}");
            return Ok(2);
        }
        println!(
            "✅ Pattern catalog {} compiled ({} rules)",
            catalog.version(),
            catalog.len()
        );

        let span_model = span_model_from_config(&config.masking);
        if config.masking.has_gazetteer() && !span_model.is_ready() {
            println!("❌ Gazetteer failed to build");
            println!("   Status: {}", span_model.status());
            return Ok(2);
        }

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Confidence Threshold: {:.2}",
            config.extraction.confidence_threshold
        );
        println!("  Context Window: {}", config.extraction.context_window);
        match config.extraction.max_text_chars {
            Some(max) => println!("  Max Text Chars: {max}"),
            None => println!("  Max Text Chars: unlimited"),
        }
        println!("  Mask Token: {}", config.masking.mask_token);
        println!(
            "  Masked Labels: {}",
            config.masking.entities_to_mask.join(", ")
        );
        println!("  Span Model: {}", span_model.status());
        println!(
            "  Audit: {}",
            if config.audit.enabled {
                config.audit.log_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/lexmask.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[extraction]\nconfidence_threshold = 0.8").unwrap();
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_bad_threshold() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[extraction]\nconfidence_threshold = 1.5").unwrap();
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
