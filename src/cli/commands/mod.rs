//! CLI command implementations
//!
//! Every command returns its process exit code: 0 success, 2 configuration
//! error, 3 invalid input, 4 span producer unavailable, 5 fatal.

pub mod batch;
pub mod extract;
pub mod health;
pub mod init;
pub mod mask;
pub mod patterns;
pub mod validate;

use crate::config::{load_config_or_default, LexmaskConfig};
use crate::domain::LexmaskError;
use clap::ValueEnum;
use std::io::Read;
use std::path::Path;

/// Output format for commands printing structured results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable table
    Table,
}

/// Load the configuration, falling back to defaults when the file is absent
///
/// Prints the error and returns the exit code on failure.
pub(crate) fn load_settings(config_path: &str) -> Result<LexmaskConfig, i32> {
    load_config_or_default(config_path).map_err(|e| report_error(&e, "Failed to load configuration"))
}

/// Read the whole input file, or stdin when no file is given
pub(crate) fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e)),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Log and print an error, returning its exit code
pub(crate) fn report_error(error: &LexmaskError, context: &str) -> i32 {
    crate::log_error_with_context!(error, context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    error.exit_code()
}
