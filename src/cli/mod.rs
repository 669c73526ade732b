//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for lexmask using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// lexmask - Legal entity extraction and PII masking
#[derive(Parser, Debug)]
#[command(name = "lexmask")]
#[command(version, about, long_about = None)]
#[command(author = "Lexmask Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lexmask.toml", env = "LEXMASK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEXMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract legal entities from text
    Extract(commands::extract::ExtractArgs),

    /// Mask person and organisation spans in text
    Mask(commands::mask::MaskArgs),

    /// Process a directory of documents
    Batch(commands::batch::BatchArgs),

    /// Report model health
    Health(commands::health::HealthArgs),

    /// List the active pattern catalog
    Patterns(commands::patterns::PatternsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
