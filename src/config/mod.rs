//! Configuration management for lexmask.
//!
//! # Overview
//!
//! lexmask uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LEXMASK_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ExtractionConfig`] - Threshold, context window, catalog and confidence weights
//! - [`MaskingConfig`] - Mask token, masked labels and gazetteer
//! - [`AuditConfig`] - Hashed masking audit trail
//! - [`LoggingConfig`] - Rolling file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [extraction]
//! confidence_threshold = 0.70
//! pattern_catalog = "${LEXMASK_PATTERNS}"
//!
//! [masking]
//! mask_token = "[REDACTED]"
//! entities_to_mask = ["JUDGE", "LAWYER"]
//!
//! [masking.gazetteer]
//! JUDGE = ["Justice Sharma"]
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use lexmask::config::load_config;
//!
//! # fn example() {
//! match load_config("lexmask.toml") {
//!     Ok(config) => println!("Threshold: {}", config.extraction.confidence_threshold),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, load_config_str};
pub use schema::{
    ApplicationConfig, AuditConfig, ExtractionConfig, LexmaskConfig, LoggingConfig,
    MaskingConfig,
};
