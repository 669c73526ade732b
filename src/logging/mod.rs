//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` or the configured level)
//! - Console output on stderr
//! - JSON file logging with daily or hourly rotation
//!
//! Log events never carry masked values or document text, only counts,
//! labels and timings.
//!
//! # Example
//!
//! ```no_run
//! use lexmask::logging::init_logging;
//! use lexmask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of an extraction
///
/// # Example
///
/// ```no_run
/// use lexmask::log_extraction_complete;
///
/// log_extraction_complete!(3, 1.25_f64);
/// ```
#[macro_export]
macro_rules! log_extraction_complete {
    ($count:expr, $elapsed_ms:expr) => {
        tracing::info!(
            entities = $count,
            processing_time_ms = $elapsed_ms,
            "Extracted {} legal entities in {:.2}ms",
            $count,
            $elapsed_ms
        );
    };
}

/// Log the completion of a masking operation
///
/// # Example
///
/// ```no_run
/// use lexmask::log_masking_complete;
///
/// log_masking_complete!(2, 0.4_f64);
/// ```
#[macro_export]
macro_rules! log_masking_complete {
    ($count:expr, $elapsed_ms:expr) => {
        tracing::info!(
            entities_masked = $count,
            processing_time_ms = $elapsed_ms,
            "Masked {} entities in {:.2}ms",
            $count,
            $elapsed_ms
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use lexmask::log_error_with_context;
/// use lexmask::domain::LexmaskError;
///
/// let error = LexmaskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
