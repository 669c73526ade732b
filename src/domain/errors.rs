//! Domain error types
//!
//! This module defines the error hierarchy for lexmask. Configuration problems,
//! caller mistakes and an unavailable span producer are kept apart so callers
//! can map each to a different outcome.

use thiserror::Error;

/// Main lexmask error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum LexmaskError {
    /// Configuration-related errors, including malformed pattern catalogs
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller supplied input the engine refuses to process
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The span producer is not loaded or failed while labeling text
    #[error("Span producer unavailable: {0}")]
    SpanProducerUnavailable(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Input validation errors
///
/// Raised before any text is mutated, so a failing request never produces a
/// partially masked document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// Confidence threshold outside [0, 1] (or NaN)
    #[error("confidence threshold {threshold} must be within [0.0, 1.0]")]
    ThresholdOutOfRange { threshold: f32 },

    /// Span end runs past the end of the text
    #[error("span [{start}, {end}) is out of bounds for text of {len} characters")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    /// Span start is after its end
    #[error("span start {start} is greater than span end {end}")]
    InvertedSpan { start: usize, end: usize },

    /// Span list that does not parse as `{label, start_char, end_char}` records
    #[error("malformed span list: {reason}")]
    MalformedSpans { reason: String },

    /// Text longer than the configured maximum
    #[error("text has {len} characters, maximum allowed is {max}")]
    TextTooLong { len: usize, max: usize },
}

impl LexmaskError {
    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::InvalidInput(_) => 3,
            Self::SpanProducerUnavailable(_) => 4,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LexmaskError {
    fn from(err: std::io::Error) -> Self {
        LexmaskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LexmaskError {
    fn from(err: serde_json::Error) -> Self {
        LexmaskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LexmaskError {
    fn from(err: toml::de::Error) -> Self {
        LexmaskError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexmaskError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_invalid_input_conversion() {
        let input_err = InvalidInputError::InvertedSpan { start: 5, end: 2 };
        let err: LexmaskError = input_err.into();
        assert!(matches!(err, LexmaskError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "Invalid input: span start 5 is greater than span end 2"
        );
    }

    #[test]
    fn test_span_out_of_bounds_message() {
        let err = InvalidInputError::SpanOutOfBounds {
            start: 3,
            end: 40,
            len: 12,
        };
        assert!(err.to_string().contains("out of bounds"));
        assert!(err.to_string().contains("12 characters"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(LexmaskError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(
            LexmaskError::from(InvalidInputError::ThresholdOutOfRange { threshold: 2.0 })
                .exit_code(),
            3
        );
        assert_eq!(
            LexmaskError::SpanProducerUnavailable("not loaded".into()).exit_code(),
            4
        );
        assert_eq!(
            LexmaskError::from(InvalidInputError::MalformedSpans {
                reason: "not an array".into()
            })
            .exit_code(),
            3
        );
        assert_eq!(LexmaskError::Io("disk".into()).exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: LexmaskError = io_err.into();
        assert!(matches!(err, LexmaskError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LexmaskError = json_err.into();
        assert!(matches!(err, LexmaskError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: LexmaskError = toml_err.into();
        assert!(matches!(err, LexmaskError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
