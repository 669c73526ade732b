//! Domain models and types for lexmask.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity models** ([`LegalEntity`], [`EntityType`]) produced by extraction
//! - **Span models** ([`ExternalSpan`], [`RedactionResult`]) consumed and produced by masking
//! - **Offset conversion** ([`CharIndex`]) between regex byte offsets and character offsets
//! - **Error types** ([`LexmaskError`], [`InvalidInputError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LexmaskError>`]:
//!
//! ```rust
//! use lexmask::domain::{InvalidInputError, LexmaskError, Result};
//!
//! fn check_threshold(threshold: f32) -> Result<()> {
//!     if !(0.0..=1.0).contains(&threshold) {
//!         return Err(InvalidInputError::ThresholdOutOfRange { threshold }.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(check_threshold(1.5), Err(LexmaskError::InvalidInput(_))));
//! ```

pub mod entity;
pub mod errors;
pub mod offsets;
pub mod result;
pub mod span;

// Re-export commonly used types for convenience
pub use entity::{EntityType, LegalEntity};
pub use errors::{InvalidInputError, LexmaskError};
pub use offsets::CharIndex;
pub use result::Result;
pub use span::{ExternalSpan, RedactionResult};
