//! Legal entity extraction
//!
//! Statutes, provisions and case citations are recognised by an ordered
//! catalog of case-insensitive regular expressions. Every raw match is scored
//! against its surrounding text, overlapping matches are resolved greedily and
//! the survivors are filtered by a confidence threshold.
//!
//! ```rust
//! use lexmask::extraction::{EntityExtractor, PatternExtractor};
//!
//! let extractor = PatternExtractor::new().unwrap();
//! let entities = extractor
//!     .extract("Under Section 420 of Indian Penal Code, 1860", 0.70)
//!     .unwrap();
//! assert_eq!(entities[0].entity, "Section 420");
//! ```

pub mod catalog;
pub mod confidence;
pub mod extractor;
pub mod overlap;

pub use catalog::{PatternCatalog, PatternRule};
pub use confidence::{ConfidencePolicy, ConfidenceScorer, DocumentSignals};
pub use extractor::{EntityExtractor, PatternExtractor};
pub use overlap::{resolve_overlaps, Candidate};
