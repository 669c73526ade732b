// Lexmask - Legal entity extraction and PII masking
// Copyright (c) 2025 Lexmask Contributors
// Licensed under the MIT License

//! # Lexmask - Legal entity extraction and PII masking
//!
//! Lexmask finds statutory references, provisions, case citations and court
//! names in Indian legal text, and masks personally identifying spans to
//! preserve attorney-client privilege.
//!
//! ## Overview
//!
//! This library provides:
//! - **Extraction** of legal entities with an ordered regex catalog, context
//!   based confidence scoring and overlap resolution
//! - **Redaction** of labelled character spans produced by an external model
//!   or a gazetteer, safe for any Unicode input
//! - **Batch processing** of document directories with a summary report
//! - **Auditing** of masking requests without storing plaintext
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`engine`] - Service facade combining extraction and masking
//! - [`extraction`] - Pattern catalog, scoring and overlap resolution
//! - [`redaction`] - Span producers and the span redactor
//! - [`batch`] / [`report`] - Directory processing and reports
//! - [`audit`] - Masking audit trail
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use lexmask::engine::{ExtractRequest, LegalAnalysisEngine};
//! use lexmask::config::LexmaskConfig;
//! use lexmask::redaction::SpanModel;
//!
//! # fn main() -> lexmask::domain::Result<()> {
//! let engine = LegalAnalysisEngine::from_config(&LexmaskConfig::default(), SpanModel::not_loaded())?;
//! let outcome = engine.extract_entities(&ExtractRequest::new(
//!     "Under Section 420 of Indian Penal Code, 1860",
//! ))?;
//!
//! for entity in &outcome.entities {
//!     println!("{} [{}] {:.2}", entity.entity, entity.entity_type.label(), entity.confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Masking
//!
//! ```rust
//! use lexmask::domain::ExternalSpan;
//! use lexmask::redaction::SpanRedactor;
//!
//! # fn main() -> lexmask::domain::Result<()> {
//! let redactor = SpanRedactor::default();
//! let result = redactor.mask(
//!     "Justice Sharma presided.",
//!     &[ExternalSpan::new("JUDGE", 0, 14)],
//! )?;
//! assert_eq!(result.masked_text, "[REDACTED] presided.");
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod batch;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod extraction;
pub mod logging;
pub mod redaction;
pub mod report;
