//! Audit logging module
//!
//! Provides an append-only audit trail for masking operations. Span values
//! are recorded only as SHA-256 hashes.

pub mod logger;

pub use logger::{hash_value, AuditLogger, MaskingAudit};
