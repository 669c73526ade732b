//! PII masking
//!
//! Person and organisation spans come from a [`SpanProducer`] wrapped in a
//! [`SpanModel`]; the [`SpanRedactor`] replaces the qualifying ones with a
//! mask token, rightmost first, so offsets of spans not yet processed stay
//! valid.

pub mod model;
pub mod producer;
pub mod redactor;

pub use model::{ModelStatus, SpanModel};
pub use producer::{GazetteerSpanProducer, SpanProducer, StaticSpanProducer};
pub use redactor::{mask_spans, SpanRedactor, DEFAULT_MASK_LABELS, DEFAULT_MASK_TOKEN};
