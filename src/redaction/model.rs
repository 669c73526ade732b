//! Span model capability
//!
//! Wraps the span producer together with its readiness, so callers can tell
//! "no names in this text" apart from "masking is impossible right now".

use super::producer::SpanProducer;
use crate::domain::{ExternalSpan, LexmaskError, Result};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Readiness of the span model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ModelStatus {
    /// Producer loaded and usable
    Ready,
    /// No producer configured
    NotLoaded,
    /// Producer failed to load
    Failed(String),
}

impl ModelStatus {
    /// Whether the model can be used
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::NotLoaded => write!(f, "not loaded"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Span producer with an explicit availability state
#[derive(Clone)]
pub struct SpanModel {
    producer: Option<Arc<dyn SpanProducer>>,
    status: ModelStatus,
}

impl SpanModel {
    /// Model backed by a ready producer
    pub fn ready(producer: Arc<dyn SpanProducer>) -> Self {
        Self {
            producer: Some(producer),
            status: ModelStatus::Ready,
        }
    }

    /// Model with no producer
    pub fn not_loaded() -> Self {
        Self {
            producer: None,
            status: ModelStatus::NotLoaded,
        }
    }

    /// Model whose producer failed to load
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            producer: None,
            status: ModelStatus::Failed(reason.into()),
        }
    }

    /// Build from the outcome of loading a producer
    pub fn from_load_result(result: Result<Arc<dyn SpanProducer>>) -> Self {
        match result {
            Ok(producer) => Self::ready(producer),
            Err(e) => {
                tracing::warn!(error = %e, "Span producer failed to load");
                Self::failed(e.to_string())
            }
        }
    }

    /// Current status
    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    /// Whether spans can be produced
    pub fn is_ready(&self) -> bool {
        self.status.is_ready() && self.producer.is_some()
    }

    /// Name of the underlying producer, if any
    pub fn producer_name(&self) -> Option<&str> {
        self.producer.as_deref().map(|p| p.name())
    }

    /// Label spans in `text`
    ///
    /// Fails with [`LexmaskError::SpanProducerUnavailable`] when the model is
    /// not ready or the producer itself fails.
    pub fn label_spans(&self, text: &str) -> Result<Vec<ExternalSpan>> {
        let producer = match (&self.status, &self.producer) {
            (ModelStatus::Ready, Some(producer)) => producer,
            (status, _) => {
                return Err(LexmaskError::SpanProducerUnavailable(format!(
                    "span model {status}"
                )))
            }
        };

        producer.label_spans(text).map_err(|e| match e {
            LexmaskError::SpanProducerUnavailable(_) => e,
            other => LexmaskError::SpanProducerUnavailable(format!(
                "{} producer failed: {}",
                producer.name(),
                other
            )),
        })
    }
}

impl fmt::Debug for SpanModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanModel")
            .field("producer", &self.producer_name())
            .field("status", &self.status)
            .finish()
    }
}
