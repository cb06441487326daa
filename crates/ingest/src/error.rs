//! Error types produced by the ingest adapters.
//!
//! Every failure names the offending stroke (by zero-based index in document
//! order) or field so batch callers can log something actionable. Errors are
//! cloneable and comparable so tests can match on them directly.
//!
//! # Error Categories
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`InvalidUtf8`](IngestError::InvalidUtf8) | Input | Bytes are not UTF-8 |
//! | [`PayloadTooLarge`](IngestError::PayloadTooLarge) | Input | Size limit exceeded |
//! | [`Xml`](IngestError::Xml) | Syntax | Markup is not well-formed |
//! | [`Json`](IngestError::Json) | Syntax | Sketch JSON is not well-formed |
//! | [`MalformedTrace`](IngestError::MalformedTrace) | InkML | A trace triple is not three numbers |
//! | [`MissingField`](IngestError::MissingField) | Structure | Required element or attribute absent |
//! | [`InvalidNumber`](IngestError::InvalidNumber) | Structure | Attribute or value is not a finite number |
//! | [`LengthMismatch`](IngestError::LengthMismatch) | Sketch | xs/ys/ts lengths differ |
//! | [`Canonical`](IngestError::Canonical) | Stroke | Resampling or stroke construction failed |
//!
//! # Examples
//!
//! ```rust
//! use ingest::{IngestConfig, IngestError, InkAdapter, SketchAdapter};
//!
//! let adapter = SketchAdapter::new(IngestConfig::default());
//! match adapter.parse("[[[1,2],[1],[0,10]]]") {
//!     Err(IngestError::LengthMismatch { stroke, .. }) => assert_eq!(stroke, 0),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
use canonical::CanonicalError;
use thiserror::Error;

/// Errors that can occur while parsing a source document into strokes.
///
/// The enum is `#[non_exhaustive]`; include a catch-all arm when matching.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IngestError {
    /// Input bytes are not valid UTF-8.
    #[error("invalid utf-8 payload: {0}")]
    InvalidUtf8(String),

    /// Input exceeds [`IngestConfig::max_input_bytes`](crate::IngestConfig::max_input_bytes).
    #[error("payload exceeds size limit: {0}")]
    PayloadTooLarge(String),

    /// The XML parser rejected the document.
    #[error("malformed xml: {0}")]
    Xml(String),

    /// The JSON parser rejected the sketch.
    #[error("malformed sketch json: {0}")]
    Json(String),

    /// An InkML trace contains a sample that is not exactly three finite numbers.
    #[error("malformed trace {trace}: {reason}")]
    MalformedTrace { trace: usize, reason: String },

    /// A required element or attribute is absent.
    ///
    /// `stroke` is `None` when the field belongs to the document itself
    /// (for example the `StrokeSet` element).
    #[error("missing field `{field}`{}", stroke_suffix(.stroke))]
    MissingField {
        stroke: Option<usize>,
        field: String,
    },

    /// A field is present but not a finite number.
    #[error("field `{field}` is not a finite number: {value:?}{}", stroke_suffix(.stroke))]
    InvalidNumber {
        stroke: Option<usize>,
        field: String,
        value: String,
    },

    /// The three coordinate arrays of a sketch stroke differ in length.
    #[error("stroke {stroke}: xs/ys/ts lengths differ ({xs}/{ys}/{ts})")]
    LengthMismatch {
        stroke: usize,
        xs: usize,
        ys: usize,
        ts: usize,
    },

    /// Building the canonical stroke failed (for example an empty trace).
    #[error("stroke {stroke}: {source}")]
    Canonical {
        stroke: usize,
        #[source]
        source: CanonicalError,
    },
}

fn stroke_suffix(stroke: &Option<usize>) -> String {
    match stroke {
        Some(idx) => format!(" in stroke {idx}"),
        None => String::new(),
    }
}

impl IngestError {
    pub(crate) fn missing(stroke: Option<usize>, field: impl Into<String>) -> Self {
        IngestError::MissingField {
            stroke,
            field: field.into(),
        }
    }

    /// Index of the stroke the error points at, when it is stroke-local.
    pub fn stroke_index(&self) -> Option<usize> {
        match self {
            IngestError::MalformedTrace { trace, .. } => Some(*trace),
            IngestError::MissingField { stroke, .. }
            | IngestError::InvalidNumber { stroke, .. } => *stroke,
            IngestError::LengthMismatch { stroke, .. } | IngestError::Canonical { stroke, .. } => {
                Some(*stroke)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_stroke() {
        let err = IngestError::missing(Some(3), "time");
        assert_eq!(err.to_string(), "missing field `time` in stroke 3");
        assert_eq!(err.stroke_index(), Some(3));

        let err = IngestError::missing(None, "StrokeSet");
        assert_eq!(err.to_string(), "missing field `StrokeSet`");
        assert_eq!(err.stroke_index(), None);
    }

    #[test]
    fn canonical_error_is_wrapped_with_source() {
        use std::error::Error;

        let err = IngestError::Canonical {
            stroke: 1,
            source: CanonicalError::EmptyStroke,
        };
        assert_eq!(err.to_string(), "stroke 1: stroke has no samples");
        assert!(err.source().is_some());
    }
}
