//! Canonical ink types shared by every stage.
//!
//! All three source formats collapse into the same shape:
//!
//! ```text
//! InkDocument
//! ├── format: SourceFormat             # Which adapter produced it
//! ├── id: Option<String>               # Sample id / key id when the source has one
//! ├── strokes: Vec<Stroke>             # One per pen-down segment
//! │   ├── samples: Vec<RawSample>      # (x, y, t), never empty
//! │   └── meta: StrokeMeta             # colour, start/end time (optional)
//! ├── label: Option<Label>             # Transcription, LaTeX or category
//! └── recognized: Option<bool>         # Recognition flag (sketch records)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use canonical::{RawSample, ResampleConfig, Stroke, StrokeMeta};
//!
//! let raw = vec![
//!     RawSample { x: 0.0, y: 0.0, t: 0.0 },
//!     RawSample { x: 30.0, y: 0.0, t: 40.0 },
//! ];
//! let stroke = Stroke::from_raw(raw, StrokeMeta::default(), &ResampleConfig::default()).unwrap();
//!
//! assert_eq!(stroke.len(), 4);
//! assert_eq!(stroke.first().x, 0.0);
//! assert_eq!(stroke.last().x, 30.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ResampleConfig;
use crate::error::CanonicalError;
use crate::resample::resample_with_config;

/// One recorded or interpolated point with absolute time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl RawSample {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }
}

/// Optional per-stroke metadata. Only the whiteboard format fills it today.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StrokeMeta {
    pub colour: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

impl StrokeMeta {
    pub fn is_empty(&self) -> bool {
        self.colour.is_none() && self.start_time.is_none() && self.end_time.is_none()
    }
}

/// A continuous pen-down segment.
///
/// The sample list is private so a stroke cannot be emptied or edited after an
/// adapter produced it. Serialize-only for the same reason.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Stroke {
    samples: Vec<RawSample>,
    #[serde(skip_serializing_if = "StrokeMeta::is_empty")]
    meta: StrokeMeta,
}

impl Stroke {
    /// Wraps already-canonical samples. Rejects an empty sequence.
    pub fn new(samples: Vec<RawSample>, meta: StrokeMeta) -> Result<Self, CanonicalError> {
        if samples.is_empty() {
            return Err(CanonicalError::EmptyStroke);
        }
        Ok(Self { samples, meta })
    }

    /// Resamples raw adapter output and wraps the result.
    pub fn from_raw(
        raw: Vec<RawSample>,
        meta: StrokeMeta,
        cfg: &ResampleConfig,
    ) -> Result<Self, CanonicalError> {
        let samples = resample_with_config(&raw, cfg)?;
        Self::new(samples, meta)
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    pub fn meta(&self) -> &StrokeMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> &RawSample {
        &self.samples[0]
    }

    pub fn last(&self) -> &RawSample {
        &self.samples[self.samples.len() - 1]
    }

    /// Time between the first and last sample.
    pub fn duration(&self) -> f64 {
        self.last().t - self.first().t
    }
}

/// Dataset encodings understood by the ingest adapters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// InkML `ink`/`trace` documents.
    Inkml,
    /// Whiteboard capture session XML.
    Whiteboard,
    /// `[xs, ys, ts]` array sketches, bare or wrapped in a record.
    Sketch,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Inkml => "inkml",
            SourceFormat::Whiteboard => "whiteboard",
            SourceFormat::Sketch => "sketch",
        }
    }

    /// Maps a file extension (without the dot) to its format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "inkml" => Some(SourceFormat::Inkml),
            "xml" => Some(SourceFormat::Whiteboard),
            "ndjson" | "json" => Some(SourceFormat::Sketch),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a label's text describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// Handwritten text transcription.
    Transcription,
    /// LaTeX for a handwritten expression.
    Latex,
    /// Sketch category word.
    Category,
}

/// Free-form annotation carried from the source to the output document.
///
/// The text is never parsed or validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
}

impl Label {
    pub fn new(kind: LabelKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A parsed source document: strokes plus whatever metadata the format carries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InkDocument {
    pub format: SourceFormat,
    pub id: Option<String>,
    pub strokes: Vec<Stroke>,
    pub label: Option<Label>,
    pub recognized: Option<bool>,
}

impl InkDocument {
    pub fn new(format: SourceFormat, strokes: Vec<Stroke>) -> Self {
        Self {
            format,
            id: None,
            strokes,
            label: None,
            recognized: None,
        }
    }

    /// Total samples across all strokes.
    pub fn sample_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }
}
