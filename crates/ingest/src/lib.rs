//! Ink Ingest Layer
//!
//! This is where handwriting enters the pipeline. Each supported source format
//! has an adapter that parses raw text into canonical, resampled strokes, so
//! everything downstream sees one shape regardless of where the ink came from.
//!
//! ## What we do here
//!
//! - **Parse three encodings** - InkML traces, whiteboard capture XML, and
//!   `[xs, ys, ts]` array sketches (bare or wrapped in ndjson drawing records).
//! - **Validate structure** - Missing elements, non-numeric attributes and
//!   ragged arrays are reported with the index of the offending stroke.
//! - **Normalize time** - Whiteboard seconds are scaled to milliseconds.
//! - **Densify** - Every stroke goes through the canonical resampler with the
//!   configured quantum, so long pauses become evenly spaced samples.
//! - **Carry labels** - LaTeX annotations, transcriptions and category words
//!   are attached to the document for the assembler to emit.
//! - **Log everything** - Structured logs via tracing for batch debugging.
//!
//! ## Main entry point
//!
//! Call [`ingest`] with a [`SourceFormat`], the raw bytes and an
//! [`IngestConfig`], get back an [`InkDocument`]. Adapters can also be used
//! directly through the [`InkAdapter`] trait.
//!
//! ## Example
//!
//! ```
//! use canonical::SourceFormat;
//! use ingest::{ingest, IngestConfig};
//!
//! let raw = br#"<ink><trace>0 0 0, 10 0 20, 20 0 40</trace></ink>"#;
//! let doc = ingest(SourceFormat::Inkml, raw, &IngestConfig::default()).unwrap();
//!
//! assert_eq!(doc.strokes.len(), 1);
//! assert_eq!(doc.strokes[0].len(), 3);
//! ```
//!
use std::time::Instant;

use tracing::{info, warn, Level};

mod adapter;
mod config;
mod error;
mod inkml;
mod sketch;
mod whiteboard;

pub use canonical::{InkDocument, SourceFormat};

pub use crate::adapter::InkAdapter;
pub use crate::config::{ConfigError, IngestConfig, DEFAULT_WHITEBOARD_TIME_SCALE};
pub use crate::error::IngestError;
pub use crate::inkml::{parse_trace, InkmlAdapter};
pub use crate::sketch::SketchAdapter;
pub use crate::whiteboard::WhiteboardAdapter;

/// Returns the adapter for `format`, configured with `cfg`.
pub fn adapter_for(format: SourceFormat, cfg: &IngestConfig) -> Box<dyn InkAdapter + Send + Sync> {
    match format {
        SourceFormat::Inkml => Box::new(InkmlAdapter::new(cfg.clone())),
        SourceFormat::Whiteboard => Box::new(WhiteboardAdapter::new(cfg.clone())),
        SourceFormat::Sketch => Box::new(SketchAdapter::new(cfg.clone())),
    }
}

/// Parse one raw document of the given format into canonical strokes.
pub fn ingest(
    format: SourceFormat,
    raw: &[u8],
    cfg: &IngestConfig,
) -> Result<InkDocument, IngestError> {
    let start = Instant::now();

    let span = tracing::span!(
        Level::INFO,
        "ingest.parse",
        format = %format,
        input_bytes = raw.len()
    );
    let _guard = span.enter();

    match adapter_for(format, cfg).parse_bytes(raw) {
        Ok(doc) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                doc_id = ?doc.id,
                strokes = doc.strokes.len(),
                samples = doc.sample_count(),
                labelled = doc.label.is_some(),
                elapsed_micros,
                "ingest_success"
            );
            Ok(doc)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(
                stroke = ?err.stroke_index(),
                error = %err,
                elapsed_micros,
                "ingest_failure"
            );
            Err(err)
        }
    }
}
