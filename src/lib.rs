//! Workspace umbrella crate for inkpath.
//!
//! This crate stitches ingest, outline tracing and SVG assembly together so
//! callers can turn a raw ink file into a finished document with a single
//! call to [`convert`].

pub use canonical::{
    resample, resample_with_config, CanonicalError, InkDocument, Label, LabelKind, RawSample,
    ResampleConfig, SourceFormat, Stroke, StrokeMeta,
};
pub use document::{
    append_label, assemble, view_box_from_bounds, view_box_from_paths, with_view_box,
    DocumentConfig, DocumentError, SvgDocument, SvgStyle, ViewBox, ViewBoxSource,
};
pub use ingest::{ingest, IngestConfig, IngestError, InkAdapter, SketchAdapter};
pub use outline::{
    trace_points, trace_stroke, trace_to_path, Easing, OutlineError, PathData, StrokeOptions,
    Taper, TaperOptions, TracedStroke,
};

pub mod config;

pub use crate::config::{ConfigLoadError, PipelineConfig};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn, Level};

/// Errors that can occur while converting one source document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid pipeline config: {0}")]
    InvalidConfig(String),

    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),

    #[error("outline failure in stroke {stroke}: {source}")]
    Outline {
        stroke: usize,
        #[source]
        source: OutlineError,
    },
}

impl PipelineError {
    /// Index of the stroke the error points at, when there is one.
    pub fn stroke_index(&self) -> Option<usize> {
        match self {
            PipelineError::Ingest(err) => err.stroke_index(),
            PipelineError::Outline { stroke, .. } => Some(*stroke),
            PipelineError::InvalidConfig(_) => None,
        }
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_ingest(&self, latency: Duration, result: Result<(), IngestError>);
    fn record_outline(&self, latency: Duration, result: Result<(), PipelineError>);
    fn record_assemble(&self, latency: Duration);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_ingest(self, result: Result<(), IngestError>) {
        self.recorder.record_ingest(self.start.elapsed(), result);
    }

    fn record_outline(self, result: Result<(), PipelineError>) {
        self.recorder.record_outline(self.start.elapsed(), result);
    }

    fn record_assemble(self) {
        self.recorder.record_assemble(self.start.elapsed());
    }
}

/// A converted source document: the parsed ink, one traced outline per
/// stroke, and the assembled SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedDocument {
    pub source: InkDocument,
    pub strokes: Vec<TracedStroke>,
    pub svg: SvgDocument,
}

impl ConvertedDocument {
    pub fn id(&self) -> Option<&str> {
        self.source.id.as_deref()
    }

    /// The SVG text.
    pub fn render(&self) -> String {
        self.svg.render()
    }
}

/// Parse, trace and assemble one raw document.
pub fn convert(
    format: SourceFormat,
    raw: &[u8],
    cfg: &PipelineConfig,
) -> Result<ConvertedDocument, PipelineError> {
    check_stage_configs(cfg)?;

    let ingest_metrics = MetricsSpan::start();
    let doc = match ingest::ingest(format, raw, &cfg.ingest) {
        Ok(doc) => {
            if let Some(span) = ingest_metrics {
                span.record_ingest(Ok(()));
            }
            doc
        }
        Err(err) => {
            if let Some(span) = ingest_metrics {
                span.record_ingest(Err(err.clone()));
            }
            return Err(PipelineError::Ingest(err));
        }
    };

    convert_parsed(doc, cfg)
}

/// Trace and assemble a document that was already parsed, for example one
/// line of a newline-delimited sketch file.
pub fn convert_document(
    doc: InkDocument,
    cfg: &PipelineConfig,
) -> Result<ConvertedDocument, PipelineError> {
    check_stage_configs(cfg)?;
    convert_parsed(doc, cfg)
}

/// Convert every non-blank line of a newline-delimited sketch file. Lines
/// are independent; each item carries its zero-based line number.
pub fn convert_sketch_lines(
    raw: &str,
    cfg: &PipelineConfig,
) -> Vec<(usize, Result<ConvertedDocument, PipelineError>)> {
    if let Err(err) = check_stage_configs(cfg) {
        return vec![(0, Err(err))];
    }

    let adapter = SketchAdapter::new(cfg.ingest.clone());
    adapter
        .parse_lines(raw)
        .map(|(line, parsed)| {
            let converted = parsed
                .map_err(PipelineError::from)
                .and_then(|doc| convert_parsed(doc, cfg));
            (line, converted)
        })
        .collect()
}

/// Trace every stroke of `doc`, in stroke order.
///
/// With `parallel` set (and the `parallel` feature enabled) strokes are traced
/// on the rayon pool. Output is identical either way; on failure the lowest
/// failing stroke index is reported.
pub fn trace_document(
    doc: &InkDocument,
    options: &StrokeOptions,
    parallel: bool,
) -> Result<Vec<TracedStroke>, PipelineError> {
    let trace = |(stroke, s): (usize, &Stroke)| {
        trace_stroke(s, options).map_err(|source| PipelineError::Outline { stroke, source })
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if parallel {
            let results: Vec<_> = doc.strokes.par_iter().enumerate().map(trace).collect();
            return results.into_iter().collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    doc.strokes.iter().enumerate().map(trace).collect()
}

fn check_stage_configs(cfg: &PipelineConfig) -> Result<(), PipelineError> {
    cfg.ingest
        .validate()
        .map_err(|err| PipelineError::InvalidConfig(format!("ingest: {err}")))?;
    cfg.outline
        .validate()
        .map_err(|err| PipelineError::InvalidConfig(format!("outline: {err}")))?;
    cfg.document
        .validate()
        .map_err(|err| PipelineError::InvalidConfig(format!("document: {err}")))?;
    Ok(())
}

fn convert_parsed(
    doc: InkDocument,
    cfg: &PipelineConfig,
) -> Result<ConvertedDocument, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "pipeline.convert",
        format = %doc.format,
        doc_id = ?doc.id,
        strokes = doc.strokes.len()
    );
    let _guard = span.enter();

    let outline_metrics = MetricsSpan::start();
    let strokes = match trace_document(&doc, &cfg.outline, cfg.use_parallel) {
        Ok(strokes) => {
            if let Some(span) = outline_metrics {
                span.record_outline(Ok(()));
            }
            strokes
        }
        Err(err) => {
            if let Some(span) = outline_metrics {
                span.record_outline(Err(err.clone()));
            }
            warn!(
                stroke = ?err.stroke_index(),
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "convert_failure"
            );
            return Err(err);
        }
    };
    debug!(
        strokes = strokes.len(),
        parallel = cfg.use_parallel,
        "outline_traced"
    );

    let assemble_metrics = MetricsSpan::start();
    let label = doc.label.as_ref().map(|label| label.text.as_str());
    let svg = SvgDocument::from_traced(&strokes, label, &cfg.document);
    if let Some(span) = assemble_metrics {
        span.record_assemble();
    }

    info!(
        strokes = strokes.len(),
        view_box = ?svg.view_box().map(|vb| vb.to_string()),
        labelled = svg.label().is_some(),
        elapsed_micros = start.elapsed().as_micros(),
        "convert_success"
    );

    Ok(ConvertedDocument {
        source: doc,
        strokes,
        svg,
    })
}
