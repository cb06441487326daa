use canonical::{InkDocument, RawSample, SourceFormat, Stroke, StrokeMeta};

use crate::config::IngestConfig;
use crate::error::IngestError;

/// Parses one domain-specific ink encoding into canonical strokes.
///
/// Implementations are picked by the caller, one per [`SourceFormat`]. They
/// are pure: no I/O, and the same input and config always give the same
/// document.
pub trait InkAdapter {
    /// The format this adapter understands.
    fn format(&self) -> SourceFormat;

    /// The config this adapter resamples and validates with.
    fn config(&self) -> &IngestConfig;

    /// Parses already-decoded text.
    fn parse(&self, raw: &str) -> Result<InkDocument, IngestError>;

    /// Checks the size limit and UTF-8 validity, then delegates to [`parse`](Self::parse).
    fn parse_bytes(&self, raw: &[u8]) -> Result<InkDocument, IngestError> {
        if let Some(limit) = self.config().max_input_bytes {
            if raw.len() > limit {
                return Err(IngestError::PayloadTooLarge(format!(
                    "input size {} exceeds limit of {limit}",
                    raw.len()
                )));
            }
        }
        let text =
            std::str::from_utf8(raw).map_err(|err| IngestError::InvalidUtf8(err.to_string()))?;
        self.parse(text)
    }
}

/// Resamples a raw point list and wraps it as the stroke at `index`.
pub(crate) fn build_stroke(
    index: usize,
    raw: Vec<RawSample>,
    meta: StrokeMeta,
    cfg: &IngestConfig,
) -> Result<Stroke, IngestError> {
    Stroke::from_raw(raw, meta, &cfg.resample).map_err(|source| IngestError::Canonical {
        stroke: index,
        source,
    })
}

/// Parses a finite float, rejecting `NaN`/`inf` spellings that `f64::from_str` accepts.
pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
