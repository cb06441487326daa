//! Canonical ink layer.
//!
//! Every source format ends up here: a [`Stroke`] is an ordered, non-empty run
//! of [`RawSample`]s `(x, y, t)`, and an [`InkDocument`] is a list of strokes
//! plus whatever metadata the source carried.
//!
//! ## What we do
//!
//! - Define the shared sample/stroke/document shapes
//! - Temporally densify strokes with [`resample`] so sparse recordings render
//!   smoothly downstream
//! - Carry source labels through untouched
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls. Same samples and quantum in, same stroke out.
//!
//! ## Invariants worth knowing
//!
//! - A stroke is never empty; construction fails with
//!   [`CanonicalError::EmptyStroke`]
//! - Resampling keeps the first and last sample bit-for-bit
//! - Resampling never drops a sample

mod config;
mod document;
mod error;
mod resample;

pub use crate::config::{ResampleConfig, DEFAULT_MAX_SAMPLES, DEFAULT_QUANTUM};
pub use crate::document::{
    InkDocument, Label, LabelKind, RawSample, SourceFormat, Stroke, StrokeMeta,
};
pub use crate::error::CanonicalError;
pub use crate::resample::{resample, resample_with_config};
