//! # Ink Outline Generation
//!
//! This crate turns a stroke centerline into a filled, pressure-aware outline
//! and serializes it as SVG path data.
//!
//! ## Contract
//!
//! - The outline layer **only** consumes canonical strokes (or bare points).
//!   It never parses source formats or resamples.
//! - Every stage is a pure function of `(input, options)`: no I/O, no
//!   clocks, no global state. The same stroke and [`StrokeOptions`] always
//!   give the same path string.
//!
//! ## Core Pipeline
//!
//! 1.  **Stroke points** ([`compute_stroke_points`]): input positions are
//!     streamlined, near-duplicate samples at the ends are dropped, and every
//!     accepted point gets its distance, running length and a unit vector
//!     pointing back along the line.
//!
//! 2.  **Radii** ([`assign_radii`]): pressure is simulated from speed (or
//!     smoothed when recorded), turned into a radius through `size`,
//!     `thinning` and `easing`, then scaled down by any start/end taper. The
//!     result is a new sequence of [`RadiusPoint`]s.
//!
//! 3.  **Outline** ([`compute_outline`]): left and right offset tracks,
//!     rotated half-discs at sharp reversals, round or flat caps, and a dot
//!     for single points, joined into one closed [`OutlinePath`].
//!
//! 4.  **Path data** ([`polygon_to_path`]): the polygon is written as a
//!     closed quadratic path through vertex midpoints.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::{RawSample, Stroke, StrokeMeta};
//! use outline::{trace_to_path, StrokeOptions};
//!
//! let stroke = Stroke::new(vec![RawSample::new(5.0, 5.0, 0.0)], StrokeMeta::default()).unwrap();
//! let path = trace_to_path(&stroke, &StrokeOptions::default()).unwrap();
//!
//! assert!(path.as_str().starts_with('M'));
//! assert!(path.as_str().ends_with('Z'));
//! ```
//!
use canonical::Stroke;
use kurbo::{Point, Rect};

pub mod config;
mod geom;
mod path;
mod points;
mod polygon;
mod radius;

pub use crate::config::{Easing, OutlineError, StrokeOptions, Taper, TaperOptions};
pub use crate::path::{polygon_to_path, PathData};
pub use crate::points::{compute_stroke_points, StrokePoint, INPUT_PRESSURE};
pub use crate::polygon::{compute_outline, OutlinePath};
pub use crate::radius::{assign_radii, stroke_radius, RadiusPoint, RATE_OF_PRESSURE_CHANGE};

/// A serialized stroke outline.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedStroke {
    pub path: PathData,
    /// Bounds of the coordinates written into `path`; `None` when the path
    /// is empty.
    pub bounds: Option<Rect>,
}

/// Run all four stages over bare centerline points.
pub fn trace_points(
    points: &[Point],
    options: &StrokeOptions,
) -> Result<TracedStroke, OutlineError> {
    options.validate()?;
    if points.is_empty() {
        return Err(OutlineError::InsufficientPoints);
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(OutlineError::NonFiniteSample { index });
    }

    let stroke_points = compute_stroke_points(points, options);
    let radii = assign_radii(&stroke_points, options);
    let outline = compute_outline(&radii, options);
    let (path, bounds) = path::serialize_polygon(outline.points());

    Ok(TracedStroke { path, bounds })
}

/// Trace a canonical stroke, returning the path and its bounds.
pub fn trace_stroke(
    stroke: &Stroke,
    options: &StrokeOptions,
) -> Result<TracedStroke, OutlineError> {
    let points: Vec<Point> = stroke
        .samples()
        .iter()
        .map(|s| Point::new(s.x, s.y))
        .collect();
    trace_points(&points, options)
}

/// Trace a canonical stroke into SVG path data.
pub fn trace_to_path(stroke: &Stroke, options: &StrokeOptions) -> Result<PathData, OutlineError> {
    trace_stroke(stroke, options).map(|traced| traced.path)
}
