//! Stroke options and error types for outline generation.
//!
//! [`StrokeOptions`] is the whole configuration surface of the outline
//! pipeline. It is `Copy`, passed by reference to every stage and never
//! mutated, so tracing a stroke is a pure function of `(points, options)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Easing curve applied to pressure or taper progress, mapping `[0, 1]` onto
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        use std::f64::consts::PI;

        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// How far from a stroke end the radius narrows towards zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Taper {
    /// No taper; the end is capped.
    #[default]
    Off,
    /// Taper over the whole stroke, or `size` if the stroke is shorter.
    Auto,
    /// Taper over a fixed running length.
    Length(f64),
}

impl Taper {
    /// Taper distance for a stroke of `total_length`; zero means untapered.
    pub fn length(self, size: f64, total_length: f64) -> f64 {
        match self {
            Taper::Off => 0.0,
            Taper::Auto => size.max(total_length),
            Taper::Length(len) => len,
        }
    }
}

/// Shape of one stroke end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaperOptions {
    /// Round cap when `true`, flat cap when `false`. Ignored when tapered.
    pub cap: bool,
    pub taper: Taper,
    /// Taper easing. `None` uses ease-out-quad at the start and
    /// ease-out-cubic at the end.
    pub easing: Option<Easing>,
}

impl TaperOptions {
    pub const fn capped() -> Self {
        Self {
            cap: true,
            taper: Taper::Off,
            easing: None,
        }
    }

    pub(crate) fn easing_or(&self, fallback: Easing) -> Easing {
        self.easing.unwrap_or(fallback)
    }
}

impl Default for TaperOptions {
    fn default() -> Self {
        Self::capped()
    }
}

/// Options for turning a centerline into an outline polygon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StrokeOptions {
    /// Base diameter of the stroke.
    pub size: f64,
    /// How much pressure narrows the stroke, in `[-1, 1]`. Zero gives a
    /// constant width of `size`.
    pub thinning: f64,
    /// Minimum spacing between outline vertices, as a fraction of `size`.
    pub smoothing: f64,
    /// How strongly input points are pulled towards the previous point, in
    /// `[0, 1]`.
    pub streamline: f64,
    /// Easing applied to pressure before it becomes a radius.
    pub easing: Easing,
    /// Derive pressure from drawing speed instead of recorded pressure.
    pub simulate_pressure: bool,
    /// The input is complete; the final point is used verbatim.
    pub last: bool,
    pub start: TaperOptions,
    pub end: TaperOptions,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            easing: Easing::Linear,
            simulate_pressure: true,
            last: false,
            start: TaperOptions::capped(),
            end: TaperOptions::capped(),
        }
    }
}

impl StrokeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_thinning(mut self, thinning: f64) -> Self {
        self.thinning = thinning;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_streamline(mut self, streamline: f64) -> Self {
        self.streamline = streamline;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_simulated_pressure(mut self, simulate: bool) -> Self {
        self.simulate_pressure = simulate;
        self
    }

    pub fn with_last(mut self, last: bool) -> Self {
        self.last = last;
        self
    }

    pub fn with_start(mut self, start: TaperOptions) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: TaperOptions) -> Self {
        self.end = end;
        self
    }

    /// Validate option ranges.
    pub fn validate(&self) -> Result<(), OutlineError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(OutlineError::InvalidOptions(format!(
                "size must be finite and > 0 (got {})",
                self.size
            )));
        }
        check_range("thinning", self.thinning, -1.0, 1.0)?;
        check_range("smoothing", self.smoothing, 0.0, 1.0)?;
        check_range("streamline", self.streamline, 0.0, 1.0)?;
        check_taper("start", self.start.taper)?;
        check_taper("end", self.end.taper)?;
        Ok(())
    }
}

fn check_range(name: &str, value: f64, lo: f64, hi: f64) -> Result<(), OutlineError> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(OutlineError::InvalidOptions(format!(
            "{name} must be within [{lo}, {hi}] (got {value})"
        )))
    }
}

fn check_taper(end: &str, taper: Taper) -> Result<(), OutlineError> {
    match taper {
        Taper::Length(len) if !len.is_finite() || len < 0.0 => Err(OutlineError::InvalidOptions(
            format!("{end} taper length must be finite and >= 0 (got {len})"),
        )),
        _ => Ok(()),
    }
}

/// Errors returned by the outline pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OutlineError {
    #[error("stroke has no points to outline")]
    InsufficientPoints,

    #[error("invalid stroke options: {0}")]
    InvalidOptions(String),

    #[error("sample {index} has a non-finite coordinate")]
    NonFiniteSample { index: usize },
}
