//! Configuration for the temporal resampler.
//!
//! [`ResampleConfig`] carries the time quantum used to densify strokes. Every
//! format adapter hands the same config to [`resample`](crate::resample), so
//! InkML, whiteboard and sketch strokes end up with the same temporal density.
//!
//! # Examples
//!
//! ```rust
//! use canonical::ResampleConfig;
//!
//! let config = ResampleConfig::default();
//! assert_eq!(config.quantum, 10.0);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ```rust
//! use canonical::ResampleConfig;
//!
//! // Coarser densification for very long recordings.
//! let config = ResampleConfig {
//!     quantum: 40.0,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let broken = ResampleConfig {
//!     quantum: 0.0,
//!     ..Default::default()
//! };
//! assert!(broken.validate().is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Default maximum time gap, in the shared time unit of all adapters.
pub const DEFAULT_QUANTUM: f64 = 10.0;

/// Default upper bound on the samples one resampled stroke may hold.
pub const DEFAULT_MAX_SAMPLES: usize = 100_000;

/// Configuration for the temporal resampler.
///
/// # Serialization
///
/// ```json
/// { "quantum": 10.0, "max_samples": 100000 }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResampleConfig {
    /// Target time spacing between consecutive samples.
    ///
    /// For a pair of samples `dt` apart, `dt / quantum - 1` is the step count;
    /// pairs with fewer than one step are left untouched.
    ///
    /// Must be finite and strictly positive.
    pub quantum: f64,

    /// Largest sample count a stroke may reach after densification.
    ///
    /// The interior count grows with the time gap, so a single distant
    /// timestamp could otherwise expand a tiny input without bound.
    pub max_samples: usize,
}

impl ResampleConfig {
    /// Checks that the quantum and the sample cap are usable.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if !self.quantum.is_finite() || self.quantum <= 0.0 {
            return Err(CanonicalError::InvalidConfig(format!(
                "resample quantum must be finite and > 0, got {}",
                self.quantum
            )));
        }
        if self.max_samples == 0 {
            return Err(CanonicalError::InvalidConfig("resample max_samples must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}
