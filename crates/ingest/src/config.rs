//! Configuration types for the ingest adapters.
//!
//! [`IngestConfig`] is shared by all three adapters. It carries the resampling
//! quantum (so every format densifies identically), the whiteboard time scale,
//! and an optional input size limit. It is cheap to clone and serializable from
//! JSON, TOML or YAML.
//!
//! # Quick Start
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! config.validate().expect("default config is valid");
//! assert_eq!(config.whiteboard_time_scale, 1000.0);
//! ```
//!
//! # Custom Configuration
//!
//! ```rust
//! use canonical::ResampleConfig;
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig {
//!     resample: ResampleConfig {
//!         quantum: 5.0,
//!         max_samples: 50_000,
//!     },
//!     whiteboard_time_scale: 1.0,       // timestamps already in milliseconds
//!     max_input_bytes: Some(8 * 1024 * 1024),
//! };
//! assert!(config.validate().is_ok());
//! ```
use canonical::ResampleConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whiteboard captures record seconds; the other formats use milliseconds.
pub const DEFAULT_WHITEBOARD_TIME_SCALE: f64 = 1000.0;

/// Runtime configuration for ingest behavior.
///
/// # Serialization
///
/// ```json
/// {
///   "resample": { "quantum": 10.0, "max_samples": 100000 },
///   "whiteboard_time_scale": 1000.0,
///   "max_input_bytes": 10485760
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Temporal densification applied to every stroke of every format.
    pub resample: ResampleConfig,

    /// Multiplier applied to whiteboard `time` attributes before resampling.
    pub whiteboard_time_scale: f64,

    /// Reject inputs larger than this many bytes before parsing.
    pub max_input_bytes: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            resample: ResampleConfig::default(),
            whiteboard_time_scale: DEFAULT_WHITEBOARD_TIME_SCALE,
            max_input_bytes: None,
        }
    }
}

/// Errors surfaced by [`IngestConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid resample config: {0}")]
    Resample(String),
    #[error("whiteboard_time_scale must be finite and > 0, got {0}")]
    TimeScale(f64),
    #[error("max_input_bytes must be > 0 when set")]
    ZeroInputLimit,
}

impl IngestConfig {
    /// Validates the configuration, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resample
            .validate()
            .map_err(|err| ConfigError::Resample(err.to_string()))?;

        if !self.whiteboard_time_scale.is_finite() || self.whiteboard_time_scale <= 0.0 {
            return Err(ConfigError::TimeScale(self.whiteboard_time_scale));
        }

        if self.max_input_bytes == Some(0) {
            return Err(ConfigError::ZeroInputLimit);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(IngestConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_quantum() {
        let cfg = IngestConfig {
            resample: ResampleConfig {
                quantum: -2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Resample(_))));
    }

    #[test]
    fn rejects_bad_time_scale() {
        let cfg = IngestConfig {
            whiteboard_time_scale: 0.0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::TimeScale(0.0)));
    }

    #[test]
    fn rejects_zero_limit() {
        let cfg = IngestConfig {
            max_input_bytes: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroInputLimit));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: IngestConfig =
            serde_json::from_str(r#"{ "whiteboard_time_scale": 1.0 }"#).expect("deserialize");
        assert_eq!(cfg.whiteboard_time_scale, 1.0);
        assert_eq!(cfg.resample, ResampleConfig::default());
        assert_eq!(cfg.max_input_bytes, None);
    }
}
