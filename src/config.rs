//! YAML Configuration File Support for inkpath
//!
//! Loads the whole pipeline configuration (ingest, outline, document) from a
//! single YAML file. Every section is optional and falls back to its
//! defaults, so a file only needs the keys it changes.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # inkpath pipeline configuration
//! version: "1.0"
//! name: "crohme-render"
//! use_parallel: true
//!
//! ingest:
//!   resample:
//!     quantum: 10.0
//!     max_samples: 100000
//!   whiteboard_time_scale: 1000.0
//!   max_input_bytes: 10485760
//!
//! outline:
//!   size: 16.0
//!   thinning: 0.5
//!   smoothing: 0.5
//!   streamline: 0.5
//!   easing: linear
//!   simulate_pressure: true
//!   last: false
//!   start:
//!     cap: true
//!     taper: off
//!   end:
//!     cap: true
//!     taper: auto
//!
//! document:
//!   padding: 10.0
//!   view_box: tracked
//!   include_label: true
//!   style:
//!     stroke: black
//!     fill: black
//! ```

use std::fs;
use std::path::Path;

use document::DocumentConfig;
use ingest::IngestConfig;
use outline::StrokeOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for the whole conversion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub ingest: IngestConfig,

    /// Outline options applied to every stroke.
    #[serde(default)]
    pub outline: StrokeOptions,

    #[serde(default)]
    pub document: DocumentConfig,

    /// Trace the strokes of one document on the rayon pool.
    #[serde(default)]
    pub use_parallel: bool,
}

impl PipelineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ingest
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("ingest: {err}")))?;
        self.outline
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("outline: {err}")))?;
        self.document
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("document: {err}")))?;
        Ok(())
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            ingest: IngestConfig::default(),
            outline: StrokeOptions::default(),
            document: DocumentConfig::default(),
            use_parallel: false,
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
