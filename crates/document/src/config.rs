//! Configuration for SVG document assembly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Padding added around the content bounds when computing a viewBox.
pub const DEFAULT_PADDING: f64 = 10.0;

/// Presentation attributes written on every `<path>` element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SvgStyle {
    pub stroke: String,
    pub fill: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            stroke: "black".into(),
            fill: "black".into(),
        }
    }
}

/// Where viewBox bounds come from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewBoxSource {
    /// Bounds recorded while the path strings were written.
    #[default]
    Tracked,
    /// Bounds recovered by scanning numeric tokens in the path strings.
    PathScan,
}

/// Document assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocumentConfig {
    pub style: SvgStyle,
    pub padding: f64,
    pub view_box: ViewBoxSource,
    /// Emit a trailing `<label>` element when the source carried one.
    pub include_label: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            style: SvgStyle::default(),
            padding: DEFAULT_PADDING,
            view_box: ViewBoxSource::Tracked,
            include_label: true,
        }
    }
}

impl DocumentConfig {
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(DocumentError::InvalidConfig(format!(
                "padding must be finite and >= 0 (got {})",
                self.padding
            )));
        }
        if self.style.stroke.trim().is_empty() || self.style.fill.trim().is_empty() {
            return Err(DocumentError::InvalidConfig(
                "style stroke and fill must be non-empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    #[error("invalid document config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = DocumentConfig::default();
        assert_eq!(cfg.style.stroke, "black");
        assert_eq!(cfg.style.fill, "black");
        assert_eq!(cfg.padding, 10.0);
        assert_eq!(cfg.view_box, ViewBoxSource::Tracked);
        assert!(cfg.include_label);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_negative_padding() {
        let cfg = DocumentConfig {
            padding: -1.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(DocumentError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_blank_style() {
        let cfg = DocumentConfig {
            style: SvgStyle {
                stroke: " ".into(),
                fill: "none".into(),
            },
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: DocumentConfig =
            serde_json::from_str(r#"{ "view_box": "path_scan", "style": { "fill": "none" } }"#)
                .expect("deserialize");
        assert_eq!(cfg.view_box, ViewBoxSource::PathScan);
        assert_eq!(cfg.style.stroke, "black");
        assert_eq!(cfg.style.fill, "none");
        assert_eq!(cfg.padding, DEFAULT_PADDING);
    }
}
