//! Whiteboard capture XML adapter.
//!
//! ```xml
//! <WhiteboardCaptureSession>
//!   <StrokeSet>
//!     <Stroke colour="black" start_time="769.05" end_time="769.64">
//!       <Point x="1073" y="1058" time="769.05"/>
//!       <Point x="1074" y="1061" time="769.06"/>
//!     </Stroke>
//!   </StrokeSet>
//!   <Transcription>
//!     <TextLine text="hello world"/>
//!   </Transcription>
//! </WhiteboardCaptureSession>
//! ```
//!
//! Point times are recorded in seconds and scaled by
//! [`IngestConfig::whiteboard_time_scale`] before resampling. Stroke
//! `start_time`/`end_time` metadata is kept in source units.

use canonical::{InkDocument, Label, LabelKind, RawSample, SourceFormat, StrokeMeta};
use roxmltree::{Document, Node};

use crate::adapter::{build_stroke, parse_finite, InkAdapter};
use crate::config::IngestConfig;
use crate::error::IngestError;

/// Adapter for whiteboard capture session XML.
#[derive(Debug, Clone, Default)]
pub struct WhiteboardAdapter {
    cfg: IngestConfig,
}

impl WhiteboardAdapter {
    pub fn new(cfg: IngestConfig) -> Self {
        Self { cfg }
    }
}

impl InkAdapter for WhiteboardAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Whiteboard
    }

    fn config(&self) -> &IngestConfig {
        &self.cfg
    }

    fn parse(&self, raw: &str) -> Result<InkDocument, IngestError> {
        let xml = Document::parse(raw).map_err(|err| IngestError::Xml(err.to_string()))?;
        let root = xml.root_element();

        let stroke_set = child_element(root, "StrokeSet")
            .ok_or_else(|| IngestError::missing(None, "StrokeSet"))?;

        let strokes = stroke_set
            .children()
            .filter(|node| is_named(node, "Stroke"))
            .enumerate()
            .map(|(idx, stroke)| {
                let meta = stroke_meta(idx, stroke)?;
                let samples = stroke
                    .children()
                    .filter(|node| is_named(node, "Point"))
                    .map(|point| self.parse_point(idx, point))
                    .collect::<Result<Vec<_>, _>>()?;
                build_stroke(idx, samples, meta, &self.cfg)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc = InkDocument::new(SourceFormat::Whiteboard, strokes);
        doc.label = transcription(root).map(|text| Label::new(LabelKind::Transcription, text));
        Ok(doc)
    }
}

impl WhiteboardAdapter {
    fn parse_point(&self, stroke: usize, point: Node<'_, '_>) -> Result<RawSample, IngestError> {
        let x = required_number(stroke, point, "x")?;
        let y = required_number(stroke, point, "y")?;
        let time = required_number(stroke, point, "time")?;
        Ok(RawSample::new(x, y, time * self.cfg.whiteboard_time_scale))
    }
}

fn is_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_named(child, name))
}

fn required_number(stroke: usize, node: Node<'_, '_>, attr: &str) -> Result<f64, IngestError> {
    let value = node
        .attribute(attr)
        .ok_or_else(|| IngestError::missing(Some(stroke), attr))?;
    parse_finite(value).ok_or_else(|| IngestError::InvalidNumber {
        stroke: Some(stroke),
        field: attr.to_string(),
        value: value.to_string(),
    })
}

fn optional_number(
    stroke: usize,
    node: Node<'_, '_>,
    attr: &str,
) -> Result<Option<f64>, IngestError> {
    match node.attribute(attr) {
        Some(_) => required_number(stroke, node, attr).map(Some),
        None => Ok(None),
    }
}

fn stroke_meta(idx: usize, stroke: Node<'_, '_>) -> Result<StrokeMeta, IngestError> {
    Ok(StrokeMeta {
        colour: stroke.attribute("colour").map(str::to_string),
        start_time: optional_number(idx, stroke, "start_time")?,
        end_time: optional_number(idx, stroke, "end_time")?,
    })
}

/// `TextLine@text` lines joined by newlines, falling back to the `Text` element.
fn transcription(root: Node<'_, '_>) -> Option<String> {
    let section = child_element(root, "Transcription")?;

    let lines: Vec<&str> = section
        .children()
        .filter(|node| is_named(node, "TextLine"))
        .filter_map(|line| line.attribute("text"))
        .collect();
    if !lines.is_empty() {
        return Some(lines.join("\n"));
    }

    child_element(section, "Text")
        .and_then(|node| node.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
