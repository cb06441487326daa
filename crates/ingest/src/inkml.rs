//! InkML adapter.
//!
//! Accepts the subset of InkML used by handwritten-math corpora:
//!
//! ```xml
//! <ink xmlns="http://www.w3.org/2003/InkML">
//!   <annotation type="sampleId">0a1b2c</annotation>
//!   <annotation type="normalizedLabel">x^{2}</annotation>
//!   <trace>0 0 0, 10 0 20, 20 0 40</trace>
//! </ink>
//! ```
//!
//! Each `trace` becomes one stroke; its text is a comma-separated list of
//! whitespace-separated `x y t` triples. Namespaces are ignored, elements are
//! matched by local name.

use canonical::{InkDocument, Label, LabelKind, RawSample, SourceFormat, StrokeMeta};
use roxmltree::{Document, Node};

use crate::adapter::{build_stroke, parse_finite, InkAdapter};
use crate::config::IngestConfig;
use crate::error::IngestError;

/// Adapter for InkML `ink`/`trace` documents.
#[derive(Debug, Clone, Default)]
pub struct InkmlAdapter {
    cfg: IngestConfig,
}

impl InkmlAdapter {
    pub fn new(cfg: IngestConfig) -> Self {
        Self { cfg }
    }
}

impl InkAdapter for InkmlAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Inkml
    }

    fn config(&self) -> &IngestConfig {
        &self.cfg
    }

    fn parse(&self, raw: &str) -> Result<InkDocument, IngestError> {
        let xml = Document::parse(raw).map_err(|err| IngestError::Xml(err.to_string()))?;
        let root = xml.root_element();
        if root.tag_name().name() != "ink" {
            return Err(IngestError::missing(None, "ink"));
        }

        let strokes = root
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == "trace")
            .enumerate()
            .map(|(idx, trace)| {
                let samples = parse_trace(idx, trace.text().unwrap_or_default())?;
                build_stroke(idx, samples, StrokeMeta::default(), &self.cfg)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc = InkDocument::new(SourceFormat::Inkml, strokes);
        doc.id = annotation(root, "sampleId");
        doc.label = annotation(root, "normalizedLabel")
            .or_else(|| annotation(root, "label"))
            .map(|text| Label::new(LabelKind::Latex, text));
        Ok(doc)
    }
}

/// Parses `"x y t, x y t, ..."` into samples. Blank segments (e.g. a trailing
/// comma) are skipped; anything else must be exactly three finite numbers.
pub fn parse_trace(trace: usize, text: &str) -> Result<Vec<RawSample>, IngestError> {
    let mut samples = Vec::new();
    for (pos, segment) in text.split(',').enumerate() {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let mut values = [0.0_f64; 3];
        let mut count = 0usize;
        for part in segment.split_whitespace() {
            if count == 3 {
                return Err(malformed(trace, pos, segment, "more than three values"));
            }
            values[count] = parse_finite(part)
                .ok_or_else(|| malformed(trace, pos, segment, "not a finite number"))?;
            count += 1;
        }
        if count != 3 {
            return Err(malformed(trace, pos, segment, "fewer than three values"));
        }

        samples.push(RawSample::new(values[0], values[1], values[2]));
    }
    Ok(samples)
}

fn malformed(trace: usize, pos: usize, segment: &str, why: &str) -> IngestError {
    IngestError::MalformedTrace {
        trace,
        reason: format!("sample {pos} {segment:?}: {why}"),
    }
}

/// Text of the first direct `annotation` child with the given `type`.
fn annotation(root: Node<'_, '_>, kind: &str) -> Option<String> {
    root.children()
        .filter(|node| node.is_element() && node.tag_name().name() == "annotation")
        .find(|node| node.attribute("type") == Some(kind))
        .and_then(|node| node.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::CanonicalError;

    fn parse(raw: &str) -> Result<InkDocument, IngestError> {
        InkmlAdapter::default().parse(raw)
    }

    #[test]
    fn single_trace_without_gaps() {
        let doc = parse(r#"<ink><trace>0 0 0,10 0 20,20 0 40</trace></ink>"#).expect("parse");

        assert_eq!(doc.format, SourceFormat::Inkml);
        assert_eq!(doc.strokes.len(), 1);
        let stroke = &doc.strokes[0];
        assert_eq!(stroke.len(), 3);
        assert_eq!((stroke.first().x, stroke.first().y), (0.0, 0.0));
        assert_eq!((stroke.last().x, stroke.last().y), (20.0, 0.0));
    }

    #[test]
    fn namespaced_document_with_annotations() {
        let raw = r#"<?xml version="1.0" encoding="UTF-8"?>
<ink xmlns="http://www.w3.org/2003/InkML">
  <annotation type="sampleId">abc123</annotation>
  <annotation type="label">x^2</annotation>
  <annotation type="normalizedLabel">x^{2}</annotation>
  <trace>1 1 0, 2 2 5</trace>
  <trace>5 5 100, 6 6 200,</trace>
</ink>"#;
        let doc = parse(raw).expect("parse");

        assert_eq!(doc.id.as_deref(), Some("abc123"));
        assert_eq!(doc.label, Some(Label::new(LabelKind::Latex, "x^{2}")));
        assert_eq!(doc.strokes.len(), 2);
        assert_eq!(doc.strokes[0].len(), 2);
        // dt = 100 with quantum 10 gives steps = 9: eight interior samples.
        assert_eq!(doc.strokes[1].len(), 10);
    }

    #[test]
    fn plain_label_used_when_normalized_missing() {
        let raw = r#"<ink><annotation type="label">\frac{a}{b}</annotation><trace>0 0 0</trace></ink>"#;
        let doc = parse(raw).expect("parse");
        assert_eq!(doc.label, Some(Label::new(LabelKind::Latex, r"\frac{a}{b}")));
    }

    #[test]
    fn zero_traces_is_an_empty_document() {
        let doc = parse("<ink/>").expect("parse");
        assert!(doc.strokes.is_empty());
        assert!(doc.label.is_none());
    }

    #[test]
    fn malformed_triple_names_trace() {
        let err = parse(r#"<ink><trace>0 0 0</trace><trace>1 2 3, 4 five 6</trace></ink>"#)
            .expect_err("malformed");
        assert!(matches!(err, IngestError::MalformedTrace { trace: 1, .. }));
    }

    #[test]
    fn pair_without_time_is_malformed() {
        let err = parse(r#"<ink><trace>1 2, 3 4</trace></ink>"#).expect_err("malformed");
        assert!(matches!(err, IngestError::MalformedTrace { trace: 0, .. }));
    }

    #[test]
    fn extra_value_is_malformed() {
        let err = parse_trace(2, "1 2 3 4").expect_err("malformed");
        assert!(matches!(err, IngestError::MalformedTrace { trace: 2, .. }));
    }

    #[test]
    fn empty_trace_fails_as_empty_stroke() {
        let err = parse(r#"<ink><trace>0 0 0</trace><trace>  </trace></ink>"#).expect_err("empty");
        assert_eq!(
            err,
            IngestError::Canonical {
                stroke: 1,
                source: CanonicalError::EmptyStroke,
            }
        );
    }

    #[test]
    fn wrong_root_is_missing_ink() {
        let err = parse("<svg/>").expect_err("wrong root");
        assert_eq!(err, IngestError::missing(None, "ink"));
    }

    #[test]
    fn broken_xml_is_reported() {
        assert!(matches!(parse("<ink><trace>"), Err(IngestError::Xml(_))));
    }
}
