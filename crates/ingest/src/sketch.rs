//! Array sketch adapter.
//!
//! A sketch is a JSON list of strokes, each stroke a triple of equal-length
//! arrays `[xs, ys, ts]`:
//!
//! ```json
//! [[[10, 20, 30], [5, 5, 8], [0, 16, 33]], [[40], [40], [120]]]
//! ```
//!
//! The same list may arrive wrapped in a drawing record, as in the
//! newline-delimited sketch dumps:
//!
//! ```json
//! {"word": "cat", "key_id": "5152802093400064", "recognized": true, "drawing": [...]}
//! ```
//!
//! `word` becomes a category label, `key_id` the document id, `recognized`
//! the recognition flag. Unknown record fields are ignored.

use canonical::{InkDocument, Label, LabelKind, RawSample, SourceFormat, StrokeMeta};
use serde::Deserialize;

use crate::adapter::{build_stroke, InkAdapter};
use crate::config::IngestConfig;
use crate::error::IngestError;

const AXES: [&str; 3] = ["xs", "ys", "ts"];

/// Adapter for `[xs, ys, ts]` array sketches.
#[derive(Debug, Clone, Default)]
pub struct SketchAdapter {
    cfg: IngestConfig,
}

#[derive(Deserialize)]
struct SketchRecord {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    key_id: Option<String>,
    #[serde(default)]
    recognized: Option<bool>,
    drawing: Vec<Vec<Vec<f64>>>,
}

impl SketchAdapter {
    pub fn new(cfg: IngestConfig) -> Self {
        Self { cfg }
    }

    /// Parses newline-delimited sketches, one document per non-blank line.
    ///
    /// Lines are independent: a broken line yields an error for that line
    /// only. Items carry the zero-based line number.
    pub fn parse_lines<'a>(
        &'a self,
        raw: &'a str,
    ) -> impl Iterator<Item = (usize, Result<InkDocument, IngestError>)> + 'a {
        raw.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(move |(line_no, line)| (line_no, self.parse(line)))
    }

    fn build(&self, drawing: Vec<Vec<Vec<f64>>>) -> Result<InkDocument, IngestError> {
        let strokes = drawing
            .into_iter()
            .enumerate()
            .map(|(idx, arrays)| {
                let samples = zip_axes(idx, arrays)?;
                build_stroke(idx, samples, StrokeMeta::default(), &self.cfg)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InkDocument::new(SourceFormat::Sketch, strokes))
    }
}

impl InkAdapter for SketchAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Sketch
    }

    fn config(&self) -> &IngestConfig {
        &self.cfg
    }

    fn parse(&self, raw: &str) -> Result<InkDocument, IngestError> {
        let raw = raw.trim();
        if !raw.starts_with('{') {
            return self.build(from_json(raw)?);
        }

        let record: SketchRecord = from_json(raw)?;
        let mut doc = self.build(record.drawing)?;
        doc.id = record.key_id;
        doc.recognized = record.recognized;
        doc.label = record.word.map(|word| Label::new(LabelKind::Category, word));
        Ok(doc)
    }
}

fn from_json<'a, T: Deserialize<'a>>(raw: &'a str) -> Result<T, IngestError> {
    serde_json::from_str(raw).map_err(|err| IngestError::Json(err.to_string()))
}

/// Turns `[xs, ys, ts]` into samples, checking the triple shape and lengths.
fn zip_axes(stroke: usize, arrays: Vec<Vec<f64>>) -> Result<Vec<RawSample>, IngestError> {
    if arrays.len() > AXES.len() {
        return Err(IngestError::Json(format!(
            "stroke {stroke}: expected 3 arrays, got {}",
            arrays.len()
        )));
    }
    if let Some(missing) = AXES.get(arrays.len()) {
        return Err(IngestError::missing(Some(stroke), *missing));
    }

    let (xs, ys, ts) = (&arrays[0], &arrays[1], &arrays[2]);
    if xs.len() != ys.len() || xs.len() != ts.len() {
        return Err(IngestError::LengthMismatch {
            stroke,
            xs: xs.len(),
            ys: ys.len(),
            ts: ts.len(),
        });
    }

    Ok(xs
        .iter()
        .zip(ys)
        .zip(ts)
        .map(|((&x, &y), &t)| RawSample::new(x, y, t))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::CanonicalError;

    fn parse(raw: &str) -> Result<InkDocument, IngestError> {
        SketchAdapter::default().parse(raw)
    }

    #[test]
    fn single_point_stroke() {
        let doc = parse("[[[5],[5],[0]]]").expect("parse");
        assert_eq!(doc.strokes.len(), 1);
        assert_eq!(doc.strokes[0].len(), 1);
        assert_eq!(doc.strokes[0].first().x, 5.0);
    }

    #[test]
    fn mismatched_lengths() {
        let err = parse("[[[1,2],[1],[0,10]]]").expect_err("mismatch");
        assert_eq!(
            err,
            IngestError::LengthMismatch {
                stroke: 0,
                xs: 2,
                ys: 1,
                ts: 2,
            }
        );
    }

    #[test]
    fn mismatch_in_later_stroke_is_indexed() {
        let err = parse("[[[0],[0],[0]], [[1,2],[1,2],[0]]]").expect_err("mismatch");
        assert_eq!(err.stroke_index(), Some(1));
    }

    #[test]
    fn missing_time_axis() {
        let err = parse("[[[1,2],[3,4]]]").expect_err("missing ts");
        assert_eq!(err, IngestError::missing(Some(0), "ts"));
    }

    #[test]
    fn too_many_axes() {
        assert!(matches!(
            parse("[[[1],[2],[3],[4]]]"),
            Err(IngestError::Json(_))
        ));
    }

    #[test]
    fn empty_arrays_are_an_empty_stroke() {
        let err = parse("[[[],[],[]]]").expect_err("empty");
        assert_eq!(
            err,
            IngestError::Canonical {
                stroke: 0,
                source: CanonicalError::EmptyStroke,
            }
        );
    }

    #[test]
    fn record_metadata_is_carried() {
        let raw = r#"{"word":"cat","countrycode":"US","timestamp":"2017-03-09 00:28:55.637 UTC",
            "recognized":true,"key_id":"5152802093400064",
            "drawing":[[[0,30],[0,0],[0,40]]]}"#;
        let doc = parse(raw).expect("parse");

        assert_eq!(doc.id.as_deref(), Some("5152802093400064"));
        assert_eq!(doc.recognized, Some(true));
        assert_eq!(doc.label, Some(Label::new(LabelKind::Category, "cat")));
        // dt = 40 gives steps = 3: two interior samples.
        assert_eq!(doc.strokes[0].len(), 4);
    }

    #[test]
    fn lines_are_independent() {
        let raw = concat!(
            r#"{"word":"a","drawing":[[[0],[0],[0]]]}"#,
            "\n\n",
            r#"{"word":"b","drawing":[[[0,1],[0],[0]]]}"#,
            "\n",
            r#"{"word":"c","drawing":[[[2],[2],[0]]]}"#,
            "\n",
        );
        let adapter = SketchAdapter::default();
        let results: Vec<_> = adapter.parse_lines(raw).collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, 0);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, 2);
        assert!(matches!(
            results[1].1,
            Err(IngestError::LengthMismatch { stroke: 0, .. })
        ));
        assert_eq!(results[2].0, 3);
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn record_errors_name_the_bad_value() {
        let err = parse(r#"{"drawing":[[["a"]]]}"#).expect_err("string coordinate");
        let IngestError::Json(msg) = err else {
            panic!("expected a JSON error, got {err:?}");
        };
        assert!(msg.contains("invalid type"), "{msg}");
        assert!(!msg.contains("did not match any variant"), "{msg}");
    }

    #[test]
    fn record_without_drawing_is_reported() {
        let err = parse(r#"{"word":"cat"}"#).expect_err("no drawing");
        assert!(matches!(err, IngestError::Json(msg) if msg.contains("drawing")));
    }

    #[test]
    fn bare_drawing_errors_name_the_bad_value() {
        let err = parse(r#"[[[1],["x"],[0]]]"#).expect_err("string coordinate");
        assert!(matches!(err, IngestError::Json(msg) if msg.contains("invalid type")));
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(parse("[[[1],[2]"), Err(IngestError::Json(_))));
    }
}
