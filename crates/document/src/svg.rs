//! SVG text assembly.

use std::fmt::{self, Write as _};

use outline::TracedStroke;

use crate::config::{DocumentConfig, SvgStyle, ViewBoxSource};
use crate::view_box::{view_box_from_bounds, view_box_from_paths, ViewBox};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

const ROOT_OPEN: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"";
const ROOT_CLOSE: &str = "</svg>";

/// An SVG document under construction: stroke paths, a shared style, and
/// optionally a viewBox and a trailing label.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    paths: Vec<String>,
    style: SvgStyle,
    view_box: Option<ViewBox>,
    label: Option<String>,
}

impl SvgDocument {
    pub fn new<I, P>(paths: I, style: SvgStyle) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            style,
            view_box: None,
            label: None,
        }
    }

    /// Lays out traced strokes according to `cfg`: style, viewBox source,
    /// padding and whether the label is kept.
    pub fn from_traced(
        strokes: &[TracedStroke],
        label: Option<&str>,
        cfg: &DocumentConfig,
    ) -> Self {
        let doc = Self::new(
            strokes.iter().map(|s| s.path.as_str().to_owned()),
            cfg.style.clone(),
        );
        let doc = match cfg.view_box {
            ViewBoxSource::Tracked => doc.with_view_box(view_box_from_bounds(
                strokes.iter().filter_map(|s| s.bounds),
                cfg.padding,
            )),
            ViewBoxSource::PathScan => doc.with_scanned_view_box(cfg.padding),
        };

        match label {
            Some(text) if cfg.include_label => doc.with_label(text),
            _ => doc,
        }
    }

    pub fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = Some(view_box);
        self
    }

    /// Computes the viewBox by scanning the path strings.
    pub fn with_scanned_view_box(self, padding: f64) -> Self {
        let view_box = view_box_from_paths(self.paths.as_slice(), padding);
        self.with_view_box(view_box)
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn style(&self) -> &SvgStyle {
        &self.style
    }

    pub fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_OPEN)?;
        if let Some(vb) = &self.view_box {
            write_view_box_attrs(f, vb)?;
        }
        f.write_str(">\n")?;

        let stroke = escape_attr(&self.style.stroke);
        let fill = escape_attr(&self.style.fill);
        for path in &self.paths {
            writeln!(
                f,
                "<path d=\"{}\" stroke=\"{stroke}\" fill=\"{fill}\"/>",
                escape_attr(path)
            )?;
        }

        if let Some(label) = &self.label {
            writeln!(f, "<label>{}</label>", escape_text(label))?;
        }
        f.write_str(ROOT_CLOSE)
    }
}

fn write_view_box_attrs<W: fmt::Write>(w: &mut W, vb: &ViewBox) -> fmt::Result {
    write!(
        w,
        " width=\"100%\" height=\"100%\" viewBox=\"{vb}\" style=\"background-color: white;\""
    )
}

/// Renders `paths` into a bare SVG document, one `<path>` per stroke.
pub fn assemble<P: AsRef<str>>(paths: &[P], style: &SvgStyle) -> String {
    SvgDocument::new(paths.iter().map(|p| p.as_ref().to_owned()), style.clone()).render()
}

/// Adds sizing and a viewBox computed from `paths` to the root element of
/// `document`. Text without an SVG root is returned unchanged.
pub fn with_view_box<P: AsRef<str>>(document: &str, paths: &[P], padding: f64) -> String {
    let Some(insert_at) = document
        .find(ROOT_OPEN)
        .map(|start| start + ROOT_OPEN.len())
    else {
        return document.to_string();
    };
    let view_box = view_box_from_paths(paths, padding);

    let mut out = String::with_capacity(document.len() + 96);
    out.push_str(&document[..insert_at]);
    // Writing to a String cannot fail.
    let _ = write_view_box_attrs(&mut out, &view_box);
    out.push_str(&document[insert_at..]);
    out
}

/// Appends a `<label>` element just before the closing root tag. The text is
/// escaped but otherwise passed through untouched.
pub fn append_label(document: &str, text: &str) -> String {
    let Some(close) = document.rfind(ROOT_CLOSE) else {
        return document.to_string();
    };

    let mut out = String::with_capacity(document.len() + text.len() + 16);
    out.push_str(&document[..close]);
    let _ = writeln!(out, "<label>{}</label>", escape_text(text));
    out.push_str(&document[close..]);
    out
}

pub fn escape_text(text: &str) -> String {
    escape(text, false)
}

pub fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use outline::{trace_points, StrokeOptions};

    const EMPTY: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n</svg>";

    #[test]
    fn assemble_empty() {
        assert_eq!(assemble::<&str>(&[], &SvgStyle::default()), EMPTY);
    }

    #[test]
    fn assemble_paths_in_order() {
        let svg = assemble(&["M0,0 L1,1", "M2,2 L3,3"], &SvgStyle::default());
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n\
             <path d=\"M0,0 L1,1\" stroke=\"black\" fill=\"black\"/>\n\
             <path d=\"M2,2 L3,3\" stroke=\"black\" fill=\"black\"/>\n\
             </svg>"
        );
    }

    #[test]
    fn custom_style_is_escaped() {
        let style = SvgStyle {
            stroke: "#112233".into(),
            fill: "url(\"#g\")".into(),
        };
        let svg = assemble(&["M0,0 L1,1"], &style);
        assert!(svg.contains("stroke=\"#112233\" fill=\"url(&quot;#g&quot;)\""));
    }

    #[test]
    fn view_box_is_added_to_root() {
        let paths = ["M0,0 Z", "M100,50 Z"];
        let svg = with_view_box(&assemble(&paths, &SvgStyle::default()), &paths, 10.0);
        assert!(svg.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"100%\" \
             viewBox=\"-10 -10 120 70\" style=\"background-color: white;\">\n"
        ));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn view_box_without_tokens_uses_fallback() {
        let svg = with_view_box(EMPTY, &[""], 10.0);
        assert!(svg.contains("viewBox=\"0 0 100 100\""));
    }

    #[test]
    fn non_svg_text_is_untouched() {
        assert_eq!(with_view_box("<html/>", &["M0,0"], 10.0), "<html/>");
        assert_eq!(append_label("<html/>", "x"), "<html/>");
    }

    #[test]
    fn label_is_last_child_and_escaped() {
        let svg = append_label(
            &assemble(&["M0,0 L1,1"], &SvgStyle::default()),
            r"a<b & \frac{1}{2}",
        );
        assert!(svg.ends_with("<label>a&lt;b &amp; \\frac{1}{2}</label>\n</svg>"));
    }

    #[test]
    fn builder_matches_free_functions() {
        let paths = ["M0,0 Z", "M100,50 Z"];
        let built = SvgDocument::new(paths, SvgStyle::default())
            .with_scanned_view_box(10.0)
            .with_label("cat")
            .render();
        let composed = append_label(
            &with_view_box(&assemble(&paths, &SvgStyle::default()), &paths, 10.0),
            "cat",
        );
        assert_eq!(built, composed);
    }

    #[test]
    fn from_traced_uses_tracked_bounds_by_default() {
        let opts = StrokeOptions::default();
        let strokes = vec![
            trace_points(&[Point::new(0.0, 0.0), Point::new(60.0, 20.0)], &opts).expect("trace"),
            trace_points(&[Point::new(100.0, 50.0)], &opts).expect("trace"),
        ];

        let tracked = SvgDocument::from_traced(&strokes, Some("hi"), &DocumentConfig::default());
        let scanned = SvgDocument::from_traced(
            &strokes,
            Some("hi"),
            &DocumentConfig {
                view_box: ViewBoxSource::PathScan,
                ..Default::default()
            },
        );

        assert_eq!(tracked.paths().len(), 2);
        assert_eq!(tracked.label(), Some("hi"));
        assert_eq!(tracked.view_box(), scanned.view_box());
        assert_eq!(tracked.render(), scanned.render());
    }

    #[test]
    fn label_can_be_suppressed() {
        let cfg = DocumentConfig {
            include_label: false,
            ..Default::default()
        };
        let doc = SvgDocument::from_traced(&[], Some("hidden"), &cfg);
        assert_eq!(doc.label(), None);
        assert_eq!(doc.view_box(), Some(ViewBox::FALLBACK));
    }
}
