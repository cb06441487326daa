//! viewBox computation.
//!
//! Two sources give the same box for pipeline output: bounds tracked while
//! path strings were written, or a scan of the numeric tokens in the strings
//! themselves. The scan relies on the serializer writing every coordinate as
//! an `x,y` pair and nothing else numeric.

use std::fmt;
use std::sync::LazyLock;

use kurbo::Rect;
use regex_lite::Regex;
use serde::Serialize;

/// Signed decimal, optionally with an exponent.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("valid regex"));

/// An SVG `viewBox`: `min-x min-y width height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Used when there is nothing to measure.
    pub const FALLBACK: ViewBox = ViewBox {
        min_x: 0.0,
        min_y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Pads `extent`, then snaps outwards to whole units.
    pub fn from_extent(extent: Rect, padding: f64) -> Self {
        let min_x = (extent.x0 - padding).floor();
        let min_y = (extent.y0 - padding).floor();
        let max_x = (extent.x1 + padding).ceil();
        let max_y = (extent.y1 + padding).ceil();
        Self {
            min_x: positive_zero(min_x),
            min_y: positive_zero(min_y),
            width: positive_zero(max_x - min_x),
            height: positive_zero(max_y - min_y),
        }
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

fn positive_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// viewBox from bounds recorded during outline generation. Empty input
/// gives [`ViewBox::FALLBACK`].
pub fn view_box_from_bounds<I>(bounds: I, padding: f64) -> ViewBox
where
    I: IntoIterator<Item = Rect>,
{
    bounds
        .into_iter()
        .reduce(|acc, r| acc.union(r))
        .map_or(ViewBox::FALLBACK, |extent| ViewBox::from_extent(extent, padding))
}

/// viewBox from the numeric tokens of path strings, even tokens as x and
/// odd tokens as y. Without at least one pair this is [`ViewBox::FALLBACK`].
pub fn view_box_from_paths<P: AsRef<str>>(paths: &[P], padding: f64) -> ViewBox {
    let mut xs = Span::default();
    let mut ys = Span::default();

    for path in paths {
        let values = NUMBER
            .find_iter(path.as_ref())
            .filter_map(|token| token.as_str().parse::<f64>().ok());
        for (i, value) in values.enumerate() {
            if i % 2 == 0 {
                xs.push(value);
            } else {
                ys.push(value);
            }
        }
    }

    match (xs.0, ys.0) {
        (Some((x0, x1)), Some((y0, y1))) => {
            ViewBox::from_extent(Rect::new(x0, y0, x1, y1), padding)
        }
        _ => ViewBox::FALLBACK,
    }
}

/// Running min/max along one axis.
#[derive(Default)]
struct Span(Option<(f64, f64)>);

impl Span {
    fn push(&mut self, v: f64) {
        self.0 = Some(match self.0 {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_with_padding() {
        let vb = view_box_from_paths(&["M0,0 Z", "M100,50 Z"], 10.0);
        assert_eq!(vb.to_string(), "-10 -10 120 70");
    }

    #[test]
    fn no_tokens_falls_back() {
        assert_eq!(view_box_from_paths::<&str>(&[], 10.0), ViewBox::FALLBACK);
        assert_eq!(view_box_from_paths(&["", "Z"], 10.0).to_string(), "0 0 100 100");
        assert_eq!(view_box_from_bounds(Vec::new(), 10.0), ViewBox::FALLBACK);
    }

    #[test]
    fn fractional_extent_snaps_outwards() {
        let vb = view_box_from_paths(&["M0.5,-0.25 L10.2,3.7"], 1.0);
        assert_eq!(vb.min_x, -1.0);
        assert_eq!(vb.min_y, -2.0);
        assert_eq!(vb.width, 13.0);
        assert_eq!(vb.height, 7.0);
    }

    #[test]
    fn scan_handles_exponents_and_negatives() {
        let vb = view_box_from_paths(&["M-5,1e1 L2.5E0,-3"], 0.0);
        assert_eq!(vb.to_string(), "-5 -3 8 13");
    }

    #[test]
    fn bounds_match_scan() {
        let paths = ["M1.5,2 Q4,2 4,3.25 T2,5 1.5,2 Z"];
        let scanned = view_box_from_paths(&paths, 10.0);
        let tracked = view_box_from_bounds([Rect::new(1.5, 2.0, 4.0, 5.0)], 10.0);
        assert_eq!(scanned, tracked);
    }

    #[test]
    fn bounds_are_unioned() {
        let vb = view_box_from_bounds(
            [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, -20.0, 60.0, 5.0)],
            0.0,
        );
        assert_eq!(vb.to_string(), "0 -20 60 30");
    }

    #[test]
    fn zero_padding_on_origin_is_not_negative_zero() {
        let vb = view_box_from_bounds([Rect::new(-0.0, -0.0, 1.0, 1.0)], 0.0);
        assert_eq!(vb.to_string(), "0 0 1 1");
    }
}
