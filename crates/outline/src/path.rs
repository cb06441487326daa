//! Stage 4: SVG path data.

use std::fmt::{self, Write as _};

use kurbo::{Point, Rect};
use serde::Serialize;

use crate::geom::include;
use crate::polygon::OutlinePath;

/// An SVG path-data string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct PathData(String);

impl PathData {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathData {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PathData> for String {
    fn from(path: PathData) -> Self {
        path.0
    }
}

/// Serializes a closed outline as a smooth quadratic path.
///
/// Vertices are joined through their midpoints: `M` to the first midpoint,
/// one `Q` segment, then `T` segments back around to the start. Fewer than
/// two vertices give an empty string; exactly two give a straight `M…L…`.
/// Coordinates are rounded to four decimals.
pub fn polygon_to_path(outline: &OutlinePath) -> PathData {
    serialize_polygon(outline.points()).0
}

/// Like [`polygon_to_path`], also returning the bounds of the coordinates as
/// written.
pub(crate) fn serialize_polygon(points: &[Point]) -> (PathData, Option<Rect>) {
    let len = points.len();
    let mut w = PathWriter::with_capacity(len);

    match len {
        0 | 1 => {}
        2 => {
            w.command('M');
            w.pair(points[0]);
            w.command('L');
            w.pair(points[1]);
            w.out.truncate(w.out.trim_end().len());
        }
        _ => {
            w.command('M');
            w.average(points[0], points[1]);
            w.command('Q');
            w.pair(points[1]);
            w.average(points[1], points[2]);
            w.command('T');
            for pair in points[2..].windows(2) {
                w.average(pair[0], pair[1]);
            }
            w.average(points[len - 1], points[0]);
            w.average(points[0], points[1]);
            w.command('Z');
        }
    }

    (PathData(w.out), w.bounds)
}

struct PathWriter {
    out: String,
    bounds: Option<Rect>,
}

impl PathWriter {
    fn with_capacity(points: usize) -> Self {
        Self {
            out: String::with_capacity(points * 20 + 8),
            bounds: None,
        }
    }

    fn command(&mut self, c: char) {
        self.out.push(c);
    }

    fn pair(&mut self, p: Point) {
        let (x, y) = (precise(p.x), precise(p.y));
        self.bounds = include(self.bounds, Point::new(x, y));
        // Writing to a String cannot fail.
        let _ = write!(self.out, "{x},{y} ");
    }

    fn average(&mut self, a: Point, b: Point) {
        self.pair(a.midpoint(b));
    }
}

/// Rounds to four decimals, folding `-0` into `0`.
fn precise(v: f64) -> f64 {
    let r = (v * 10_000.0).round() / 10_000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[Point]) -> String {
        serialize_polygon(points).0.into_string()
    }

    #[test]
    fn fewer_than_two_points_is_empty() {
        assert_eq!(path(&[]), "");
        assert_eq!(path(&[Point::new(1.0, 2.0)]), "");
    }

    #[test]
    fn two_points_are_a_line() {
        assert_eq!(
            path(&[Point::new(0.0, 0.0), Point::new(3.5, -1.0)]),
            "M0,0 L3.5,-1"
        );
    }

    #[test]
    fn square_is_closed_quadratic() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(path(&square), "M5,0 Q10,0 10,5 T5,10 0,5 5,0 Z");
    }

    #[test]
    fn triangle_has_no_interior_t_segments() {
        let tri = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 2.0)];
        assert_eq!(path(&tri), "M2,0 Q4,0 3,1 T1,1 2,0 Z");
    }

    #[test]
    fn rounds_to_four_decimals() {
        let pts = [Point::new(0.123456, -0.00001), Point::new(1.0 / 3.0, 2.0)];
        assert_eq!(path(&pts), "M0.1235,0 L0.3333,2");
    }

    #[test]
    fn bounds_follow_written_coordinates() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let (_, bounds) = serialize_polygon(&square);
        assert_eq!(bounds, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn serializing_twice_is_identical() {
        let pts: Vec<Point> = (0..40)
            .map(|i| {
                let a = i as f64 * 0.3;
                Point::new(a.cos() * 17.3, a.sin() * 9.1)
            })
            .collect();
        assert_eq!(path(&pts), path(&pts));
    }
}
