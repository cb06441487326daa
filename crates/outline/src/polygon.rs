//! Stage 3: outline polygon.
//!
//! Each radius point is offset to both sides of the centerline, giving a left
//! and a right track. Sharp reversals get a rotated half-disc so the outline
//! does not fold over itself. The tracks are joined by an end cap, the
//! reversed right track and a start cap into one closed polygon.

use kurbo::{Point, Rect};

use crate::config::StrokeOptions;
use crate::geom::{include, per, rotate_around, unit, FIXED_PI};
use crate::points::StrokePoint;
use crate::radius::RadiusPoint;

const CORNER_STEPS: usize = 13;
const START_CAP_STEPS: usize = 13;
const END_CAP_STEPS: usize = 29;
const DOT_STEPS: usize = 13;

/// Points this close to the end of the stroke, other than the last one, are
/// treated as pen-lift noise.
const END_NOISE_LENGTH: f64 = 3.0;

/// A closed outline polygon and the bounds of its vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlinePath {
    points: Vec<Point>,
    bounds: Option<Rect>,
}

impl OutlinePath {
    fn from_points(points: Vec<Point>) -> Self {
        let bounds = points.iter().fold(None, |acc, p| include(acc, *p));
        Self { points, bounds }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounding box of all vertices, `None` for an empty outline.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds the outline polygon around `points`.
///
/// A single point becomes a dot of its radius. Empty input gives an empty
/// outline.
pub fn compute_outline(points: &[RadiusPoint], options: &StrokeOptions) -> OutlinePath {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return OutlinePath::default();
    };
    if points.len() == 1 {
        return OutlinePath::from_points(dot(first));
    }

    let size = options.size;
    let total_length = last.stroke_point.running_length;
    let (mut left, mut right) = tracks(points, options);

    let first_point = first.stroke_point.point;
    let last_point = last.stroke_point.point;

    let mut start_cap = Vec::new();
    if options.start.taper.length(size, total_length) > 0.0 {
        // tapered to a point already
    } else if options.start.cap {
        if let Some(&anchor) = right.first() {
            start_cap.extend((1..=START_CAP_STEPS).map(|k| {
                rotate_around(anchor, first_point, FIXED_PI * k as f64 / START_CAP_STEPS as f64)
            }));
        }
    } else if let (Some(&l0), Some(&r0)) = (left.first(), right.first()) {
        let corners = l0 - r0;
        let a = corners * 0.5;
        let b = corners * 0.51;
        start_cap.extend([first_point - a, first_point - b, first_point + b, first_point + a]);
    }

    let radius = last.radius;
    let direction = per(-last.stroke_point.vector);
    let mut end_cap = Vec::new();
    if options.end.taper.length(size, total_length) > 0.0 {
        end_cap.push(last_point);
    } else if options.end.cap {
        let start = last_point + direction * radius;
        end_cap.extend((1..END_CAP_STEPS).map(|k| {
            rotate_around(start, last_point, FIXED_PI * 3.0 * k as f64 / END_CAP_STEPS as f64)
        }));
    } else {
        end_cap.extend([
            last_point + direction * radius,
            last_point + direction * (radius * 0.99),
            last_point - direction * (radius * 0.99),
            last_point - direction * radius,
        ]);
    }

    right.reverse();
    left.reserve(end_cap.len() + right.len() + start_cap.len());
    left.extend(end_cap);
    left.extend(right);
    left.extend(start_cap);

    OutlinePath::from_points(left)
}

/// Left and right offset tracks.
fn tracks(points: &[RadiusPoint], options: &StrokeOptions) -> (Vec<Point>, Vec<Point>) {
    let last_idx = points.len() - 1;
    let total_length = points[last_idx].stroke_point.running_length;
    let min_distance = (options.size * options.smoothing).powi(2);

    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());

    let mut prev_vector = points[0].stroke_point.vector;
    let mut pl = points[0].stroke_point.point;
    let mut pr = pl;
    let mut prev_was_sharp = false;

    for (i, rp) in points.iter().enumerate() {
        let StrokePoint {
            point,
            vector,
            running_length,
            ..
        } = rp.stroke_point;
        let radius = rp.radius;

        if i < last_idx && total_length - running_length < END_NOISE_LENGTH {
            continue;
        }

        let next_vector = points
            .get(i + 1)
            .map_or(vector, |next| next.stroke_point.vector);
        let next_dpr = if i < last_idx {
            vector.dot(next_vector)
        } else {
            1.0
        };
        let prev_dpr = vector.dot(prev_vector);

        let is_sharp = prev_dpr < 0.0 && !prev_was_sharp;
        let next_is_sharp = next_dpr < 0.0;

        if is_sharp || next_is_sharp {
            let offset = per(prev_vector) * radius;
            for k in 0..=CORNER_STEPS {
                let angle = FIXED_PI * k as f64 / CORNER_STEPS as f64;
                pl = rotate_around(point - offset, point, angle);
                pr = rotate_around(point + offset, point, -angle);
                left.push(pl);
                right.push(pr);
            }
            if next_is_sharp {
                prev_was_sharp = true;
            }
            continue;
        }
        prev_was_sharp = false;

        if i == last_idx {
            let offset = per(vector) * radius;
            left.push(point - offset);
            right.push(point + offset);
            continue;
        }

        let offset = per(next_vector.lerp(vector, next_dpr)) * radius;

        let tl = point - offset;
        if i <= 1 || (pl - tl).hypot2() > min_distance {
            left.push(tl);
            pl = tl;
        }
        let tr = point + offset;
        if i <= 1 || (pr - tr).hypot2() > min_distance {
            right.push(tr);
            pr = tr;
        }

        prev_vector = vector;
    }

    (left, right)
}

fn dot(rp: &RadiusPoint) -> Vec<Point> {
    let center = rp.stroke_point.point;
    let toward = center + kurbo::Vec2::new(1.0, 1.0);
    let start = center + unit(per(center - toward)) * -rp.radius;
    (1..=DOT_STEPS)
        .map(|k| rotate_around(start, center, FIXED_PI * 2.0 * k as f64 / DOT_STEPS as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Taper, TaperOptions};
    use crate::points::compute_stroke_points;
    use crate::radius::assign_radii;

    fn outline(input: &[Point], options: &StrokeOptions) -> OutlinePath {
        let pts = compute_stroke_points(input, options);
        compute_outline(&assign_radii(&pts, options), options)
    }

    fn horizontal(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64 * 8.0, 0.0)).collect()
    }

    #[test]
    fn empty_input_is_empty_outline() {
        let out = compute_outline(&[], &StrokeOptions::default());
        assert!(out.is_empty());
        assert_eq!(out.bounds(), None);
    }

    #[test]
    fn single_point_is_a_dot() {
        let opts = StrokeOptions::default();
        let out = outline(&[Point::new(5.0, 5.0)], &opts);
        assert_eq!(out.len(), DOT_STEPS);

        let radius = assign_radii(&compute_stroke_points(&[Point::new(5.0, 5.0)], &opts), &opts)[0]
            .radius;
        for p in out.points() {
            let d = p.distance(Point::new(5.0, 5.0));
            assert!((d - radius).abs() < 1e-9, "vertex {p:?} off the circle");
        }
    }

    #[test]
    fn capped_line_has_round_ends() {
        let opts = StrokeOptions::default();
        let out = outline(&horizontal(20), &opts);

        // left + 28 end cap points + right + 13 start cap points.
        assert!(out.len() > (END_CAP_STEPS - 1) + START_CAP_STEPS);
        let bounds = out.bounds().expect("bounds");
        assert!(bounds.x0 < 0.0, "start cap extends behind the first point");
        assert!(bounds.y0 < 0.0 && bounds.y1 > 0.0);
    }

    #[test]
    fn flat_caps_use_four_points() {
        let capped = outline(&horizontal(20), &StrokeOptions::default());
        let flat_opts = StrokeOptions::default()
            .with_start(TaperOptions {
                cap: false,
                ..TaperOptions::capped()
            })
            .with_end(TaperOptions {
                cap: false,
                ..TaperOptions::capped()
            });
        let flat = outline(&horizontal(20), &flat_opts);
        assert_eq!(
            capped.len() - flat.len(),
            (END_CAP_STEPS - 1) + START_CAP_STEPS - 8
        );
    }

    #[test]
    fn tapered_ends_drop_caps() {
        let opts = StrokeOptions::default()
            .with_last(true)
            .with_start(TaperOptions {
                taper: Taper::Auto,
                ..TaperOptions::capped()
            })
            .with_end(TaperOptions {
                taper: Taper::Auto,
                ..TaperOptions::capped()
            });
        let input = horizontal(20);
        let out = outline(&input, &opts);
        // The end cap collapses to the last centerline point.
        assert!(out.points().contains(&Point::new(152.0, 0.0)));
    }

    #[test]
    fn reversal_draws_corner() {
        let mut input = horizontal(15);
        input.extend((0..15).rev().map(|i| Point::new(i as f64 * 8.0, 1.0)));
        let opts = StrokeOptions::default().with_last(true);
        let out = outline(&input, &opts);
        assert!(out.len() > 2 * (CORNER_STEPS + 1));
        assert!(out.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn bounds_cover_every_vertex() {
        let out = outline(&horizontal(12), &StrokeOptions::default());
        let bounds = out.bounds().expect("bounds");
        assert!(out.points().iter().all(|p| bounds.x0 <= p.x
            && p.x <= bounds.x1
            && bounds.y0 <= p.y
            && p.y <= bounds.y1));
    }
}
