//! Stage 1: centerline points.
//!
//! Input positions are streamlined (each point is pulled towards the
//! previous accepted point), annotated with the distance travelled and the
//! unit vector pointing back along the line.

use kurbo::{Point, Vec2};

use crate::config::StrokeOptions;
use crate::geom::unit;

/// Pressure assigned to every input point; samples carry no recorded pressure.
pub const INPUT_PRESSURE: f64 = 0.5;

/// One accepted centerline point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub point: Point,
    pub pressure: f64,
    /// Unit vector from this point back towards the previous one.
    pub vector: Vec2,
    /// Distance from the previous accepted point.
    pub distance: f64,
    pub running_length: f64,
}

/// Streamlines `input` into stroke points.
///
/// Returns an empty vector for empty input and a single point with vector
/// `(1, 1)` when everything collapses onto the first sample.
pub fn compute_stroke_points(input: &[Point], options: &StrokeOptions) -> Vec<StrokePoint> {
    let size = options.size;
    let mut pts = strip_near_ends(input, size / 3.0);
    let Some(&first) = pts.first() else {
        return Vec::new();
    };

    // A bare pair would outline as a dash; give the simulation room to work.
    if pts.len() == 2 && options.simulate_pressure {
        let last = pts[1];
        pts = (0..=4).map(|i| first.lerp(last, i as f64 / 4.0)).collect();
    }

    let t = 0.15 + (1.0 - options.streamline) * 0.85;
    let max = pts.len() - 1;

    let mut out = Vec::with_capacity(pts.len());
    out.push(StrokePoint {
        point: first,
        pressure: INPUT_PRESSURE,
        vector: Vec2::new(1.0, 1.0),
        distance: 0.0,
        running_length: 0.0,
    });

    let mut prev = first;
    let mut running_length = 0.0;
    let mut reached_min_length = false;

    for (i, &raw) in pts.iter().enumerate().skip(1) {
        let point = if options.last && i == max {
            raw
        } else {
            prev.lerp(raw, t)
        };
        if point == prev {
            continue;
        }

        let distance = prev.distance(point);
        running_length += distance;

        if i < max && !reached_min_length {
            if running_length < size {
                continue;
            }
            reached_min_length = true;
        }

        out.push(StrokePoint {
            point,
            pressure: INPUT_PRESSURE,
            vector: unit(prev - point),
            distance,
            running_length,
        });
        prev = point;
    }

    if let Some(second) = out.get(1).map(|sp| sp.vector) {
        out[0].vector = second;
    }

    out
}

/// Drops samples within `radius` of the first sample, then samples within
/// `radius` of the final one. The first sample is always kept.
fn strip_near_ends(input: &[Point], radius: f64) -> Vec<Point> {
    let Some(&first) = input.first() else {
        return Vec::new();
    };
    let limit = radius * radius;

    let mut pts = Vec::with_capacity(input.len());
    pts.push(first);
    pts.extend(
        input[1..]
            .iter()
            .copied()
            .skip_while(|p| (*p - first).hypot2() <= limit),
    );

    if let Some(last) = pts.pop() {
        while pts.len() > 1 && pts.last().is_some_and(|p| (*p - last).hypot2() <= limit) {
            pts.pop();
        }
        pts.push(last);
    }

    pts
}
