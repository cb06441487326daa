//! Stage 2: pressure and radius.

use crate::config::{Easing, StrokeOptions};
use crate::points::StrokePoint;

/// How quickly simulated pressure follows drawing speed.
pub const RATE_OF_PRESSURE_CHANGE: f64 = 0.275;

const MIN_RADIUS: f64 = 0.01;

/// A stroke point with its effective pressure and assigned radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusPoint {
    pub stroke_point: StrokePoint,
    pub radius: f64,
}

/// Radius for a pressure value.
pub fn stroke_radius(size: f64, thinning: f64, pressure: f64, easing: Easing) -> f64 {
    size * easing.apply(0.5 - thinning * (0.5 - pressure))
}

/// Assigns a radius to every point, returning a new sequence.
///
/// With simulated pressure, fast segments (long `distance` relative to
/// `size`) thin the stroke and slow ones thicken it. Recorded pressure is
/// smoothed instead. Start and end tapers then scale the radius down near
/// the stroke ends, never below `0.01`.
pub fn assign_radii(points: &[StrokePoint], options: &StrokeOptions) -> Vec<RadiusPoint> {
    let Some(last) = points.last() else {
        return Vec::new();
    };
    let size = options.size;
    let total_length = last.running_length;
    let radius_for =
        |pressure: f64| stroke_radius(size, options.thinning, pressure, options.easing);

    if !options.simulate_pressure && total_length < size {
        let max = points.iter().map(|sp| sp.pressure).fold(0.5, f64::max);
        return points
            .iter()
            .map(|sp| RadiusPoint {
                stroke_point: StrokePoint {
                    pressure: max,
                    ..*sp
                },
                radius: radius_for(max),
            })
            .collect();
    }

    let mut prev_pressure = warm_up_pressure(points, options);

    let start_taper = options.start.taper.length(size, total_length);
    let end_taper = options.end.taper.length(size, total_length);
    let start_ease = options.start.easing_or(Easing::EaseOutQuad);
    let end_ease = options.end.easing_or(Easing::EaseOutCubic);

    points
        .iter()
        .map(|sp| {
            let mut pressure = sp.pressure;
            let mut radius = if options.thinning != 0.0 {
                let speed = (sp.distance / size).min(1.0);
                pressure = if options.simulate_pressure {
                    let rp = (1.0 - speed).min(1.0);
                    (prev_pressure + (rp - prev_pressure) * (speed * RATE_OF_PRESSURE_CHANGE))
                        .min(1.0)
                } else {
                    (prev_pressure + (pressure - prev_pressure) * (speed * RATE_OF_PRESSURE_CHANGE))
                        .min(1.0)
                };
                prev_pressure = pressure;
                radius_for(pressure)
            } else {
                size / 2.0
            };

            if start_taper > 0.0 || end_taper > 0.0 {
                let remaining = total_length - sp.running_length;
                let ts = if sp.running_length < start_taper {
                    start_ease.apply(sp.running_length / start_taper)
                } else {
                    1.0
                };
                let te = if remaining < end_taper {
                    end_ease.apply(remaining / end_taper)
                } else {
                    1.0
                };
                radius = (radius * ts.min(te)).max(MIN_RADIUS);
            }

            RadiusPoint {
                stroke_point: StrokePoint { pressure, ..*sp },
                radius,
            }
        })
        .collect()
}

/// Initial pressure, averaged over the first `size * 5` units of the stroke.
fn warm_up_pressure(points: &[StrokePoint], options: &StrokeOptions) -> f64 {
    let size = options.size;
    let mut prev = points.first().map_or(0.5, |sp| sp.pressure);

    for sp in points
        .iter()
        .take_while(|sp| sp.running_length <= size * 5.0)
    {
        let speed = (sp.distance / size).min(1.0);
        let p = if options.simulate_pressure {
            let rp = (1.0 - speed).min(1.0);
            (prev + (rp - prev) * (speed * RATE_OF_PRESSURE_CHANGE)).min(1.0)
        } else {
            (prev + (sp.pressure - prev) * 0.5).min(1.0)
        };
        prev += (p - prev) * 0.5;
    }

    prev
}
