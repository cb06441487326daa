use kurbo::{Affine, Point, Rect, Vec2};

/// Half-turn with a small overshoot so rotated cap points never land exactly
/// on the opposite track.
pub(crate) const FIXED_PI: f64 = std::f64::consts::PI + 0.0001;

/// Perpendicular, rotated a quarter-turn clockwise in screen space.
pub(crate) fn per(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Unit vector in the direction of `v`; zero stays zero.
pub(crate) fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 {
        Vec2::ZERO
    } else {
        v / len
    }
}

pub(crate) fn rotate_around(p: Point, center: Point, angle: f64) -> Point {
    Affine::rotate_about(angle, center) * p
}

/// Grows `bounds` to include `p`.
pub(crate) fn include(bounds: Option<Rect>, p: Point) -> Option<Rect> {
    Some(match bounds {
        Some(rect) => rect.union_pt(p),
        None => Rect::from_points(p, p),
    })
}
