//! Math utilities and types
//!
//! Collision geometry works on integer pixel coordinates so that quadrant
//! splitting is exact and deterministic.

pub use nalgebra::{Point2, Vector2};

/// 2D integer point type
pub type Point2i = Point2<i32>;

/// 2D integer vector type
pub type Vec2i = Vector2<i32>;

/// Twice the signed area of the triangle `(a, b, c)`
///
/// Positive when the points turn counter-clockwise in a y-up frame.
/// Computed in `i64` so that any pair of `i32` coordinates is exact.
pub fn orientation(a: Point2i, b: Point2i, c: Point2i) -> i64 {
    let abx = i64::from(b.x) - i64::from(a.x);
    let aby = i64::from(b.y) - i64::from(a.y);
    let acx = i64::from(c.x) - i64::from(a.x);
    let acy = i64::from(c.y) - i64::from(a.y);
    abx * acy - aby * acx
}

/// Whether `p` lies on the closed segment `a..b`, given that the three are collinear
fn on_segment(a: Point2i, b: Point2i, p: Point2i) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Exact closed segment intersection test
pub fn segments_intersect(p1: Point2i, p2: Point2i, q1: Point2i, q2: Point2i) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0 && d2 < 0) || (d1 < 0 && d2 > 0)) && ((d3 > 0 && d4 < 0) || (d3 < 0 && d4 > 0)) {
        return true;
    }

    (d1 == 0 && on_segment(q1, q2, p1))
        || (d2 == 0 && on_segment(q1, q2, p2))
        || (d3 == 0 && on_segment(p1, p2, q1))
        || (d4 == 0 && on_segment(p1, p2, q2))
}
