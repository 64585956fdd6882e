//! Line queries for checking generated ribbon edges.
//!
//! A correctly mitered vertex `p + o * w` lies on the offset lines of both
//! adjacent segments, at distance `w` from each centerline. These helpers let
//! callers (and the offset tests) verify that against their own geometry.

use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = delta.perp(d2) / cross;
    let u = delta.perp(d1) / cross;
    Some((t, u))
}

/// Intersection point of the line through `a0`, `a1` with the line through `b0`, `b1`.
#[must_use]
pub fn line_through_points_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;
    line_line_intersect_2d(a0, &da, b0, &db).map(|(t, _)| *a0 + da * t)
}

/// Unsigned distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the point-to-point distance when `a == b`.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < f64::EPSILON {
        return (p - a).norm();
    }
    d.perp(&(p - a)).abs() / len
}
