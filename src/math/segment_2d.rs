use super::{Point2, Vector2};
use crate::error::{GeometryError, Result};

/// Computes the normalized direction from `points[start]` to `points[end]`.
///
/// # Errors
///
/// - `GeometryError::DegenerateSegment` if the two points coincide
/// - `GeometryError::SegmentOverflow` if the segment length is not finite
///
/// The reported indices are ordered regardless of the walking direction.
///
/// # Panics
///
/// Panics if either index is out of bounds.
pub fn segment_direction(points: &[Point2], start: usize, end: usize) -> Result<Vector2> {
    let d = points[end] - points[start];
    let len = d.norm();
    let (start, end) = (start.min(end), start.max(end));
    if !len.is_finite() {
        return Err(GeometryError::SegmentOverflow { start, end }.into());
    }
    if len < f64::EPSILON {
        return Err(GeometryError::DegenerateSegment { start, end }.into());
    }
    Ok(d / len)
}
