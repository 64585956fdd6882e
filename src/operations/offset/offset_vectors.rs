use tracing::{debug, trace};

use crate::error::{GeometryError, Result, TessellationError};
use crate::math::segment_2d::segment_direction;
use crate::math::{perp_ccw, perp_cw, Point2, Vector2, TOLERANCE};

/// How interior joints with an extreme miter are handled.
///
/// The miter scale at a joint is `1 / cos(θ / 2)` where `θ` is the turn
/// angle, so it diverges as the path folds back on itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MiterPolicy {
    /// Uses the raw miter scale. A joint whose scale is not finite fails with
    /// [`GeometryError::MiterOverflow`].
    #[default]
    Unclamped,
    /// Caps the miter scale at the given multiple of the half-width.
    Clamp(f64),
}

impl MiterPolicy {
    /// Creates a clamping policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is not finite or is below `1.0` (a miter is
    /// never shorter than the half-width).
    pub fn clamp(limit: f64) -> Result<Self> {
        let policy = Self::Clamp(limit);
        policy.validate()?;
        Ok(policy)
    }

    /// Returns the miter limit, if any.
    #[must_use]
    pub fn limit(self) -> Option<f64> {
        match self {
            Self::Unclamped => None,
            Self::Clamp(limit) => Some(limit),
        }
    }

    fn validate(self) -> Result<()> {
        if let Self::Clamp(limit) = self {
            if !limit.is_finite() || limit < 1.0 {
                return Err(TessellationError::InvalidParameters(format!(
                    "miter limit must be finite and at least 1.0, got {limit}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Computes per-vertex inflation vectors for an open line strip.
///
/// Each returned vector is perpendicular to the local path direction on the
/// left side (counter-clockwise of travel). Endpoints get the unit normal of
/// their single segment; interior points get the miter vector, the bisector of
/// the two adjacent segment normals scaled by `1 / cos(θ / 2)`. Multiplying a
/// vector by a half-width `w` places the vertex exactly on both offset edges at
/// distance `w` from the strip.
#[derive(Debug)]
pub struct OffsetVectorComputer<'a> {
    points: &'a [Point2],
    miter: MiterPolicy,
}

impl<'a> OffsetVectorComputer<'a> {
    /// Creates a new offset computation over `points`.
    #[must_use]
    pub fn new(points: &'a [Point2], miter: MiterPolicy) -> Self {
        Self { points, miter }
    }

    /// Computes one offset vector per point, in input order.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InsufficientPoints` if fewer than 2 points are provided
    /// - `GeometryError::NonFinite` if a coordinate is NaN or infinite
    /// - `GeometryError::DegenerateSegment` if two consecutive points coincide
    /// - `GeometryError::SegmentOverflow` if a segment is too long to normalize
    /// - `GeometryError::MiterOverflow` for a non-finite miter under
    ///   [`MiterPolicy::Unclamped`]
    /// - `TessellationError::InvalidParameters` for an invalid miter limit
    pub fn compute(&self) -> Result<Vec<Vector2>> {
        let n = self.points.len();
        if n < 2 {
            return Err(GeometryError::InsufficientPoints {
                required: 2,
                actual: n,
            }
            .into());
        }
        self.miter.validate()?;

        if let Some(index) = self
            .points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFinite { index }.into());
        }

        let mut offsets = Vec::with_capacity(n);
        offsets.push(perp_ccw(segment_direction(self.points, 0, 1)?));
        for i in 1..n - 1 {
            offsets.push(self.miter_offset(i)?);
        }
        offsets.push(perp_ccw(segment_direction(self.points, n - 2, n - 1)?));

        debug!(points = n, miter = ?self.miter, "computed offset vectors");
        Ok(offsets)
    }

    /// Miter vector at interior point `i`.
    fn miter_offset(&self, i: usize) -> Result<Vector2> {
        let incoming = segment_direction(self.points, i - 1, i)?;
        let to_pt = perp_ccw(incoming);
        // Reversed outgoing direction rotated clockwise lands on the same side as `to_pt`.
        let from_pt = perp_cw(segment_direction(self.points, i + 1, i)?);

        let half = (to_pt + from_pt).try_normalize(f64::EPSILON);
        let dot = half.map_or(0.0, |h| to_pt.dot(&h));

        match self.miter {
            MiterPolicy::Unclamped => {
                let scale = 1.0 / dot;
                match half {
                    Some(h) if dot >= TOLERANCE && scale.is_finite() => Ok(h * scale),
                    _ => Err(GeometryError::MiterOverflow { index: i, scale }.into()),
                }
            }
            MiterPolicy::Clamp(limit) => {
                let Some(h) = half else {
                    // Full reversal: no bisector, push the tip along the travel direction.
                    trace!(index = i, limit, "reversal miter clamped");
                    return Ok(incoming * limit);
                };
                if dot * limit <= 1.0 {
                    trace!(index = i, limit, dot, "miter clamped");
                    Ok(h * limit)
                } else {
                    Ok(h / dot)
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::RibbonError;
    use crate::math::intersect_2d::{line_through_points_intersect_2d, point_to_line_dist};

    fn compute(points: &[Point2]) -> Result<Vec<Vector2>> {
        OffsetVectorComputer::new(points, MiterPolicy::Unclamped).compute()
    }

    fn assert_vec_near(a: &Vector2, b: &Vector2, msg: &str) {
        assert!(
            (a - b).norm() < 1e-9,
            "{msg}: ({}, {}) vs ({}, {})",
            a.x,
            a.y,
            b.x,
            b.y
        );
    }

    #[test]
    fn two_points_straight_segment() {
        let points = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let offsets = compute(&points).unwrap();

        assert_eq!(offsets.len(), 2);
        assert_vec_near(&offsets[0], &Vector2::new(0.0, 1.0), "first");
        assert_vec_near(&offsets[1], &Vector2::new(0.0, 1.0), "last");
    }

    #[test]
    fn one_offset_per_point() {
        let points: Vec<Point2> = (0..7)
            .map(|i| {
                let t = f64::from(i);
                Point2::new(t * 3.0, (t * 0.9).sin() * 5.0)
            })
            .collect();
        let offsets = compute(&points).unwrap();
        assert_eq!(offsets.len(), points.len());
    }

    #[test]
    fn colinear_interior_matches_endpoints() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(4.0, 2.0),
            Point2::new(10.0, 5.0),
        ];
        let offsets = compute(&points).unwrap();

        for (i, off) in offsets.iter().enumerate() {
            assert_vec_near(off, &offsets[0], &format!("offset {i}"));
            assert_relative_eq!(off.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn right_angle_miter_is_sqrt2() {
        // Left turn at (10, 0).
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        let offsets = compute(&points).unwrap();

        assert_relative_eq!(offsets[1].norm(), std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_vec_near(&offsets[1], &Vector2::new(-1.0, 1.0), "miter");

        // Bisects the incoming normal (0, 1) and the outgoing normal (-1, 0).
        let dir = offsets[1].normalize();
        let a = dir.dot(&Vector2::new(0.0, 1.0));
        let b = dir.dot(&Vector2::new(-1.0, 0.0));
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn right_turn_miter_stays_on_left_side() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, -10.0),
        ];
        let offsets = compute(&points).unwrap();
        assert_vec_near(&offsets[1], &Vector2::new(1.0, 1.0), "outer miter");
    }

    #[test]
    fn inflated_vertices_lie_on_offset_edges() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(8.0, 1.0),
            Point2::new(11.0, 7.0),
            Point2::new(4.0, 12.0),
            Point2::new(9.0, 20.0),
        ];
        let offsets = compute(&points).unwrap();
        let w = 2.5;

        for i in 1..points.len() - 1 {
            let top = points[i] + offsets[i] * w;
            let bottom = points[i] - offsets[i] * w;
            for (a, b) in [(i - 1, i), (i, i + 1)] {
                let d_top = point_to_line_dist(&top, &points[a], &points[b]);
                let d_bottom = point_to_line_dist(&bottom, &points[a], &points[b]);
                assert_relative_eq!(d_top, w, epsilon = 1e-9);
                assert_relative_eq!(d_bottom, w, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn adjacent_quad_edges_meet_at_miter_vertex() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 2.0),
            Point2::new(7.0, 9.0),
            Point2::new(15.0, 10.0),
        ];
        let offsets = compute(&points).unwrap();
        let w = 1.5;

        for i in 1..points.len() - 1 {
            let n_in = perp_ccw((points[i] - points[i - 1]).normalize()) * w;
            let n_out = perp_ccw((points[i + 1] - points[i]).normalize()) * w;

            // Offset edges of the incoming and outgoing segments, built independently.
            let hit = line_through_points_intersect_2d(
                &(points[i - 1] + n_in),
                &(points[i] + n_in),
                &(points[i] + n_out),
                &(points[i + 1] + n_out),
            )
            .unwrap();
            let top = points[i] + offsets[i] * w;
            assert_relative_eq!(hit.x, top.x, epsilon = 1e-9);
            assert_relative_eq!(hit.y, top.y, epsilon = 1e-9);

            // The two ribbon edges are symmetric about the centerline vertex.
            let bottom = points[i] - offsets[i] * w;
            let mid = nalgebra::center(&top, &bottom);
            assert_relative_eq!(mid.x, points[i].x, epsilon = 1e-9);
            assert_relative_eq!(mid.y, points[i].y, epsilon = 1e-9);
        }
    }

    #[test]
    fn fewer_than_two_points_error() {
        let err = compute(&[Point2::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            RibbonError::Geometry(GeometryError::InsufficientPoints {
                required: 2,
                actual: 1
            })
        ));
        assert!(compute(&[]).is_err());
    }

    #[test]
    fn coincident_points_error() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 5.0),
        ];
        let err = compute(&points).unwrap_err();
        assert!(matches!(
            err,
            RibbonError::Geometry(GeometryError::DegenerateSegment { start: 1, end: 2 })
        ));
    }

    #[test]
    fn coincident_pair_only_segment_error() {
        let points = [Point2::new(3.0, 3.0), Point2::new(3.0, 3.0)];
        assert!(matches!(
            compute(&points).unwrap_err(),
            RibbonError::Geometry(GeometryError::DegenerateSegment { start: 0, end: 1 })
        ));
    }

    #[test]
    fn non_finite_point_error() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(5.0, 5.0),
        ];
        assert!(matches!(
            compute(&points).unwrap_err(),
            RibbonError::Geometry(GeometryError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn overflowing_segment_length_error() {
        let points = [Point2::new(-1e308, 0.0), Point2::new(1e308, 0.0)];
        let err = compute(&points).unwrap_err();
        assert!(matches!(
            err,
            RibbonError::Geometry(GeometryError::SegmentOverflow { start: 0, end: 1 })
        ));

        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1e200, 0.0),
            Point2::new(1e200, 1.0),
        ];
        assert!(matches!(
            compute(&points).unwrap_err(),
            RibbonError::Geometry(GeometryError::SegmentOverflow { start: 0, end: 1 })
        ));
    }

    #[test]
    fn full_reversal_unclamped_overflows() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let err = compute(&points).unwrap_err();
        assert!(matches!(
            err,
            RibbonError::Geometry(GeometryError::MiterOverflow { index: 1, .. })
        ));
    }

    #[test]
    fn near_reversal_unclamped_is_large_but_finite() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 0.1),
        ];
        let offsets = compute(&points).unwrap();
        assert!(offsets[1].norm() > 100.0);
        assert!(offsets[1].x.is_finite() && offsets[1].y.is_finite());
    }

    #[test]
    fn clamp_caps_sharp_miter() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 0.1),
        ];
        let policy = MiterPolicy::clamp(4.0).unwrap();
        let offsets = OffsetVectorComputer::new(&points, policy).compute().unwrap();
        assert_relative_eq!(offsets[1].norm(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn clamp_leaves_mild_miter_untouched() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        let policy = MiterPolicy::clamp(4.0).unwrap();
        let offsets = OffsetVectorComputer::new(&points, policy).compute().unwrap();
        assert_vec_near(&offsets[1], &Vector2::new(-1.0, 1.0), "miter");
    }

    #[test]
    fn clamp_full_reversal_points_along_travel() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let policy = MiterPolicy::clamp(3.0).unwrap();
        let offsets = OffsetVectorComputer::new(&points, policy).compute().unwrap();
        assert_vec_near(&offsets[1], &Vector2::new(3.0, 0.0), "reversal tip");
    }

    #[test]
    fn invalid_miter_limit_rejected() {
        assert!(MiterPolicy::clamp(0.5).is_err());
        assert!(MiterPolicy::clamp(f64::INFINITY).is_err());

        let points = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let err = OffsetVectorComputer::new(&points, MiterPolicy::Clamp(f64::NAN))
            .compute()
            .unwrap_err();
        assert!(matches!(
            err,
            RibbonError::Tessellation(TessellationError::InvalidParameters(_))
        ));
    }

    #[test]
    fn policy_limit_accessor() {
        assert_eq!(MiterPolicy::Unclamped.limit(), None);
        assert_eq!(MiterPolicy::Clamp(2.0).limit(), Some(2.0));
        assert_eq!(MiterPolicy::default(), MiterPolicy::Unclamped);
    }
}
