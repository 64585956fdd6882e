pub mod intersect_2d;
pub mod segment_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type. Mesh vertices live on the `z = 0` plane.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rotates `v` by 90° counter-clockwise: `(x, y) -> (-y, x)`.
#[must_use]
pub fn perp_ccw(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rotates `v` by 90° clockwise: `(x, y) -> (y, -x)`.
#[must_use]
pub fn perp_cw(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}
