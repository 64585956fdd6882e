use std::f64::consts::TAU;

use tracing::{debug, warn};

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};
use crate::operations::offset::{MiterPolicy, OffsetVectorComputer};
use crate::tessellation::{RibbonMesh, RibbonMeshBuilder, RibbonParams};

/// Number of handles in the default editing scene.
const DEFAULT_POINT_COUNT: u32 = 8;

/// Radius of the circle the default handles start on.
const DEFAULT_RADIUS: f64 = 100.0;

/// An open, ordered, editable sequence of 2D points.
///
/// Order defines the path direction; the last point never connects back to
/// the first. Edits happen one at a time and every edit is expected to be
/// followed by a full [`rebuild_mesh`](Self::rebuild_mesh).
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    points: Vec<Point2>,
}

impl LineStrip {
    /// Creates a line strip from existing points.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Places `count` points on a circle of `radius` around the origin, the
    /// `i`-th at angle `2π·i / count`.
    #[must_use]
    pub fn on_circle(count: u32, radius: f64) -> Self {
        let points = (0..count)
            .map(|i| {
                let theta = f64::from(i) / f64::from(count) * TAU;
                Point2::new(theta.cos() * radius, theta.sin() * radius)
            })
            .collect();
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point2> {
        self.points.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a point at the end of the strip.
    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    /// Moves a point by `delta`, as delivered by a pointer drag event.
    ///
    /// # Errors
    ///
    /// - `GeometryError::IndexOutOfRange` if `index` does not name a point
    /// - `GeometryError::NonFinite` if `delta` is NaN or infinite
    pub fn drag(&mut self, index: usize, delta: Vector2) -> Result<()> {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return Err(GeometryError::NonFinite { index }.into());
        }
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfRange { index, len })?;
        *point += delta;
        Ok(())
    }

    /// Moves a point to an absolute position.
    ///
    /// # Errors
    ///
    /// - `GeometryError::IndexOutOfRange` if `index` does not name a point
    /// - `GeometryError::NonFinite` if `position` is NaN or infinite
    pub fn set_point(&mut self, index: usize, position: Point2) -> Result<()> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(GeometryError::NonFinite { index }.into());
        }
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfRange { index, len })?;
        *point = position;
        Ok(())
    }

    /// Returns the index of the point nearest to `position` within `radius`.
    ///
    /// Ties go to the lowest index.
    #[must_use]
    pub fn pick(&self, position: Point2, radius: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, nalgebra::distance(p, &position)))
            .filter(|&(_, d)| d <= radius)
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            })
            .map(|(i, _)| i)
    }

    /// Computes the per-point inflation vectors of this strip.
    ///
    /// # Errors
    ///
    /// See [`OffsetVectorComputer::compute`].
    pub fn offset_vectors(&self, miter: MiterPolicy) -> Result<Vec<Vector2>> {
        OffsetVectorComputer::new(&self.points, miter).compute()
    }

    /// Replaces the contents of `mesh` with one ribbon per layer in `params`.
    ///
    /// Offsets are computed once and shared by every layer. The new layers are
    /// appended behind the previous frame and the old prefix is dropped only
    /// once every layer has been built, so on error `mesh` still holds the
    /// previous frame and the caller can reject the edit that caused it. The
    /// mesh's allocation is reused across rebuilds.
    ///
    /// # Errors
    ///
    /// Any error from [`OffsetVectorComputer::compute`] or
    /// [`RibbonMeshBuilder::build`].
    pub fn rebuild_mesh(&self, params: &RibbonParams, mesh: &mut RibbonMesh) -> Result<()> {
        let (old_vertices, old_triangles) = (mesh.vertex_count(), mesh.triangle_count());

        if let Err(err) = self.append_layers(params, mesh) {
            mesh.truncate(old_vertices, old_triangles);
            warn!(%err, points = self.len(), "ribbon rebuild rejected");
            return Err(err);
        }
        mesh.discard_front(old_vertices, old_triangles);

        debug!(
            points = self.len(),
            layers = params.layers.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "rebuilt ribbon mesh"
        );
        Ok(())
    }

    fn append_layers(&self, params: &RibbonParams, mesh: &mut RibbonMesh) -> Result<()> {
        let offsets = self.offset_vectors(params.miter)?;
        for style in &params.layers {
            RibbonMeshBuilder::new(&self.points, &offsets, *style).build(mesh)?;
        }
        Ok(())
    }
}

impl Default for LineStrip {
    fn default() -> Self {
        Self::on_circle(DEFAULT_POINT_COUNT, DEFAULT_RADIUS)
    }
}

impl From<Vec<Point2>> for LineStrip {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}
