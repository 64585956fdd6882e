use tracing::debug;

use crate::error::{GeometryError, Result, TessellationError};
use crate::math::{Point2, Point3, Vector2};

use super::ribbon_style::RibbonStyle;
use super::{MeshVertex, RibbonMesh};

/// Emits a flat ribbon quad strip around a line strip.
///
/// Each point `p` with offset `o` contributes two vertices, top `p + o * w`
/// then bottom `p - o * w`, where `w` is the style's half-width. Every segment
/// `i -> i + 1` becomes the triangles `(t0, t1, t2)` and `(t1, t3, t2)` with
/// `t0 = base + 2i`. The offsets are usually produced by
/// [`OffsetVectorComputer`](crate::operations::offset::OffsetVectorComputer).
#[derive(Debug)]
pub struct RibbonMeshBuilder<'a> {
    points: &'a [Point2],
    offsets: &'a [Vector2],
    style: RibbonStyle,
}

impl<'a> RibbonMeshBuilder<'a> {
    /// Creates a new ribbon build operation.
    #[must_use]
    pub fn new(points: &'a [Point2], offsets: &'a [Vector2], style: RibbonStyle) -> Self {
        Self {
            points,
            offsets,
            style,
        }
    }

    /// Appends the ribbon to `mesh`, never touching what is already there.
    ///
    /// Triangle indices are relative to the mesh's vertex count at the time of
    /// the call, so several ribbons can share one mesh. Later calls paint over
    /// earlier ones in back-to-front renderers.
    ///
    /// # Errors
    ///
    /// Nothing is appended on error.
    ///
    /// - `GeometryError::InsufficientPoints` if fewer than 2 points are provided
    /// - `TessellationError::LengthMismatch` if offsets and points differ in count
    /// - `GeometryError::NonFinite` if an inflated vertex is NaN or infinite
    /// - `TessellationError::IndexOverflow` if the mesh outgrows `u32` indices
    pub fn build(&self, mesh: &mut RibbonMesh) -> Result<()> {
        let n = self.points.len();
        if n < 2 {
            return Err(GeometryError::InsufficientPoints {
                required: 2,
                actual: n,
            }
            .into());
        }
        if self.offsets.len() != n {
            return Err(TessellationError::LengthMismatch {
                points: n,
                offsets: self.offsets.len(),
            }
            .into());
        }

        let base = mesh.vertex_count();
        let vertex_count = base.saturating_add(n.saturating_mul(2));
        let overflow = || TessellationError::IndexOverflow { vertex_count };
        u32::try_from(vertex_count).map_err(|_| overflow())?;
        let base_index = u32::try_from(base).map_err(|_| overflow())?;

        let vertices = self.inflate()?;

        let mut triangles = Vec::with_capacity(2 * (n - 1));
        let mut t0 = base_index;
        for _ in 0..n - 1 {
            let (t1, t2, t3) = (t0 + 1, t0 + 2, t0 + 3);
            triangles.push([t0, t1, t2]);
            triangles.push([t1, t3, t2]);
            t0 += 2;
        }

        mesh.append(&vertices, &triangles);

        debug!(
            base,
            vertices = vertices.len(),
            triangles = triangles.len(),
            half_width = self.style.half_width(),
            "appended ribbon"
        );
        Ok(())
    }

    /// Computes the interleaved top/bottom vertices.
    fn inflate(&self) -> Result<Vec<MeshVertex>> {
        let w = self.style.half_width();
        let color = self.style.color();
        let mut vertices = Vec::with_capacity(self.points.len() * 2);

        for (index, (p, o)) in self.points.iter().zip(self.offsets).enumerate() {
            let top = p + o * w;
            let bottom = p - o * w;
            if ![top.x, top.y, bottom.x, bottom.y]
                .iter()
                .all(|c| c.is_finite())
            {
                return Err(GeometryError::NonFinite { index }.into());
            }
            vertices.push(MeshVertex {
                position: Point3::new(top.x, top.y, 0.0),
                color,
            });
            vertices.push(MeshVertex {
                position: Point3::new(bottom.x, bottom.y, 0.0),
                color,
            });
        }

        Ok(vertices)
    }
}
