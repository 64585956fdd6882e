mod color;
mod ribbon_style;
mod tessellate_ribbon;

pub use color::Color;
pub use ribbon_style::RibbonStyle;
pub use tessellate_ribbon::RibbonMeshBuilder;

use crate::math::Point3;
use crate::operations::offset::MiterPolicy;

/// Parameters for a full ribbon rebuild: the layers to draw, back to front,
/// and the miter policy shared by all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonParams {
    /// Layers in paint order. Each layer reuses the same offset vectors.
    pub layers: Vec<RibbonStyle>,
    /// Handling of extreme miters at sharp joints.
    pub miter: MiterPolicy,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            layers: vec![RibbonStyle::fill(), RibbonStyle::outline()],
            miter: MiterPolicy::Unclamped,
        }
    }
}

/// A colored vertex on the `z = 0` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Point3,
    pub color: Color,
}

/// An append-only triangle mesh shared by one or more ribbons.
///
/// Every index refers to a vertex already in the mesh, and triangles keep
/// the winding their producer emitted.
#[derive(Debug, Clone, Default)]
pub struct RibbonMesh {
    vertices: Vec<MeshVertex>,
    indices: Vec<[u32; 3]>,
}

impl RibbonMesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for the given number of vertices and triangles.
    #[must_use]
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles),
        }
    }

    /// Removes every vertex and triangle, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[must_use]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Triangle indices, one triple per triangle.
    #[must_use]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of entries in a flat index buffer (three per triangle).
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len() * 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the triangle indices as a flat index buffer.
    pub fn flat_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().flatten().copied()
    }

    /// Iterates vertex positions in buffer order.
    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Appends vertices and triangles produced by a builder that has already
    /// validated them.
    pub(crate) fn append(&mut self, vertices: &[MeshVertex], triangles: &[[u32; 3]]) {
        debug_assert!(triangles
            .iter()
            .flatten()
            .all(|&i| (i as usize) < self.vertices.len() + vertices.len()));
        self.vertices.extend_from_slice(vertices);
        self.indices.extend_from_slice(triangles);
    }

    /// Drops everything appended after the mesh held `vertices` vertices and
    /// `triangles` triangles.
    pub(crate) fn truncate(&mut self, vertices: usize, triangles: usize) {
        self.vertices.truncate(vertices);
        self.indices.truncate(triangles);
    }

    /// Drops the first `vertices` vertices and `triangles` triangles, then
    /// rebases the remaining indices onto the shortened vertex list.
    ///
    /// The remaining triangles must only reference vertices past the dropped prefix.
    pub(crate) fn discard_front(&mut self, vertices: usize, triangles: usize) {
        self.vertices.drain(..vertices);
        self.indices.drain(..triangles);
        // Remaining indices are `u32`s at or past `vertices`, so the shift fits
        // whenever any are left.
        if let Ok(shift) = u32::try_from(vertices) {
            for index in self.indices.iter_mut().flatten() {
                *index -= shift;
            }
        }
    }
}
