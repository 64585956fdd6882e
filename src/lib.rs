//! Mitered ribbon meshes for editable 2D line strips.
//!
//! [`OffsetVectorComputer`] turns an open line strip into one inflation
//! vector per point, and [`RibbonMeshBuilder`] appends a quad-strip ribbon
//! built from those vectors to a shared [`RibbonMesh`]. [`LineStrip`] ties
//! both together for interactive editing.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{GeometryError, Result, RibbonError, TessellationError};
pub use geometry::LineStrip;
pub use operations::offset::{MiterPolicy, OffsetVectorComputer};
pub use tessellation::{Color, MeshVertex, RibbonMesh, RibbonMeshBuilder, RibbonParams, RibbonStyle};
