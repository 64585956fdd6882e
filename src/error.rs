use thiserror::Error;

/// Top-level error type for ribbon generation.
#[derive(Debug, Error)]
pub enum RibbonError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while validating or processing line strip geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate segment: points {start} and {end} coincide")]
    DegenerateSegment { start: usize, end: usize },

    #[error("segment between points {start} and {end} is too long to normalize")]
    SegmentOverflow { start: usize, end: usize },

    #[error("at least {required} points are required, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("miter scale at point {index} overflowed ({scale})")]
    MiterOverflow { index: usize, scale: f64 },

    #[error("non-finite coordinate at index {index}")]
    NonFinite { index: usize },

    #[error("point index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors related to mesh generation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("{offsets} offset vectors supplied for {points} points")]
    LengthMismatch { points: usize, offsets: usize },

    #[error("mesh would hold {vertex_count} vertices, exceeding u32 indexing")]
    IndexOverflow { vertex_count: usize },
}

/// Convenience type alias for results using [`RibbonError`].
pub type Result<T> = std::result::Result<T, RibbonError>;
