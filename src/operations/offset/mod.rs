mod offset_vectors;

pub use offset_vectors::{MiterPolicy, OffsetVectorComputer};
