pub mod line_strip;

pub use line_strip::LineStrip;
