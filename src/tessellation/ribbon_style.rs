use crate::error::{Result, TessellationError};

use super::Color;

/// Width and color of one ribbon layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonStyle {
    half_width: f64,
    color: Color,
}

impl RibbonStyle {
    /// Creates a new ribbon style.
    ///
    /// `half_width` is the distance from the centerline to either edge, so the
    /// ribbon is `2 * half_width` wide on straight runs.
    ///
    /// # Errors
    ///
    /// Returns an error if `half_width` is not positive and finite.
    pub fn new(half_width: f64, color: Color) -> Result<Self> {
        if !(half_width > 0.0 && half_width.is_finite()) {
            return Err(TessellationError::InvalidParameters(format!(
                "ribbon half-width must be positive and finite, got {half_width}"
            ))
            .into());
        }
        Ok(Self { half_width, color })
    }

    /// The wide orange fill layer drawn under the outline.
    #[must_use]
    pub const fn fill() -> Self {
        Self {
            half_width: 10.0,
            color: Color::rgb(1.0, 0.5, 0.25),
        }
    }

    /// The thin black layer tracing the raw centerline.
    #[must_use]
    pub const fn outline() -> Self {
        Self {
            half_width: 1.0,
            color: Color::BLACK,
        }
    }

    /// Returns the half-width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Returns the full ribbon width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns a copy with a different half-width.
    ///
    /// # Errors
    ///
    /// Returns an error if `half_width` is not positive and finite.
    pub fn with_half_width(self, half_width: f64) -> Result<Self> {
        Self::new(half_width, self.color)
    }
}
