//! Layout configuration and viewport.

use crate::error::{LayoutError, Result};

/// Tuning constants for the collision-resolving tree layout.
///
/// All lengths are derived from the viewport, so the same configuration
/// scales with the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Fraction of the viewport height shared out between tree levels.
    pub level_height_ratio: f32,
    /// Upper bound on the vertical distance between consecutive levels.
    pub max_level_height: f32,
    /// Node radius as a fraction of the viewport width.
    pub radius_ratio: f32,
    /// Initial parent→child horizontal offset as a fraction of the width.
    pub x_offset_ratio: f32,
    /// Root y as a fraction of the viewport height.
    pub top_margin_ratio: f32,
    /// Extra spacing beyond tangency when narrowing siblings.
    pub spacing_margin: f32,
    /// Root-widening restarts allowed before giving up.
    ///
    /// Every restart doubles `x_offset`. Coordinates are `f32`, so past
    /// roughly 2^16 times the initial offset neighbouring positions stop
    /// being distinguishable at pixel scale and distinct nodes can land on
    /// the same coordinates.
    pub max_restarts: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_height_ratio: 0.9,
            max_level_height: 40.0,
            radius_ratio: 0.024,
            x_offset_ratio: 0.11,
            top_margin_ratio: 0.05,
            spacing_margin: 4.0,
            max_restarts: 16,
        }
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub(crate) fn validate(self) -> Result<Self> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "viewport width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(LayoutError::InvalidInput(format!(
                "viewport height must be positive, got {}",
                self.height
            )));
        }
        Ok(self)
    }
}
