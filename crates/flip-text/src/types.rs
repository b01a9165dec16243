//! Geometry and visibility types shared by the renderer and the effects.

use serde::{Deserialize, Serialize};

/// Size of one rendered character unit in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre point relative to the unit's top-left corner.
    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// The larger of the two dimensions.
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Visibility state for a character unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Unit is drawn.
    #[default]
    Visible,
    /// Unit keeps its slot in the row but is not drawn.
    Hidden,
}
