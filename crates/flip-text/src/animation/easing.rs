//! Easing curves for transition timing.
//!
//! The named curves are the CSS timing functions; any other cubic bezier can
//! be supplied directly.
//!
//! ```
//! use flip_text::animation::EasingFunction;
//!
//! let eased = EasingFunction::EaseIn.evaluate(0.5);
//! assert!(eased < 0.5);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlipError;

/// Easing function mapping linear time (0.0 to 1.0) to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    #[default]
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Custom curve through control points (x1, y1) and (x2, y2).
    /// x values must lie in [0, 1].
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl EasingFunction {
    /// Evaluate at `t`, clamped to [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::Ease => Bezier::new(0.25, 0.1, 0.25, 1.0).y_at_x(t),
            Self::EaseIn => Bezier::new(0.42, 0.0, 1.0, 1.0).y_at_x(t),
            Self::EaseOut => Bezier::new(0.0, 0.0, 0.58, 1.0).y_at_x(t),
            Self::EaseInOut => Bezier::new(0.42, 0.0, 0.58, 1.0).y_at_x(t),
            Self::CubicBezier { x1, y1, x2, y2 } => Bezier::new(x1, y1, x2, y2).y_at_x(t),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease_in"),
            Self::EaseOut => f.write_str("ease_out"),
            Self::EaseInOut => f.write_str("ease_in_out"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic_bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl FromStr for EasingFunction {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Ok(Self::Linear),
            "ease" => Ok(Self::Ease),
            "ease_in" => Ok(Self::EaseIn),
            "ease_out" => Ok(Self::EaseOut),
            "ease_in_out" => Ok(Self::EaseInOut),
            _ => Err(FlipError::UnknownEasing(s.to_string())),
        }
    }
}

/// Cubic bezier from (0, 0) to (1, 1) with two free control points.
#[derive(Clone, Copy)]
struct Bezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl Bezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased output for input `x`, solving x(s) = x for the curve parameter.
    fn y_at_x(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let s = self.solve(x);
        coordinate(self.y1, self.y2, s)
    }

    fn solve(&self, x: f32) -> f32 {
        // Newton first; the curve is monotonic in x so bisection always converges
        let mut s = x;
        for _ in 0..8 {
            let err = coordinate(self.x1, self.x2, s) - x;
            if err.abs() < 1e-6 {
                return s;
            }
            let slope = derivative(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s = (s - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..32 {
            let value = coordinate(self.x1, self.x2, s);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }
}

/// One coordinate of the curve at parameter `s`: 3(1-s)²s·p1 + 3(1-s)s²·p2 + s³.
#[inline]
fn coordinate(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn derivative(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
