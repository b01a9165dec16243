//! Per-character flip effects.
//!
//! An effect is a pure function of a transition's `progress` (0.0 = active
//! state, 1.0 = identity state) and whether the unit is being inserted or
//! removed. Each call produces one [`EffectFrame`] that the host applies to
//! the unit's geometry.
//!
//! Two effects are available, selected through [`FlipTransition`]:
//! - [`RotateEffect`]: perspective flip about the unit's horizontal centre line,
//!   growing from nothing during the first half.
//! - [`RotateScaleEffect`]: flat flip combined with a shrinking scale and a
//!   late fade-in.

pub mod projection;
mod rotate;
mod rotate_scale;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlipError;
use crate::types::{Size, Visibility};
use projection::Transform3D;

pub use rotate::RotateEffect;
pub use rotate_scale::RotateScaleEffect;

/// Smallest scale factor an effect will emit.
///
/// Exact zero scales make the projection singular, which some renderers turn
/// into NaNs. Effects clamp to this instead.
pub const MIN_SCALE: f64 = 1e-6;

/// One sampled frame of a flip effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectFrame {
    /// Rotation about the horizontal (x) axis, in radians.
    pub rotation: f64,
    /// Uniform scale factor, never below [`MIN_SCALE`].
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation that moves the unit's centre to the origin and back
    /// around the rotation and scale.
    pub anchor: (f64, f64),
    pub visibility: Visibility,
    /// Full projective transform combining all of the above.
    pub projection: Transform3D,
}

impl Default for EffectFrame {
    fn default() -> Self {
        Self::identity()
    }
}

impl EffectFrame {
    /// A frame that leaves the unit untouched.
    pub fn identity() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            anchor: (0.0, 0.0),
            visibility: Visibility::Visible,
            projection: Transform3D::identity(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible && self.opacity > 0.0
    }

    /// Opacity the host should draw with, accounting for visibility.
    pub fn effective_opacity(&self) -> f64 {
        match self.visibility {
            Visibility::Visible => self.opacity,
            Visibility::Hidden => 0.0,
        }
    }
}

/// A transition effect that can be sampled at any progress.
pub trait FlipEffect {
    /// Sample the effect.
    ///
    /// `progress` is clamped to `[0, 1]`. `size` is the unit's laid-out size,
    /// used to anchor the transform at the unit's centre.
    fn frame(&self, progress: f64, insertion: bool, size: Size) -> EffectFrame;
}

/// Available transition kinds for character units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipTransition {
    /// Units appear and disappear without animation.
    None,
    /// Perspective flip, see [`RotateEffect`].
    #[default]
    Rotate,
    /// Flat flip with scale and opacity, see [`RotateScaleEffect`].
    RotateScale,
}

impl FlipTransition {
    /// The effect backing this transition, if any.
    pub fn effect(&self) -> Option<&'static dyn FlipEffect> {
        match self {
            Self::None => None,
            Self::Rotate => Some(&RotateEffect),
            Self::RotateScale => Some(&RotateScaleEffect),
        }
    }

    /// Whether units using this transition animate at all.
    pub fn is_animated(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Sample the transition; `None` always yields the identity frame.
    pub fn frame(&self, progress: f64, insertion: bool, size: Size) -> EffectFrame {
        match self.effect() {
            Some(effect) => effect.frame(progress, insertion, size),
            None => EffectFrame::identity(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rotate => "rotate",
            Self::RotateScale => "rotate_scale",
        }
    }
}

impl fmt::Display for FlipTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlipTransition {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Self::None),
            "rotate" => Ok(Self::Rotate),
            "rotate_scale" => Ok(Self::RotateScale),
            _ => Err(FlipError::UnknownTransition(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_names_roundtrip() {
        for kind in [
            FlipTransition::None,
            FlipTransition::Rotate,
            FlipTransition::RotateScale,
        ] {
            assert_eq!(kind.name().parse::<FlipTransition>().unwrap(), kind);
        }
        assert_eq!(
            "Rotate-Scale".parse::<FlipTransition>().unwrap(),
            FlipTransition::RotateScale
        );
        assert!(matches!(
            "spin".parse::<FlipTransition>(),
            Err(FlipError::UnknownTransition(name)) if name == "spin"
        ));
    }

    #[test]
    fn test_none_is_identity() {
        let frame = FlipTransition::None.frame(0.0, true, Size::new(10.0, 20.0));
        assert_eq!(frame, EffectFrame::identity());
        assert!(!FlipTransition::None.is_animated());
        assert!(FlipTransition::None.effect().is_none());
    }

    #[test]
    fn test_default_transition_is_rotate() {
        assert_eq!(FlipTransition::default(), FlipTransition::Rotate);
    }

    #[test]
    fn test_effective_opacity_respects_visibility() {
        let mut frame = EffectFrame::identity();
        assert_eq!(frame.effective_opacity(), 1.0);
        frame.visibility = Visibility::Hidden;
        assert_eq!(frame.effective_opacity(), 0.0);
        assert!(!frame.is_visible());
    }
}
