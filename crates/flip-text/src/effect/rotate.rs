use serde::{Deserialize, Serialize};

use super::projection::Transform3D;
use super::{EffectFrame, FlipEffect, MIN_SCALE};
use crate::types::{Size, Visibility};

/// Perspective flip about the unit's horizontal centre line.
///
/// - Rotation: `±180° * (1 - progress)`, positive for insertion and negative
///   for removal, so an inserted unit unrotates from 180° to 0° and a removed
///   unit turns from 0° to -180°.
/// - Perspective: eye distance `max(width, height)`.
/// - Scale: `2 * progress` over the first half, full size afterwards. The
///   factor is clamped to [`MIN_SCALE`], so removal's last frame is tiny
///   rather than singular.
/// - An inserted unit stays hidden through the first half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotateEffect;

impl RotateEffect {
    /// Rotation about the x axis in radians.
    pub fn angle(progress: f64, insertion: bool) -> f64 {
        let half_turn = if insertion { 180.0 } else { -180.0 };
        (half_turn * (1.0 - progress)).to_radians()
    }

    /// Scale factor before clamping to [`MIN_SCALE`].
    pub fn raw_scale(progress: f64) -> f64 {
        if progress <= 0.5 { progress * 2.0 } else { 1.0 }
    }
}

impl FlipEffect for RotateEffect {
    fn frame(&self, progress: f64, insertion: bool, size: Size) -> EffectFrame {
        let progress = progress.clamp(0.0, 1.0);
        let rotation = Self::angle(progress, insertion);
        let scale = Self::raw_scale(progress).max(MIN_SCALE);
        let anchor = size.center();

        if insertion && progress <= 0.5 {
            // Collapse instead of rotating so the host gets a well-formed matrix
            return EffectFrame {
                rotation,
                scale,
                opacity: 1.0,
                anchor,
                visibility: Visibility::Hidden,
                projection: Transform3D::scale_uniform(MIN_SCALE),
            };
        }

        let projection = Transform3D::scale_uniform(scale)
            .then(&Transform3D::perspective(size.max_dimension()))
            .then(&Transform3D::rotate_x(rotation))
            .with_origin(anchor);

        EffectFrame {
            rotation,
            scale,
            opacity: 1.0,
            anchor,
            visibility: Visibility::Visible,
            projection,
        }
    }
}
