use serde::{Deserialize, Serialize};

use super::projection::Transform3D;
use super::{EffectFrame, FlipEffect};
use crate::types::{Size, Visibility};

/// Progress an inserted unit must pass before it becomes visible.
pub const FADE_IN_THRESHOLD: f64 = 0.8;

/// Flat flip with a shrinking scale and a late fade-in.
///
/// - Opacity: 0 for insertion up to [`FADE_IN_THRESHOLD`], otherwise
///   `2 * progress`, clamped to `[0, 1]`.
/// - Rotation: `progress * 180°` about the x axis, projected orthographically.
/// - Scale: `(1 - progress) * 0.5 + 1`, from 1.5x down to normal size.
///
/// Note that the identity state (`progress = 1`) is a half turn, which draws
/// the glyph mirrored top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotateScaleEffect;

impl RotateScaleEffect {
    pub fn opacity(progress: f64, insertion: bool) -> f64 {
        if insertion && progress <= FADE_IN_THRESHOLD {
            0.0
        } else {
            (progress * 2.0).clamp(0.0, 1.0)
        }
    }

    pub fn angle(progress: f64) -> f64 {
        (progress * 180.0).to_radians()
    }

    pub fn scale(progress: f64) -> f64 {
        (1.0 - progress) * 0.5 + 1.0
    }
}

impl FlipEffect for RotateScaleEffect {
    fn frame(&self, progress: f64, insertion: bool, size: Size) -> EffectFrame {
        let progress = progress.clamp(0.0, 1.0);
        let opacity = Self::opacity(progress, insertion);
        let rotation = Self::angle(progress);
        let scale = Self::scale(progress);
        let anchor = size.center();

        let projection = Transform3D::scale_uniform(scale)
            .then(&Transform3D::rotate_x(rotation))
            .with_origin(anchor);

        EffectFrame {
            rotation,
            scale,
            opacity,
            anchor,
            visibility: if opacity > 0.0 {
                Visibility::Visible
            } else {
                Visibility::Hidden
            },
            projection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;
    const UNIT: Size = Size::new(30.0, 50.0);

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn samples() -> impl Iterator<Item = f64> {
        (0..=100).map(|i| i as f64 / 100.0)
    }

    #[test]
    fn test_insertion_endpoints() {
        let start = RotateScaleEffect.frame(0.0, true, UNIT);
        assert_eq!(start.opacity, 0.0);
        assert!(approx_eq(start.scale, 1.5));
        assert!(approx_eq(start.rotation, 0.0));
        assert!(!start.is_visible());

        let end = RotateScaleEffect.frame(1.0, true, UNIT);
        // Raw formula gives 2.0 here
        assert_eq!(end.opacity, 1.0);
        assert!(approx_eq(end.scale, 1.0));
        assert!(approx_eq(end.rotation, PI));
    }

    #[test]
    fn test_opacity_clamped_everywhere() {
        for p in samples() {
            for insertion in [true, false] {
                let opacity = RotateScaleEffect.frame(p, insertion, UNIT).opacity;
                assert!((0.0..=1.0).contains(&opacity), "p={p} opacity={opacity}");
            }
        }
    }

    #[test]
    fn test_insertion_fades_in_late() {
        assert_eq!(RotateScaleEffect::opacity(FADE_IN_THRESHOLD, true), 0.0);
        assert_eq!(RotateScaleEffect::opacity(0.81, true), 1.0);
        // Removal fades over the last half of its run (progress 0.5 down to 0)
        assert!(approx_eq(RotateScaleEffect::opacity(0.3, false), 0.6));
        assert_eq!(RotateScaleEffect::opacity(0.7, false), 1.0);
    }

    #[test]
    fn test_rotation_monotonic() {
        let mut prev = f64::NEG_INFINITY;
        for p in samples() {
            let rotation = RotateScaleEffect.frame(p, true, UNIT).rotation;
            assert!(rotation > prev, "p={p}");
            assert_eq!(rotation, RotateScaleEffect.frame(p, false, UNIT).rotation);
            prev = rotation;
        }
    }

    #[test]
    fn test_continuous_at_half() {
        let a = RotateScaleEffect.frame(0.5 - 1e-7, false, UNIT);
        let b = RotateScaleEffect.frame(0.5 + 1e-7, false, UNIT);
        assert!((a.scale - b.scale).abs() < 1e-6);
        assert!((a.rotation - b.rotation).abs() < 1e-6);
        assert!((a.opacity - b.opacity).abs() < 1e-6);
    }

    #[test]
    fn test_flat_projection_keeps_width() {
        // No perspective: both horizontal edges project to the same width.
        let frame = RotateScaleEffect.frame(0.25, false, UNIT);
        let (tl, _) = frame.projection.project_point(0.0, 0.0).unwrap();
        let (tr, _) = frame.projection.project_point(30.0, 0.0).unwrap();
        let (bl, _) = frame.projection.project_point(0.0, 50.0).unwrap();
        let (br, _) = frame.projection.project_point(30.0, 50.0).unwrap();
        assert!(approx_eq(tr - tl, br - bl));
        assert!(approx_eq(tr - tl, 30.0 * frame.scale));

        let (cx, cy) = frame.projection.project_point(15.0, 25.0).unwrap();
        assert!(approx_eq(cx, 15.0) && approx_eq(cy, 25.0));
    }

    #[test]
    fn test_identity_state_is_mirrored() {
        let frame = RotateScaleEffect.frame(1.0, true, UNIT);
        let (_, top) = frame.projection.project_point(15.0, 0.0).unwrap();
        assert!((top - 50.0).abs() < 1e-6);
    }
}
