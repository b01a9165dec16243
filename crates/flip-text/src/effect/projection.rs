//! 3D projective transforms for per-character flip effects.
//!
//! `Transform3D` is a 4x4 homogeneous matrix acting on column vectors
//! `(x, y, z, 1)`. It covers what the flip effects need: translation,
//! scale, rotation about the x axis and a simple perspective term.
//!
//! # Usage
//!
//! ```
//! use flip_text::effect::projection::Transform3D;
//!
//! // Quarter turn about the horizontal axis through the centre of a 40x60 unit
//! let flip = Transform3D::rotate_x_deg(90.0).with_origin((20.0, 30.0));
//! let (x, y) = flip.project_point(20.0, 0.0).unwrap();
//! assert!((x - 20.0).abs() < 1e-9);
//! assert!((y - 30.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Points whose homogeneous `w` falls below this are treated as unprojectable.
const W_EPSILON: f64 = 1e-9;

/// A 4x4 projective transformation matrix, row-major.
///
/// ```text
/// | m00 m01 m02 m03 |   | x |
/// | m10 m11 m12 m13 | * | y |
/// | m20 m21 m22 m23 |   | z |
/// | m30 m31 m32 m33 |   | 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub m: [[f64; 4]; 4],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create an identity transform (no change).
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a translation transform.
    pub fn translate(tx: f64, ty: f64, tz: f64) -> Self {
        let mut t = Self::IDENTITY;
        t.m[0][3] = tx;
        t.m[1][3] = ty;
        t.m[2][3] = tz;
        t
    }

    /// Create a scale transform in the xy plane (z is left untouched).
    pub fn scale(sx: f64, sy: f64) -> Self {
        let mut t = Self::IDENTITY;
        t.m[0][0] = sx;
        t.m[1][1] = sy;
        t
    }

    /// Create a uniform xy scale transform.
    pub fn scale_uniform(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Create a rotation about the x axis, in radians.
    ///
    /// Positive angles tip the top edge of the plane away from the viewer
    /// (towards negative z).
    pub fn rotate_x(angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        let mut t = Self::IDENTITY;
        t.m[1][1] = cos;
        t.m[1][2] = -sin;
        t.m[2][1] = sin;
        t.m[2][2] = cos;
        t
    }

    /// Create a rotation about the x axis, in degrees.
    pub fn rotate_x_deg(angle_deg: f64) -> Self {
        Self::rotate_x(angle_deg.to_radians())
    }

    /// Create a perspective transform with the eye at distance `depth`.
    ///
    /// Sets `m32 = -1 / depth`, so a point at depth `z` is divided by
    /// `1 - z / depth`. A non-positive depth yields the identity.
    pub fn perspective(depth: f64) -> Self {
        let mut t = Self::IDENTITY;
        if depth > 0.0 {
            t.m[3][2] = -1.0 / depth;
        }
        t
    }

    /// Compose this transform with another (this * other).
    ///
    /// The resulting transform applies `other` first, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[r][k] * other.m[k][c]).sum();
            }
        }
        Self { m }
    }

    /// Apply the transform to a homogeneous point.
    pub fn apply(&self, p: [f64; 4]) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (r, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| self.m[r][k] * p[k]).sum();
        }
        out
    }

    /// Project a point of the z = 0 plane back onto that plane.
    ///
    /// Returns `None` when the point lands at or behind the eye.
    pub fn project_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let [px, py, _, w] = self.apply([x, y, 0.0, 1.0]);
        (w > W_EPSILON).then(|| (px / w, py / w))
    }

    /// Calculate the determinant.
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        (0..4)
            .map(|c| {
                let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[0][c] * minor3(m, 0, c)
            })
            .sum()
    }

    /// Check if this transform is invertible.
    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > f64::EPSILON * f64::EPSILON
    }

    /// Apply this transform around `origin`, a point of the unit's plane.
    ///
    /// Translates the origin to (0, 0), applies the transform, then translates back.
    pub fn with_origin(&self, origin: (f64, f64)) -> Self {
        let (ox, oy) = origin;
        Self::translate(ox, oy, 0.0)
            .then(self)
            .then(&Self::translate(-ox, -oy, 0.0))
    }
}

/// Determinant of the 3x3 minor left after removing `row` and `col`.
fn minor3(m: &[[f64; 4]; 4], row: usize, col: usize) -> f64 {
    let mut sub = [[0.0; 3]; 3];
    let rows = (0..4).filter(|&r| r != row);
    for (sr, r) in rows.enumerate() {
        let cols = (0..4).filter(|&c| c != col);
        for (sc, c) in cols.enumerate() {
            sub[sr][sc] = m[r][c];
        }
    }
    sub[0][0] * (sub[1][1] * sub[2][2] - sub[1][2] * sub[2][1])
        - sub[0][1] * (sub[1][0] * sub[2][2] - sub[1][2] * sub[2][0])
        + sub[0][2] * (sub[1][0] * sub[2][1] - sub[1][1] * sub[2][0])
}
