//! 3×3 affine transforms in homogeneous 2D coordinates.
//!
//! Matrices are row-major under the row-vector convention: a point multiplies
//! on the left (`v' = v·M`) and translation components live in the bottom
//! row. Under this convention `a.multiply(b)` applies `a` first, then `b`,
//! and the raw nine floats upload to a GL `mat3` uniform untransposed.

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;

use serde::{Deserialize, Serialize};

/// A 3×3 affine transform, row-major.
///
/// The fixed-size array makes a malformed matrix unrepresentable; there is no
/// runtime shape check anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3(pub [f64; 9]);

impl Mat3 {
    /// The identity transform.
    pub const IDENTITY: Mat3 = Mat3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Returns the identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Translation by `(tx, ty)`.
    #[must_use]
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 1.0])
    }

    /// Counter-clockwise rotation by `degrees` about the origin.
    #[must_use]
    pub fn rotation_deg(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self([cos, sin, 0.0, -sin, cos, 0.0, 0.0, 0.0, 1.0])
    }

    /// Non-uniform scale about the origin.
    #[must_use]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
    }

    /// Standard 3×3 product: `out[i][j] = Σ_k self[i][k] · other[k][j]`.
    ///
    /// Not commutative. Under the row-vector convention the result applies
    /// `self` first, then `other`.
    #[must_use]
    pub fn multiply(self, other: Mat3) -> Mat3 {
        let a = self.0;
        let b = other.0;
        let mut out = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for (k, row) in b.chunks_exact(3).enumerate() {
                    sum += a[i * 3 + k] * row[j];
                }
                out[i * 3 + j] = sum;
            }
        }
        Mat3(out)
    }

    /// Apply the transform to a point: `[x y 1] · M`.
    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = self.0;
        (
            x * m[0] + y * m[3] + m[6],
            x * m[1] + y * m[4] + m[7],
        )
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
