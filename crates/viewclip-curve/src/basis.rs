//! Cubic change-of-basis matrices.

use std::fmt;

use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

/// Polynomial basis of a cubic segment.
///
/// The matrix `M` turns four control values `g` into the coefficients
/// `[a, b, c, d] = M · g` of `f(t) = a·t³ + b·t² + c·t + d` on `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubicBasis {
    /// Bezier: interpolates the first and last control points.
    #[default]
    Bezier,
    /// Uniform cubic B-spline: C² across segments, interpolates none.
    #[serde(rename = "bspline")]
    BSpline,
}

impl CubicBasis {
    /// The 4x4 basis matrix.
    pub fn matrix(self) -> Matrix4<f64> {
        match self {
            CubicBasis::Bezier => Matrix4::new(
                -1.0, 3.0, -3.0, 1.0, //
                3.0, -6.0, 3.0, 0.0, //
                -3.0, 3.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0,
            ),
            CubicBasis::BSpline => {
                Matrix4::new(
                    -1.0, 3.0, -3.0, 1.0, //
                    3.0, -6.0, 3.0, 0.0, //
                    -3.0, 0.0, 3.0, 0.0, //
                    1.0, 4.0, 1.0, 0.0,
                ) / 6.0
            }
        }
    }

    /// Polynomial coefficients `[a, b, c, d]` for one coordinate.
    pub fn coefficients(self, values: [f64; 4]) -> [f64; 4] {
        let c = self.matrix() * Vector4::from(values);
        [c[0], c[1], c[2], c[3]]
    }
}

impl fmt::Display for CubicBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubicBasis::Bezier => f.write_str("bezier"),
            CubicBasis::BSpline => f.write_str("b-spline"),
        }
    }
}

/// Evaluate `a·t³ + b·t² + c·t + d` directly.
pub(crate) fn horner(c: &[f64; 4], t: f64) -> f64 {
    ((c[0] * t + c[1]) * t + c[2]) * t + c[3]
}
