//! Error types for curve and surface evaluation.

use thiserror::Error;

use crate::CubicBasis;

/// Errors that can occur while evaluating curves and surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// A sample count of zero was requested.
    #[error("sample count must be at least 1")]
    ZeroSamples,

    /// The number of control points does not fit the basis.
    #[error("{basis} needs {expected}, got {count} control points")]
    ControlPointCount {
        /// Basis being evaluated.
        basis: CubicBasis,
        /// Human-readable requirement.
        expected: &'static str,
        /// Number of control points supplied.
        count: usize,
    },
}

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
