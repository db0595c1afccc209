#![warn(missing_docs)]

//! Cubic curve and surface rasterization for viewclip.
//!
//! Curves are evaluated in the normalized viewing plane, after their control
//! points have been projected. Each cubic segment is stepped with forward
//! differences (four additions per sample) and clipped against the viewing
//! square as the samples stream out, producing one polyline per visible run.
//!
//! # Key types
//!
//! - [`CubicBasis`]: Bezier or uniform B-spline change-of-basis matrix
//! - [`ForwardDifferences`]: incremental stepping of a single cubic
//! - [`IsoCurve`]: one isoparametric curve of a bicubic surface patch
//!
//! # Example
//!
//! ```
//! use viewclip_clip::CohenSutherland;
//! use viewclip_curve::{evaluate_curve, CubicBasis};
//! use viewclip_math::Point2;
//!
//! let control = [
//!     Point2::new(-0.5, -0.5),
//!     Point2::new(-0.5, 0.5),
//!     Point2::new(0.5, 0.5),
//!     Point2::new(0.5, -0.5),
//! ];
//! let runs = evaluate_curve(CubicBasis::Bezier, &control, 50, &CohenSutherland).unwrap();
//! assert_eq!(runs.len(), 1);
//! assert_eq!(runs[0].len(), 51);
//! ```

pub mod basis;
pub mod curve;
pub mod error;
pub mod forward;
pub mod surface;

pub use basis::CubicBasis;
pub use curve::{evaluate_composite, evaluate_curve, sample_segment, segments, Polyline};
pub use error::{CurveError, Result};
pub use forward::ForwardDifferences;
pub use surface::{
    evaluate_surface, evaluate_surface_with, IsoCurve, IsoDirection, SurfaceSampling, GRID_SIZE,
};
