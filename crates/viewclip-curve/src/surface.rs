//! Bicubic surface patches, drawn as two families of isoparametric curves.
//!
//! For each axis the control grid `G` is turned into coefficients
//! `C = Mu · G · Mvᵀ`, then into the difference matrix
//! `DD = E(δa) · C · E(δb)ᵀ`. Row 0 of `DD` holds the forward differences of
//! the current iso-curve; adding each row to the one above it advances to the
//! next curve of the family.
//!
//! Samples are filtered point by point against the viewing square. No border
//! crossings are computed here.

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use viewclip_clip::contains;
use viewclip_math::Point2;

use crate::{CubicBasis, CurveError, ForwardDifferences, Polyline, Result};

/// Control points per side of a patch. A patch has `GRID_SIZE²` points in
/// row-major order, rows running along `u`.
pub const GRID_SIZE: usize = 4;

/// How densely a patch is traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSampling {
    /// Subdivisions between iso-curves; each family has `curves + 1` curves.
    pub curves: usize,
    /// Steps along each iso-curve.
    pub steps: usize,
}

impl Default for SurfaceSampling {
    fn default() -> Self {
        Self { curves: 10, steps: 20 }
    }
}

/// Which parameter an iso-curve holds fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoDirection {
    /// `u` is fixed, the curve runs along `v`.
    U,
    /// `v` is fixed, the curve runs along `u`.
    V,
}

/// One isoparametric curve of a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoCurve {
    /// The parameter held fixed.
    pub direction: IsoDirection,
    /// Its value in `[0, 1]`.
    pub parameter: f64,
    /// Visible runs of samples.
    pub runs: Vec<Polyline>,
}

/// Trace a patch with `n` subdivisions between iso-curves and `n` steps along each.
pub fn evaluate_surface(
    basis_u: CubicBasis,
    basis_v: CubicBasis,
    grid: &[Point2],
    n: usize,
) -> Result<Vec<IsoCurve>> {
    evaluate_surface_with(basis_u, basis_v, grid, SurfaceSampling { curves: n, steps: n })
}

/// Trace a patch with explicit sampling.
///
/// Returns the `u`-fixed family followed by the `v`-fixed family.
pub fn evaluate_surface_with(
    basis_u: CubicBasis,
    basis_v: CubicBasis,
    grid: &[Point2],
    sampling: SurfaceSampling,
) -> Result<Vec<IsoCurve>> {
    if sampling.curves == 0 || sampling.steps == 0 {
        return Err(CurveError::ZeroSamples);
    }
    if grid.len() != GRID_SIZE * GRID_SIZE {
        return Err(CurveError::ControlPointCount {
            basis: basis_u,
            expected: "a 4x4 grid (16)",
            count: grid.len(),
        });
    }

    let mu = basis_u.matrix();
    let mv = basis_v.matrix();
    let coefficients = |axis: fn(&Point2) -> f64| {
        let g = Matrix4::from_fn(|i, j| axis(&grid[i * GRID_SIZE + j]));
        mu * g * mv.transpose()
    };
    let cx = coefficients(|p| p.x);
    let cy = coefficients(|p| p.y);

    let mut curves = trace_family(&cx, &cy, sampling, IsoDirection::U);
    curves.extend(trace_family(&cx.transpose(), &cy.transpose(), sampling, IsoDirection::V));

    log::trace!(
        "{basis_u}x{basis_v} surface: {} iso-curves, {} visible",
        curves.len(),
        curves.iter().filter(|c| !c.runs.is_empty()).count()
    );
    Ok(curves)
}

/// Forward-difference step matrix `E(δ)`.
fn step_matrix(delta: f64) -> Matrix4<f64> {
    let d2 = delta * delta;
    let d3 = d2 * delta;
    Matrix4::new(
        0.0, 0.0, 0.0, 1.0, //
        d3, d2, delta, 0.0, //
        6.0 * d3, 2.0 * d2, 0.0, 0.0, //
        6.0 * d3, 0.0, 0.0, 0.0,
    )
}

/// Advance a difference matrix to the next iso-curve.
fn shift_rows(m: &mut Matrix4<f64>) {
    for i in 0..3 {
        let sum = m.row(i) + m.row(i + 1);
        m.set_row(i, &sum);
    }
}

fn first_row(m: &Matrix4<f64>) -> [f64; 4] {
    [m[(0, 0)], m[(0, 1)], m[(0, 2)], m[(0, 3)]]
}

/// Trace the family whose fixed parameter indexes the rows of `cx`/`cy`.
fn trace_family(
    cx: &Matrix4<f64>,
    cy: &Matrix4<f64>,
    sampling: SurfaceSampling,
    direction: IsoDirection,
) -> Vec<IsoCurve> {
    let across = step_matrix(1.0 / sampling.curves as f64);
    let along = step_matrix(1.0 / sampling.steps as f64).transpose();
    let mut ddx = across * cx * along;
    let mut ddy = across * cy * along;

    let mut family = Vec::with_capacity(sampling.curves + 1);
    for k in 0..=sampling.curves {
        let mut fx = ForwardDifferences::from_differences(first_row(&ddx));
        let mut fy = ForwardDifferences::from_differences(first_row(&ddy));
        let mut runs = InsideRuns::default();
        for _ in 0..=sampling.steps {
            runs.push(Point2::new(fx.value(), fy.value()));
            fx.step();
            fy.step();
        }
        family.push(IsoCurve {
            direction,
            parameter: k as f64 / sampling.curves as f64,
            runs: runs.finish(),
        });
        shift_rows(&mut ddx);
        shift_rows(&mut ddy);
    }
    family
}

/// Groups consecutive inside samples; single-sample runs are dropped.
#[derive(Default)]
struct InsideRuns {
    runs: Vec<Polyline>,
    current: Polyline,
}

impl InsideRuns {
    fn push(&mut self, p: Point2) {
        if contains(&p) {
            self.current.push(p);
        } else {
            self.end_run();
        }
    }

    fn end_run(&mut self) {
        let run = std::mem::take(&mut self.current);
        if run.len() >= 2 {
            self.runs.push(run);
        }
    }

    fn finish(mut self) -> Vec<Polyline> {
        self.end_run();
        self.runs
    }
}
