//! Single and composite cubic curves, clipped as they are sampled.

use viewclip_clip::{contains, snap_to_border, LineClipper};
use viewclip_math::Point2;

use crate::{CubicBasis, CurveError, ForwardDifferences, Result};

/// A connected run of visible samples.
pub type Polyline = Vec<Point2>;

/// Forward-difference stepper over both coordinates of a 2D cubic.
struct Stepper {
    x: ForwardDifferences,
    y: ForwardDifferences,
}

impl Stepper {
    fn new(basis: CubicBasis, control: &[Point2; 4], n: usize) -> Self {
        let delta = 1.0 / n as f64;
        let cx = basis.coefficients(control.map(|p| p.x));
        let cy = basis.coefficients(control.map(|p| p.y));
        Self {
            x: ForwardDifferences::for_cubic(&cx, delta),
            y: ForwardDifferences::for_cubic(&cy, delta),
        }
    }

    fn point(&self) -> Point2 {
        Point2::new(self.x.value(), self.y.value())
    }

    fn step(&mut self) {
        self.x.step();
        self.y.step();
    }
}

/// Splits a sample stream into visible runs.
///
/// Crossings between consecutive samples are found with the line clipper.
/// Two consecutive outside samples are dropped even if the chord between them
/// grazes the square: only one entry and one exit are detected per excursion.
pub(crate) struct RunBuilder<'a, C: LineClipper + ?Sized> {
    clipper: &'a C,
    runs: Vec<Polyline>,
    current: Polyline,
    prev: Option<Point2>,
}

impl<'a, C: LineClipper + ?Sized> RunBuilder<'a, C> {
    pub(crate) fn new(clipper: &'a C) -> Self {
        Self {
            clipper,
            runs: Vec::new(),
            current: Vec::new(),
            prev: None,
        }
    }

    pub(crate) fn push(&mut self, sample: Point2) {
        let sample = snap_to_border(sample);
        let inside = contains(&sample);
        match self.prev {
            None => {
                if inside {
                    self.current.push(sample);
                }
            }
            Some(prev) => match (contains(&prev), inside) {
                (true, true) => self.current.push(sample),
                (true, false) => {
                    // leaving from a sample on the border crosses at that sample
                    if let Some((_, exit)) = self.clipper.clip_line(prev, sample) {
                        if exit != prev {
                            self.current.push(exit);
                        }
                    }
                    self.end_run();
                }
                (false, true) => {
                    if let Some((entry, _)) = self.clipper.clip_line(prev, sample) {
                        if entry != sample {
                            self.current.push(entry);
                        }
                    }
                    self.current.push(sample);
                }
                (false, false) => {}
            },
        }
        self.prev = Some(sample);
    }

    fn end_run(&mut self) {
        let run = std::mem::take(&mut self.current);
        if run.len() >= 2 {
            self.runs.push(run);
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Polyline> {
        self.end_run();
        self.runs
    }
}

fn check_samples(n: usize) -> Result<()> {
    if n == 0 {
        return Err(CurveError::ZeroSamples);
    }
    Ok(())
}

/// Sample one cubic segment at `t = i/n`, `i = 0..=n`, without clipping.
pub fn sample_segment(basis: CubicBasis, control: &[Point2; 4], n: usize) -> Result<Vec<Point2>> {
    check_samples(n)?;
    let mut stepper = Stepper::new(basis, control, n);
    Ok((0..=n)
        .map(|_| {
            let p = stepper.point();
            stepper.step();
            p
        })
        .collect())
}

/// Evaluate one cubic segment with `n` steps and return its visible runs.
///
/// Each run starts and ends either at a sample inside the square or at the
/// crossing where the curve enters or leaves it.
pub fn evaluate_curve<C: LineClipper + ?Sized>(
    basis: CubicBasis,
    control: &[Point2; 4],
    n: usize,
    clipper: &C,
) -> Result<Vec<Polyline>> {
    check_samples(n)?;
    Ok(evaluate_segments(basis, std::slice::from_ref(control), n, clipper))
}

/// Evaluate a composite curve with `n` steps per segment.
///
/// See [`segments`] for how control points are grouped. Runs are not split at
/// segment joins.
pub fn evaluate_composite<C: LineClipper + ?Sized>(
    basis: CubicBasis,
    points: &[Point2],
    n: usize,
    clipper: &C,
) -> Result<Vec<Polyline>> {
    check_samples(n)?;
    let segs = segments(basis, points)?;
    Ok(evaluate_segments(basis, &segs, n, clipper))
}

fn evaluate_segments<C: LineClipper + ?Sized>(
    basis: CubicBasis,
    segs: &[[Point2; 4]],
    n: usize,
    clipper: &C,
) -> Vec<Polyline> {
    let mut runs = RunBuilder::new(clipper);
    for (k, seg) in segs.iter().enumerate() {
        let mut stepper = Stepper::new(basis, seg, n);
        for i in 0..=n {
            // a later segment starts where the previous one ended
            if k == 0 || i > 0 {
                runs.push(stepper.point());
            }
            stepper.step();
        }
    }
    let runs = runs.finish();
    log::trace!("{basis} curve: {} segment(s), {} visible run(s)", segs.len(), runs.len());
    runs
}

/// Group the control points of a composite curve into cubic segments.
///
/// - Bezier: `4 + 2k` points. Every later segment starts at the previous end
///   point, takes the previous third point mirrored through it as its second
///   point (C¹ join), and consumes two new points. A trailing odd point is
///   ignored.
/// - B-spline: at least 4 points, one segment per window of four.
pub fn segments(basis: CubicBasis, points: &[Point2]) -> Result<Vec<[Point2; 4]>> {
    let [p0, p1, p2, p3, rest @ ..] = points else {
        return Err(CurveError::ControlPointCount {
            basis,
            expected: "at least 4",
            count: points.len(),
        });
    };

    match basis {
        CubicBasis::Bezier => {
            let mut prev = [*p0, *p1, *p2, *p3];
            let mut out = vec![prev];
            let pairs = rest.chunks_exact(2);
            if !pairs.remainder().is_empty() {
                log::warn!(
                    "bezier curve with {} control points: ignoring the last one",
                    points.len()
                );
            }
            for pair in pairs {
                let start = prev[3];
                let next = [start, start + (prev[3] - prev[2]), pair[0], pair[1]];
                out.push(next);
                prev = next;
            }
            Ok(out)
        }
        CubicBasis::BSpline => Ok(points.windows(4).map(|w| [w[0], w[1], w[2], w[3]]).collect()),
    }
}
