//! Geometric objects and their cached clip results.

use serde::{Deserialize, Serialize};
use viewclip_clip::{clip_point, clip_wireframe, Face, LineClipper};
use viewclip_curve::{
    evaluate_composite, evaluate_surface_with, CubicBasis, CurveError, Polyline, GRID_SIZE,
};
use viewclip_math::{HomogeneousPoint, Point2, Point3, Transform};

use crate::{PipelineSettings, Result, SceneError, Window, WindowProjector};

/// What an object is, with any data beyond its control points.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// A single point.
    Point,
    /// A segment between two points.
    Line,
    /// Closed faces over a shared vertex list.
    Wireframe {
        /// Faces as vertex index rings.
        faces: Vec<Face>,
    },
    /// A composite cubic curve.
    Curve {
        /// Curve basis.
        basis: CubicBasis,
    },
    /// A bicubic patch over a 4x4 control grid.
    Surface {
        /// Basis along `u` (grid rows).
        basis_u: CubicBasis,
        /// Basis along `v` (grid columns).
        basis_v: CubicBasis,
    },
}

impl ObjectKind {
    /// Short lowercase name.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Point => "point",
            ObjectKind::Line => "line",
            ObjectKind::Wireframe { .. } => "wireframe",
            ObjectKind::Curve { .. } => "curve",
            ObjectKind::Surface { .. } => "surface",
        }
    }
}

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// A color from its components.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// A polyline or polygon over [`ClippedShape::points`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Indices into the shape's points.
    pub indices: Vec<usize>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

/// The visible part of an object in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedShape {
    /// Visible points, all inside `[-1, 1]²` up to round-off.
    pub points: Vec<Point2>,
    /// How the points connect.
    pub paths: Vec<Path>,
}

impl ClippedShape {
    fn from_runs(runs: impl IntoIterator<Item = Polyline>) -> Option<Self> {
        let mut shape = ClippedShape {
            points: Vec::new(),
            paths: Vec::new(),
        };
        for run in runs {
            let start = shape.points.len();
            shape.points.extend(run);
            shape.paths.push(Path {
                indices: (start..shape.points.len()).collect(),
                closed: false,
            });
        }
        (!shape.paths.is_empty()).then_some(shape)
    }
}

/// A named object in world space and its cached clip result.
///
/// Control points are stored with `w = 1`. The cache is derived from the
/// points, the window and the pipeline settings; whoever owns the object
/// recomputes it after any of those change.
#[derive(Debug, Clone)]
pub struct GeometricObject {
    name: String,
    kind: ObjectKind,
    points: Vec<HomogeneousPoint>,
    color: Color,
    clipped: Option<ClippedShape>,
}

impl GeometricObject {
    /// Build an object, validating its control points against its kind.
    ///
    /// The cache starts empty.
    pub fn new(
        name: impl Into<String>,
        kind: ObjectKind,
        points: Vec<HomogeneousPoint>,
        color: Color,
    ) -> Result<Self> {
        let points = points
            .iter()
            .map(|p| {
                p.normalized()
                    .filter(|q| q.x.is_finite() && q.y.is_finite() && q.z.is_finite())
                    .ok_or_else(|| {
                        SceneError::InvalidGeometry(format!("control point {p:?} is not finite"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        validate(&kind, points.len())?;
        Ok(Self {
            name: name.into(),
            kind,
            points,
            color,
            clipped: None,
        })
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object kind.
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Control points in world space.
    pub fn points(&self) -> &[HomogeneousPoint] {
        &self.points
    }

    /// Display color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the display color; the cache is unaffected.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The cached visible part, `None` when invisible.
    pub fn clipped(&self) -> Option<&ClippedShape> {
        self.clipped.as_ref()
    }

    /// Whether any part was visible at the last recompute.
    pub fn is_visible(&self) -> bool {
        self.clipped.is_some()
    }

    /// Average of the control points.
    pub fn center(&self) -> Point3 {
        let n = self.points.len() as f64;
        let sum = self
            .points
            .iter()
            .fold(Point3::origin().coords, |acc, p| acc + p.xyz().coords);
        Point3::from(sum / n)
    }

    pub(crate) fn transform(&mut self, t: &Transform) {
        for p in &mut self.points {
            let q = t.apply(p);
            *p = q.normalized().unwrap_or(q);
        }
    }

    /// Recompute the cache from the current window and settings.
    pub(crate) fn recompute(&mut self, window: &Window, settings: &PipelineSettings) -> Result<()> {
        let projector = WindowProjector::new(window, settings.projection);
        self.clipped = match projector.project(&self.points) {
            Some(projected) => self.clip(&projected, settings)?,
            None => None,
        };
        log::trace!(
            "{} {:?}: {}",
            self.kind.label(),
            self.name,
            if self.clipped.is_some() { "visible" } else { "hidden" }
        );
        Ok(())
    }

    fn clip(
        &self,
        projected: &[Point2],
        settings: &PipelineSettings,
    ) -> Result<Option<ClippedShape>> {
        let clipper = &settings.line_clipper;
        let shape = match &self.kind {
            ObjectKind::Point => projected
                .first()
                .and_then(|&p| clip_point(p))
                .map(|p| ClippedShape {
                    points: vec![p],
                    paths: vec![Path {
                        indices: vec![0],
                        closed: false,
                    }],
                }),
            ObjectKind::Line => match projected {
                [a, b] => clipper.clip_line(*a, *b).map(|(q1, q2)| ClippedShape {
                    points: vec![q1, q2],
                    paths: vec![Path {
                        indices: vec![0, 1],
                        closed: false,
                    }],
                }),
                _ => None,
            },
            ObjectKind::Wireframe { faces } => {
                let (points, faces) = clip_wireframe(projected, faces);
                let paths: Vec<Path> = faces
                    .into_iter()
                    .map(|indices| Path { indices, closed: true })
                    .collect();
                (!paths.is_empty()).then_some(ClippedShape { points, paths })
            }
            ObjectKind::Curve { basis } => {
                let runs = evaluate_composite(*basis, projected, settings.curve_samples, clipper)?;
                ClippedShape::from_runs(runs)
            }
            ObjectKind::Surface { basis_u, basis_v } => {
                let curves =
                    evaluate_surface_with(*basis_u, *basis_v, projected, settings.surface)?;
                ClippedShape::from_runs(curves.into_iter().flat_map(|c| c.runs))
            }
        };
        Ok(shape)
    }
}

fn validate(kind: &ObjectKind, count: usize) -> Result<()> {
    let invalid = |msg: String| Err(SceneError::InvalidGeometry(msg));
    match kind {
        ObjectKind::Point if count != 1 => {
            invalid(format!("a point needs 1 control point, got {count}"))
        }
        ObjectKind::Line if count != 2 => {
            invalid(format!("a line needs 2 control points, got {count}"))
        }
        ObjectKind::Wireframe { faces } => {
            if faces.is_empty() {
                return invalid("a wireframe needs at least one face".into());
            }
            for face in faces {
                if face.is_empty() {
                    return invalid("wireframe face is empty".into());
                }
                if let Some(&bad) = face.iter().find(|&&i| i >= count) {
                    return invalid(format!("face index {bad} out of range for {count} points"));
                }
            }
            Ok(())
        }
        ObjectKind::Curve { basis } if count < 4 => Err(CurveError::ControlPointCount {
            basis: *basis,
            expected: "at least 4",
            count,
        }
        .into()),
        ObjectKind::Surface { .. } if count != GRID_SIZE * GRID_SIZE => invalid(format!(
            "a surface needs {} control points, got {count}",
            GRID_SIZE * GRID_SIZE
        )),
        _ => Ok(()),
    }
}
