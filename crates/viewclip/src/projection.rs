//! World space to the normalized viewing plane.

use viewclip_math::{HomogeneousPoint, Point2, Tolerance, Transform};

use crate::{ProjectionMode, Window};

/// Projects control points through a window.
///
/// Points on the window's border land on the border of `[-1, 1]²`.
#[derive(Debug, Clone)]
pub struct WindowProjector {
    mode: ProjectionMode,
    view: Transform,
    divide: Transform,
}

impl WindowProjector {
    /// Projector for the window's current state.
    pub fn new(window: &Window, mode: ProjectionMode) -> Self {
        Self {
            mode,
            view: window.view_transform(mode),
            divide: Transform::perspective(window.cop_distance()),
        }
    }

    /// Projection mode in use.
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Project one point.
    ///
    /// In perspective mode a point at or behind the eye has no image. Its
    /// coordinates are returned unclipped otherwise.
    pub fn project_point(&self, p: &HomogeneousPoint) -> Option<Point2> {
        let view = self.view.apply(p).normalized()?;
        match self.mode {
            ProjectionMode::Parallel => Some(Point2::new(view.x, view.y)),
            ProjectionMode::Perspective => {
                if view.z <= Tolerance::DEFAULT.linear {
                    return None;
                }
                let image = self.divide.apply(&view).resolve()?;
                Some(Point2::new(image.x, image.y))
            }
        }
    }

    /// Project every point, or nothing at all.
    ///
    /// A single point without an image rejects the whole sequence; primitives
    /// are not split at the eye plane.
    pub fn project(&self, points: &[HomogeneousPoint]) -> Option<Vec<Point2>> {
        let projected: Option<Vec<Point2>> = points.iter().map(|p| self.project_point(p)).collect();
        if projected.is_none() {
            log::trace!("projection rejected: a point lies at or behind the eye");
        }
        projected
    }
}
