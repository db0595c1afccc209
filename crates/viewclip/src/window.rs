//! The viewing window.

use viewclip_math::{HomogeneousPoint, Point3, Transform, Vec3};

use crate::{ProjectionMode, Result, SceneError};

/// A square window onto world space.
///
/// The window is a square of side `size` centered on `center`, lying in the
/// plane spanned by the first two axes of `orientation`. Its border maps onto
/// the normalized square `[-1, 1]²`. The eye sits `cop_distance` half-sizes
/// behind the window plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    center: Point3,
    orientation: Transform,
    size: f64,
    cop_distance: f64,
}

impl Default for Window {
    /// A 500-unit window centered on `(250, 250, 0)`.
    fn default() -> Self {
        Self {
            center: Point3::new(250.0, 250.0, 0.0),
            orientation: Transform::identity(),
            size: 500.0,
            cop_distance: 1.0,
        }
    }
}

impl Window {
    /// Create an unrotated window.
    pub fn new(center: Point3, size: f64) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            center,
            orientation: Transform::identity(),
            size,
            cop_distance: 1.0,
        })
    }

    /// Window center in world space.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Side length in world units.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Accumulated rotation.
    pub fn orientation(&self) -> &Transform {
        &self.orientation
    }

    /// Eye distance in half-window units.
    pub fn cop_distance(&self) -> f64 {
        self.cop_distance
    }

    /// Set the eye distance.
    pub fn set_cop_distance(&mut self, distance: f64) -> Result<()> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(SceneError::InvalidSettings(format!(
                "cop_distance must be positive, got {distance}"
            )));
        }
        self.cop_distance = distance;
        Ok(())
    }

    /// The window's right, up and view axes in world space.
    pub fn axes(&self) -> (Vec3, Vec3, Vec3) {
        let axis = |x, y, z| {
            let v = self.orientation.apply(&HomogeneousPoint::with_weight(x, y, z, 0.0));
            Vec3::new(v.x, v.y, v.z)
        };
        (axis(1.0, 0.0, 0.0), axis(0.0, 1.0, 0.0), axis(0.0, 0.0, 1.0))
    }

    /// Move along the world axes.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.center += Vec3::new(dx, dy, dz);
        log::debug!("window moved to {:?}", self.center);
    }

    /// Move within the window's own plane.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let (right, up, _) = self.axes();
        self.center += right * dx + up * dy;
        log::debug!("window panned to {:?}", self.center);
    }

    /// Zoom by resizing the window; factors below 1 zoom in.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(SceneError::InvalidScale(factor));
        }
        let size = self.size * factor;
        check_size(size)?;
        self.size = size;
        log::debug!("window resized to {}", self.size);
        Ok(())
    }

    /// Rotate about the window center.
    pub fn rotate(&mut self, x_angle: f64, y_angle: f64, z_angle: f64) {
        self.orientation = self.orientation.then(&Transform::rotation(x_angle, y_angle, z_angle));
        log::debug!("window rotated by ({x_angle}, {y_angle}, {z_angle})");
    }

    /// Rotate about an arbitrary point, moving the center along.
    pub fn rotate_about(&mut self, x_angle: f64, y_angle: f64, z_angle: f64, point: &Point3) {
        let rotation = Transform::rotation(x_angle, y_angle, z_angle);
        self.center = rotation.around_point(point).apply_point(&self.center);
        self.orientation = self.orientation.then(&rotation);
        log::debug!(
            "window rotated by ({x_angle}, {y_angle}, {z_angle}) about {point:?}, center {:?}",
            self.center
        );
    }

    /// World space to the window's normalized frame.
    ///
    /// In perspective mode the eye ends up at the origin and the window plane at
    /// `z = cop_distance`, before the perspective divide. In parallel mode the
    /// window plane is `z = 0`.
    pub fn view_transform(&self, mode: ProjectionMode) -> Transform {
        let to_origin = Transform::translation(-self.center.x, -self.center.y, -self.center.z);
        // orientation only ever accumulates rotations, so its inverse is its transpose
        let unrotate = Transform {
            matrix: self.orientation.matrix.transpose(),
        };
        let normalize = Transform::uniform_scale(2.0 / self.size);

        let aligned = to_origin.then(&unrotate);
        match mode {
            ProjectionMode::Perspective => aligned
                .then(&Transform::translation(0.0, 0.0, self.cop_distance * self.size / 2.0))
                .then(&normalize),
            ProjectionMode::Parallel => aligned.then(&normalize),
        }
    }
}

fn check_size(size: f64) -> Result<()> {
    if !(size.is_finite() && size > 0.0) {
        return Err(SceneError::DegenerateWindow(size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_degenerate_sizes_are_rejected() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Window::new(Point3::origin(), size),
                Err(SceneError::DegenerateWindow(_))
            ));
        }
    }

    #[test]
    fn test_scale() {
        let mut window = Window::new(Point3::origin(), 10.0).unwrap();
        window.scale(0.5).unwrap();
        assert_eq!(window.size(), 5.0);
        assert!(matches!(window.scale(0.0), Err(SceneError::InvalidScale(_))));
        assert!(matches!(window.scale(-2.0), Err(SceneError::InvalidScale(_))));
        assert_eq!(window.size(), 5.0);
    }

    #[test]
    fn test_pan_follows_orientation() {
        let mut window = Window::new(Point3::origin(), 10.0).unwrap();
        window.rotate(0.0, 0.0, FRAC_PI_2);
        window.pan(1.0, 0.0);
        // right axis now points along world +y
        assert_abs_diff_eq!(window.center().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(window.center().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_moves_center() {
        let mut window = Window::new(Point3::new(1.0, 0.0, 0.0), 10.0).unwrap();
        window.rotate_about(0.0, 0.0, FRAC_PI_2, &Point3::origin());
        assert_abs_diff_eq!(window.center().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(window.center().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_view_transform_maps_border_to_unit_square() {
        let window = Window::new(Point3::new(250.0, 250.0, 0.0), 500.0).unwrap();
        let t = window.view_transform(ProjectionMode::Parallel);
        let corner = t.apply_point(&Point3::new(500.0, 500.0, 0.0));
        assert_abs_diff_eq!(corner.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(corner.y, 1.0, epsilon = 1e-12);

        let t = window.view_transform(ProjectionMode::Perspective);
        let center = t.apply_point(&Point3::new(250.0, 250.0, 0.0));
        assert_abs_diff_eq!(center.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cop_distance_must_be_positive() {
        let mut window = Window::default();
        assert!(window.set_cop_distance(0.0).is_err());
        window.set_cop_distance(2.0).unwrap();
        assert_eq!(window.cop_distance(), 2.0);
    }
}
