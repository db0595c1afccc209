#![warn(missing_docs)]

//! Math types for the viewclip pipeline.
//!
//! Thin wrappers around nalgebra: homogeneous points, 4x4 transforms in the
//! row-vector convention (`p' = p · M`), and tolerance constants.

use nalgebra::{Matrix4, RowVector4};

/// A point in 3D world space.
pub type Point3 = nalgebra::Point3<f64>;

/// A point in the 2D normalized viewing plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A point in homogeneous coordinates `(x, y, z, w)`.
///
/// Stored control points always carry `w = 1`. Transforms may produce other
/// values of `w`; [`HomogeneousPoint::resolve`] divides them back out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomogeneousPoint {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Homogeneous weight.
    pub w: f64,
}

impl HomogeneousPoint {
    /// A resolved point `(x, y, z, 1)`.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// A point with an explicit weight.
    pub fn with_weight(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The Cartesian point, dividing by `w`.
    ///
    /// Returns `None` when `w` is too close to zero to divide by.
    pub fn resolve(&self) -> Option<Point3> {
        if Tolerance::DEFAULT.is_zero(self.w) {
            return None;
        }
        Some(Point3::new(self.x / self.w, self.y / self.w, self.z / self.w))
    }

    /// This point rescaled so that `w = 1`.
    pub fn normalized(&self) -> Option<Self> {
        self.resolve().map(Self::from)
    }

    /// The Cartesian part, ignoring `w`.
    pub fn xyz(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    fn row(&self) -> RowVector4<f64> {
        RowVector4::new(self.x, self.y, self.z, self.w)
    }
}

impl From<Point3> for HomogeneousPoint {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// A 4x4 transformation matrix in the row-vector convention.
///
/// A point is transformed as `p · M`, so `a.then(&b)` is `a · b` and applies
/// `a` first.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(3, 0)] = dx;
        m[(3, 1)] = dy;
        m[(3, 2)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Uniform scale by `s` on all three axes.
    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s, s)
    }

    /// Rotation about the X axis by `angle` radians (counter-clockwise, Y toward Z).
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = s;
        m[(2, 1)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians (counter-clockwise, Z toward X).
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = -s;
        m[(2, 0)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians (counter-clockwise, X toward Y).
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = s;
        m[(1, 0)] = -s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about X, then Y, then Z.
    pub fn rotation(x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        Self::rotation_x(x_angle)
            .then(&Self::rotation_y(y_angle))
            .then(&Self::rotation_z(z_angle))
    }

    /// Perspective divide onto the plane `z = d`.
    ///
    /// Copies `z / d` into `w`, so resolving the result yields
    /// `(x·d/z, y·d/z, d)`. `d` must be non-zero.
    pub fn perspective(d: f64) -> Self {
        debug_assert!(d != 0.0, "perspective distance must be non-zero");
        let mut m = Matrix4::identity();
        m[(2, 3)] = 1.0 / d;
        m[(3, 3)] = 0.0;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (`self · other`).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// This transform applied about `p` instead of the origin:
    /// `translate(-p) · self · translate(p)`.
    pub fn around_point(&self, p: &Point3) -> Self {
        Self::translation(-p.x, -p.y, -p.z)
            .then(self)
            .then(&Self::translation(p.x, p.y, p.z))
    }

    /// Transform a homogeneous point. The result's `w` is left as computed.
    pub fn apply(&self, p: &HomogeneousPoint) -> HomogeneousPoint {
        let r = p.row() * self.matrix;
        HomogeneousPoint::with_weight(r[0], r[1], r[2], r[3])
    }

    /// Transform a Cartesian point, resolving `w` afterwards.
    ///
    /// Affine transforms always keep `w = 1`; for a projective transform the
    /// raw `xyz` is returned when `w` vanishes.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let h = self.apply(&HomogeneousPoint::from(*p));
        h.resolve().unwrap_or_else(|| h.xyz())
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in world units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_point_eq(a: Point3, b: Point3) {
        assert!((a - b).norm() < 1e-12, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity_transform() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_point_eq(Transform::identity().apply_point(&p), p);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let result = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert_point_eq(result, Point3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn test_scale() {
        let t = Transform::scale(2.0, 3.0, 4.0);
        let result = t.apply_point(&Point3::new(1.0, 1.0, 1.0));
        assert_point_eq(result, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotations_are_counter_clockwise() {
        let z = Transform::rotation_z(FRAC_PI_2).apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_point_eq(z, Point3::new(0.0, 1.0, 0.0));

        let x = Transform::rotation_x(FRAC_PI_2).apply_point(&Point3::new(0.0, 1.0, 0.0));
        assert_point_eq(x, Point3::new(0.0, 0.0, 1.0));

        let y = Transform::rotation_y(FRAC_PI_2).apply_point(&Point3::new(0.0, 0.0, 1.0));
        assert_point_eq(y, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let combined = Transform::rotation(FRAC_PI_2, 0.0, FRAC_PI_2);
        let stepwise = Transform::rotation_x(FRAC_PI_2).then(&Transform::rotation_z(FRAC_PI_2));
        let p = Point3::new(0.3, -1.2, 2.5);
        assert_point_eq(combined.apply_point(&p), stepwise.apply_point(&p));
    }

    #[test]
    fn test_then_applies_left_operand_first() {
        // translate (0,0,0) -> (1,0,0), then scale by 2 -> (2,0,0)
        let composed = Transform::translation(1.0, 0.0, 0.0).then(&Transform::uniform_scale(2.0));
        assert_point_eq(composed.apply_point(&Point3::origin()), Point3::new(2.0, 0.0, 0.0));

        // the other order leaves the origin at (1,0,0)
        let reversed = Transform::uniform_scale(2.0).then(&Transform::translation(1.0, 0.0, 0.0));
        assert_point_eq(reversed.apply_point(&Point3::origin()), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_around_point_keeps_pivot_fixed() {
        let pivot = Point3::new(5.0, 5.0, 0.0);
        let t = Transform::rotation_z(PI).around_point(&pivot);
        assert_point_eq(t.apply_point(&pivot), pivot);
        assert_point_eq(t.apply_point(&Point3::new(6.0, 5.0, 0.0)), Point3::new(4.0, 5.0, 0.0));

        let s = Transform::uniform_scale(3.0).around_point(&pivot);
        assert_point_eq(s.apply_point(&Point3::new(6.0, 5.0, 0.0)), Point3::new(8.0, 5.0, 0.0));
    }

    #[test]
    fn test_inverse() {
        let t = Transform::rotation(0.3, -0.7, 1.1).then(&Transform::translation(1.0, 2.0, 3.0));
        let inv = t.inverse().unwrap();
        let p = Point3::new(5.0, 6.0, 7.0);
        assert_point_eq(t.then(&inv).apply_point(&p), p);
    }

    #[test]
    fn test_perspective_divides_by_depth() {
        let h = Transform::perspective(1.0).apply(&HomogeneousPoint::new(2.0, 4.0, 2.0));
        assert_abs_diff_eq!(h.w, 2.0);
        let p = h.resolve().unwrap();
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_resolve_rejects_vanishing_weight() {
        assert!(HomogeneousPoint::with_weight(1.0, 1.0, 1.0, 0.0).resolve().is_none());
        let n = HomogeneousPoint::with_weight(2.0, 4.0, 6.0, 2.0).normalized().unwrap();
        assert_eq!(n, HomogeneousPoint::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        assert!(tol.points_equal(&a, &Point3::new(1.0 + 1e-10, 2.0, 3.0)));
        assert!(!tol.points_equal(&a, &Point3::new(1.001, 2.0, 3.0)));
    }
}
