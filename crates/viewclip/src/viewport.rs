//! Normalized coordinates to device coordinates.

use viewclip_math::Point2;

use crate::ClippedShape;

/// A rectangular drawing area with a uniform margin.
///
/// Device `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Drawable width, excluding margins.
    pub width: f64,
    /// Drawable height, excluding margins.
    pub height: f64,
    /// Margin on every side.
    pub margin: f64,
}

impl Viewport {
    /// A viewport with the given drawable size and margin.
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self { width, height, margin }
    }

    /// Map a normalized point to device coordinates.
    pub fn to_device(&self, p: Point2) -> Point2 {
        Point2::new(
            (p.x + 1.0) / 2.0 * self.width + self.margin,
            (1.0 - (p.y + 1.0) / 2.0) * self.height + self.margin,
        )
    }

    /// Map every point of a clip result.
    pub fn map_shape(&self, shape: &ClippedShape) -> Vec<Point2> {
        shape.points.iter().map(|&p| self.to_device(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_land_inside_the_margin() {
        let viewport = Viewport::new(400.0, 300.0, 10.0);
        assert_eq!(viewport.to_device(Point2::new(-1.0, 1.0)), Point2::new(10.0, 10.0));
        assert_eq!(viewport.to_device(Point2::new(1.0, -1.0)), Point2::new(410.0, 310.0));
        assert_eq!(viewport.to_device(Point2::new(0.0, 0.0)), Point2::new(210.0, 160.0));
    }
}
