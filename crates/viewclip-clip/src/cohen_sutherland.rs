//! Cohen–Sutherland line clipping.
//!
//! Each endpoint gets a 4-bit outcode against the viewing square:
//!
//! ```text
//!        |        |
//!  1001  |  1000  | 1010
//!        |        |
//! -------+--------+-------- y = 1
//!        |        |
//!  0001  |  0000  | 0010
//!        |        |
//! -------+--------+-------- y = -1
//!        |        |
//!  0101  |  0100  | 0110
//!        |        |
//!      x = -1   x = 1
//! ```
//!
//! Segments are trivially accepted when both codes are zero and trivially
//! rejected when the codes share a bit. Otherwise every outside endpoint is
//! moved onto the first border crossing, among the borders flagged in its
//! code, that actually lies on the square. Candidates are tried in the order
//! left, right, bottom, top.

use viewclip_math::Point2;

use crate::{on_square, snap_to_border, ClipOutcome, LineClipper, BOUNDARY};

/// Outcode bit: `x < -1`.
pub const LEFT: u8 = 0b0001;
/// Outcode bit: `x > 1`.
pub const RIGHT: u8 = 0b0010;
/// Outcode bit: `y < -1`.
pub const BOTTOM: u8 = 0b0100;
/// Outcode bit: `y > 1`.
pub const TOP: u8 = 0b1000;

/// Border evaluation order for corner endpoints.
const BORDER_ORDER: [u8; 4] = [LEFT, RIGHT, BOTTOM, TOP];

/// Cohen–Sutherland clipper over the viewing square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CohenSutherland;

impl LineClipper for CohenSutherland {
    fn clip_line(&self, p1: Point2, p2: Point2) -> Option<(Point2, Point2)> {
        clip_line(p1, p2)
    }
}

/// Compute the outcode of `p`.
pub fn outcode(p: &Point2) -> u8 {
    let mut code = 0;
    if p.x < -BOUNDARY {
        code |= LEFT;
    } else if p.x > BOUNDARY {
        code |= RIGHT;
    }
    if p.y < -BOUNDARY {
        code |= BOTTOM;
    } else if p.y > BOUNDARY {
        code |= TOP;
    }
    code
}

/// Clip `p1 → p2` against the viewing square.
pub fn clip_line(p1: Point2, p2: Point2) -> Option<(Point2, Point2)> {
    let (p1, p2) = (snap_to_border(p1), snap_to_border(p2));
    let code1 = outcode(&p1);
    let code2 = outcode(&p2);

    if code1 == 0 && code2 == 0 {
        return Some((p1, p2));
    }
    if code1 & code2 != 0 {
        return None;
    }

    // `None` marks a vertical segment, which only ever crosses the
    // horizontal borders.
    let slope = if p1.x == p2.x {
        None
    } else {
        Some((p2.y - p1.y) / (p2.x - p1.x))
    };

    let outcome = if code1 == 0 {
        ClipOutcome::One(border_crossing(&p2, code2, slope)?)
    } else if code2 == 0 {
        ClipOutcome::One(border_crossing(&p1, code1, slope)?)
    } else {
        let q1 = border_crossing(&p1, code1, slope)?;
        let q2 = border_crossing(&p2, code2, slope)?;
        ClipOutcome::Two(q1, q2)
    };

    Some(outcome.into_segment(p1, p2, code1 == 0))
}

/// First crossing, over the borders flagged in `code`, that lies on the square.
fn border_crossing(p: &Point2, code: u8, slope: Option<f64>) -> Option<Point2> {
    BORDER_ORDER
        .iter()
        .filter(|&&border| code & border != 0)
        .filter_map(|&border| intersect(p, border, slope))
        .find(on_square)
}

/// Intersection of the line through `p` with the given border.
///
/// Returns `None` for a border the line is parallel to.
fn intersect(p: &Point2, border: u8, slope: Option<f64>) -> Option<Point2> {
    match (border, slope) {
        (LEFT, Some(m)) => Some(Point2::new(-BOUNDARY, m * (-BOUNDARY - p.x) + p.y)),
        (RIGHT, Some(m)) => Some(Point2::new(BOUNDARY, m * (BOUNDARY - p.x) + p.y)),
        (BOTTOM, Some(m)) if m != 0.0 => Some(Point2::new(p.x + (-BOUNDARY - p.y) / m, -BOUNDARY)),
        (TOP, Some(m)) if m != 0.0 => Some(Point2::new(p.x + (BOUNDARY - p.y) / m, BOUNDARY)),
        (BOTTOM, None) => Some(Point2::new(p.x, -BOUNDARY)),
        (TOP, None) => Some(Point2::new(p.x, BOUNDARY)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_outcodes() {
        assert_eq!(outcode(&pt(0.0, 0.0)), 0);
        assert_eq!(outcode(&pt(1.0, -1.0)), 0);
        assert_eq!(outcode(&pt(-2.0, 0.0)), LEFT);
        assert_eq!(outcode(&pt(2.0, 0.0)), RIGHT);
        assert_eq!(outcode(&pt(0.0, -2.0)), BOTTOM);
        assert_eq!(outcode(&pt(0.0, 2.0)), TOP);
        assert_eq!(outcode(&pt(-2.0, 2.0)), LEFT | TOP);
        assert_eq!(outcode(&pt(2.0, -2.0)), RIGHT | BOTTOM);
    }

    #[test]
    fn test_fully_outside() {
        assert_eq!(clip_line(pt(10.0, 10.0), pt(20.0, 20.0)), None);
        assert_eq!(clip_line(pt(-3.0, 0.0), pt(-2.0, 5.0)), None);
    }

    #[test]
    fn test_fully_inside_is_unchanged() {
        let (a, b) = (pt(-0.5, 0.25), pt(0.75, -1.0));
        assert_eq!(clip_line(a, b), Some((a, b)));
    }

    #[test]
    fn test_one_crossing() {
        assert_eq!(clip_line(pt(0.0, 0.0), pt(2.0, 0.0)), Some((pt(0.0, 0.0), pt(1.0, 0.0))));
        // orientation follows the input
        assert_eq!(clip_line(pt(2.0, 0.0), pt(0.0, 0.0)), Some((pt(1.0, 0.0), pt(0.0, 0.0))));
    }

    #[test]
    fn test_two_crossings() {
        let (a, b) = clip_line(pt(-2.0, -0.5), pt(2.0, 0.5)).unwrap();
        assert_abs_diff_eq!(a.x, -1.0);
        assert_abs_diff_eq!(a.y, -0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(b.x, 1.0);
        assert_abs_diff_eq!(b.y, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_endpoint_prefers_left_before_top() {
        // Both candidates meet at the corner; left is tried first.
        let (a, b) = clip_line(pt(-2.0, 1.5), pt(0.0, 0.5)).unwrap();
        assert_eq!(a, pt(-1.0, 1.0));
        assert_eq!(b, pt(0.0, 0.5));

        let (a, _) = clip_line(pt(-1.5, 2.0), pt(0.5, -2.0)).unwrap();
        assert_abs_diff_eq!(a.y, 1.0);
        assert_abs_diff_eq!(a.x, -1.0, epsilon = 1e-12);

        // The left candidate lands at y = 1.5 and is skipped.
        let (a, _) = clip_line(pt(-1.25, 2.0), pt(0.75, -2.0)).unwrap();
        assert_abs_diff_eq!(a.y, 1.0);
        assert_abs_diff_eq!(a.x, -0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_miss_is_rejected() {
        // passes above the top-left corner
        assert_eq!(clip_line(pt(-3.0, 0.0), pt(0.0, 3.0)), None);
    }

    #[test]
    fn test_vertical_segment() {
        assert_eq!(clip_line(pt(0.5, -3.0), pt(0.5, 3.0)), Some((pt(0.5, -1.0), pt(0.5, 1.0))));
        assert_eq!(clip_line(pt(0.5, 0.0), pt(0.5, 3.0)), Some((pt(0.5, 0.0), pt(0.5, 1.0))));
        assert_eq!(clip_line(pt(1.5, -3.0), pt(1.5, 3.0)), None);
    }

    #[test]
    fn test_horizontal_segment() {
        assert_eq!(clip_line(pt(-5.0, 1.0), pt(5.0, 1.0)), Some((pt(-1.0, 1.0), pt(1.0, 1.0))));
        assert_eq!(clip_line(pt(-5.0, 1.5), pt(5.0, 1.5)), None);
    }

    #[test]
    fn test_zero_length_segment() {
        assert_eq!(clip_line(pt(3.0, 3.0), pt(3.0, 3.0)), None);
        assert_eq!(clip_line(pt(0.2, 0.2), pt(0.2, 0.2)), Some((pt(0.2, 0.2), pt(0.2, 0.2))));
    }
}
