#![warn(missing_docs)]

//! Clipping against the normalized viewing square for viewclip.
//!
//! Every algorithm here works in a window's normalized coordinate system,
//! where the window's border maps exactly onto the square `[-1, 1]²`. Points
//! lying on the border count as inside.
//!
//! - **Points**: a containment test ([`clip_point`]).
//! - **Lines**: [`CohenSutherland`] (outcodes) and [`NichollLeeNicholl`]
//!   (region and slope classification). Both implement [`LineClipper`] and
//!   produce the same segments.
//! - **Polygons**: Sutherland–Hodgeman ([`clip_polygon`]) and its
//!   topology-preserving variant for vertex/face meshes ([`clip_wireframe`]).
//!
//! # Example
//!
//! ```
//! use viewclip_clip::{CohenSutherland, LineClipper};
//! use viewclip_math::Point2;
//!
//! let (a, b) = CohenSutherland
//!     .clip_line(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0))
//!     .unwrap();
//! assert_eq!(a, Point2::new(0.0, 0.0));
//! assert_eq!(b, Point2::new(1.0, 0.0));
//! ```

pub mod cohen_sutherland;
pub mod nicholl_lee_nicholl;
pub mod sutherland_hodgeman;

pub use cohen_sutherland::CohenSutherland;
pub use nicholl_lee_nicholl::NichollLeeNicholl;
pub use sutherland_hodgeman::{clip_polygon, clip_wireframe, Face};

use serde::{Deserialize, Serialize};
use viewclip_math::Point2;

/// Half-extent of the normalized viewing square.
pub const BOUNDARY: f64 = 1.0;

/// Slack allowed around the border, both for input coordinates and for
/// computed crossings.
pub(crate) const EDGE_EPSILON: f64 = 1e-12;

/// Whether `p` lies inside the viewing square (border included).
#[inline]
pub fn contains(p: &Point2) -> bool {
    (-BOUNDARY..=BOUNDARY).contains(&p.x) && (-BOUNDARY..=BOUNDARY).contains(&p.y)
}

/// Whether a computed border crossing lies on the square, allowing for round-off.
#[inline]
pub(crate) fn on_square(p: &Point2) -> bool {
    let limit = BOUNDARY + EDGE_EPSILON;
    p.x.abs() <= limit && p.y.abs() <= limit
}

/// Move coordinates lying within round-off of a border onto it.
///
/// Every clipper sees its input through this, so the border rule is the same
/// for points, Cohen–Sutherland and Nicholl–Lee–Nicholl.
#[inline]
pub fn snap_to_border(p: Point2) -> Point2 {
    let snap = |c: f64| {
        if (c.abs() - BOUNDARY).abs() <= EDGE_EPSILON {
            BOUNDARY.copysign(c)
        } else {
            c
        }
    };
    Point2::new(snap(p.x), snap(p.y))
}

/// Clip a single point: returns it, snapped onto a border it touches, when visible.
pub fn clip_point(p: Point2) -> Option<Point2> {
    let p = snap_to_border(p);
    contains(&p).then_some(p)
}

/// Border crossings found along a segment, ordered from its first endpoint.
///
/// Produced by the line clippers' case analysis. A clipper that rejects the
/// segment returns no outcome at all; `ClipOutcome::None` means the segment
/// is visible without any crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipOutcome {
    /// No crossing: the segment is entirely inside.
    None,
    /// One crossing, replacing whichever endpoint lies outside.
    One(Point2),
    /// Two crossings, replacing both endpoints.
    Two(Point2, Point2),
}

impl ClipOutcome {
    /// Splice the crossings into the segment `p1 → p2`.
    ///
    /// `p1_inside` tells which endpoint a single crossing replaces.
    pub fn into_segment(self, p1: Point2, p2: Point2, p1_inside: bool) -> (Point2, Point2) {
        match self {
            ClipOutcome::None => (p1, p2),
            ClipOutcome::One(q) if p1_inside => (p1, q),
            ClipOutcome::One(q) => (q, p2),
            ClipOutcome::Two(a, b) => (a, b),
        }
    }
}

/// A line-clipping algorithm over the viewing square.
///
/// Implementations keep the segment's orientation: the first returned point
/// always corresponds to `p1`.
pub trait LineClipper {
    /// Clip `p1 → p2`, returning the visible part or `None` if nothing is visible.
    fn clip_line(&self, p1: Point2, p2: Point2) -> Option<(Point2, Point2)>;
}

/// Run-time selection between the interchangeable line clippers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClipAlgorithm {
    /// Outcode-based Cohen–Sutherland.
    #[default]
    CohenSutherland,
    /// Region/slope-based Nicholl–Lee–Nicholl.
    NichollLeeNicholl,
}

impl LineClipper for LineClipAlgorithm {
    fn clip_line(&self, p1: Point2, p2: Point2) -> Option<(Point2, Point2)> {
        match self {
            LineClipAlgorithm::CohenSutherland => CohenSutherland.clip_line(p1, p2),
            LineClipAlgorithm::NichollLeeNicholl => NichollLeeNicholl.clip_line(p1, p2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_point() {
        assert_eq!(clip_point(Point2::new(0.5, -0.5)), Some(Point2::new(0.5, -0.5)));
        assert_eq!(clip_point(Point2::new(1.0, -1.0)), Some(Point2::new(1.0, -1.0)));
        assert_eq!(clip_point(Point2::new(1.0001, 0.0)), None);
        assert_eq!(clip_point(Point2::new(0.0, -3.0)), None);
        assert_eq!(
            clip_point(Point2::new(1.0 + 1e-15, -1.0 - f64::EPSILON)),
            Some(Point2::new(1.0, -1.0))
        );
    }

    #[test]
    fn test_snap_to_border() {
        let below = -1.0 - f64::EPSILON;
        assert_eq!(snap_to_border(Point2::new(-3.0, below)), Point2::new(-3.0, -1.0));
        assert_eq!(snap_to_border(Point2::new(1.0 - 1e-13, 0.5)), Point2::new(1.0, 0.5));
        // beyond the slack nothing moves
        assert_eq!(snap_to_border(Point2::new(1.0 + 1e-9, 0.0)), Point2::new(1.0 + 1e-9, 0.0));
    }

    #[test]
    fn test_outcome_keeps_orientation() {
        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(2.0, 0.0);
        let q = Point2::new(1.0, 0.0);
        assert_eq!(ClipOutcome::One(q).into_segment(p1, p2, true), (p1, q));
        assert_eq!(ClipOutcome::One(q).into_segment(p2, p1, false), (q, p1));
        assert_eq!(ClipOutcome::None.into_segment(p1, q, true), (p1, q));
    }

    #[test]
    fn test_algorithm_selection_dispatches() {
        let p1 = Point2::new(-3.0, 0.5);
        let p2 = Point2::new(0.0, 0.5);
        for algorithm in [
            LineClipAlgorithm::CohenSutherland,
            LineClipAlgorithm::NichollLeeNicholl,
        ] {
            let (a, b) = algorithm.clip_line(p1, p2).unwrap();
            assert_eq!(a, Point2::new(-1.0, 0.5), "{algorithm:?}");
            assert_eq!(b, p2, "{algorithm:?}");
        }
    }
}
