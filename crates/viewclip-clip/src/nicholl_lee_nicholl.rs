//! Nicholl–Lee–Nicholl line clipping.
//!
//! The plane around the square splits into nine regions. Rather than
//! enumerating every (p1, p2) region pair, the segment is first mapped by one
//! of the square's symmetries into a canonical frame:
//!
//! - when p1 is inside, p2 lands in the west edge region or the north-west
//!   corner region;
//! - when p1 is outside, p1 lands in the west edge region or the north-west
//!   corner region.
//!
//! In that frame the segment's slope is compared against the slopes from p1
//! to the square's corners, which decides directly which borders are crossed.
//! Crossing points are computed once and mapped back. Every symmetry used is a
//! combination of an axis swap and sign flips, so the round trip is exact.
//! Segments of constant x skip the classification and are cut against the
//! horizontal borders directly.

use viewclip_math::Point2;

use crate::{snap_to_border, ClipOutcome, LineClipper, BOUNDARY};

/// Nicholl–Lee–Nicholl clipper over the viewing square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NichollLeeNicholl;

impl LineClipper for NichollLeeNicholl {
    fn clip_line(&self, p1: Point2, p2: Point2) -> Option<(Point2, Point2)> {
        clip_line(p1, p2)
    }
}

/// One of the nine regions around the viewing square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Inside,
    West,
    East,
    North,
    South,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Region {
    fn of(p: &Point2) -> Self {
        let west = p.x < -BOUNDARY;
        let east = p.x > BOUNDARY;
        let south = p.y < -BOUNDARY;
        let north = p.y > BOUNDARY;
        match (west, east, south, north) {
            (true, _, _, true) => Region::NorthWest,
            (true, _, true, _) => Region::SouthWest,
            (true, ..) => Region::West,
            (_, true, _, true) => Region::NorthEast,
            (_, true, true, _) => Region::SouthEast,
            (_, true, ..) => Region::East,
            (.., true) => Region::North,
            (_, _, true, _) => Region::South,
            _ => Region::Inside,
        }
    }

    /// Symmetry taking this region onto `West` (edges) or `NorthWest` (corners).
    fn canonical_frame(self) -> Symmetry {
        match self {
            Region::Inside | Region::West | Region::NorthWest => Symmetry::IDENTITY,
            Region::East | Region::NorthEast => Symmetry {
                flip_x: true,
                ..Symmetry::IDENTITY
            },
            Region::North => Symmetry {
                swap: true,
                flip_x: true,
                flip_y: false,
            },
            Region::South => Symmetry {
                swap: true,
                ..Symmetry::IDENTITY
            },
            Region::SouthWest => Symmetry {
                flip_y: true,
                ..Symmetry::IDENTITY
            },
            Region::SouthEast => Symmetry {
                swap: false,
                flip_x: true,
                flip_y: true,
            },
        }
    }
}

/// A symmetry of the square: optional axis swap followed by optional sign flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Symmetry {
    swap: bool,
    flip_x: bool,
    flip_y: bool,
}

impl Symmetry {
    const IDENTITY: Symmetry = Symmetry {
        swap: false,
        flip_x: false,
        flip_y: false,
    };

    fn apply(self, p: Point2) -> Point2 {
        let (x, y) = if self.swap { (p.y, p.x) } else { (p.x, p.y) };
        Point2::new(
            if self.flip_x { -x } else { x },
            if self.flip_y { -y } else { y },
        )
    }

    fn invert(self, p: Point2) -> Point2 {
        let x = if self.flip_x { -p.x } else { p.x };
        let y = if self.flip_y { -p.y } else { p.y };
        if self.swap {
            Point2::new(y, x)
        } else {
            Point2::new(x, y)
        }
    }

    fn invert_outcome(self, outcome: ClipOutcome) -> ClipOutcome {
        match outcome {
            ClipOutcome::None => ClipOutcome::None,
            ClipOutcome::One(q) => ClipOutcome::One(self.invert(q)),
            ClipOutcome::Two(a, b) => ClipOutcome::Two(self.invert(a), self.invert(b)),
        }
    }
}

/// Slopes from a reference point to the four corners of the square.
struct CornerSlopes {
    top_left: f64,
    top_right: f64,
    bottom_right: f64,
    bottom_left: f64,
}

impl CornerSlopes {
    fn seen_from(p: &Point2) -> Self {
        let slope_to = |cx: f64, cy: f64| (cy - p.y) / (cx - p.x);
        Self {
            top_left: slope_to(-BOUNDARY, BOUNDARY),
            top_right: slope_to(BOUNDARY, BOUNDARY),
            bottom_right: slope_to(BOUNDARY, -BOUNDARY),
            bottom_left: slope_to(-BOUNDARY, -BOUNDARY),
        }
    }
}

/// The segment's supporting line, anchored at its first endpoint.
struct Line {
    origin: Point2,
    slope: f64,
}

impl Line {
    fn through(p1: &Point2, p2: &Point2) -> Self {
        Self {
            origin: *p1,
            slope: (p1.y - p2.y) / (p1.x - p2.x),
        }
    }

    fn west(&self) -> Point2 {
        self.at_x(-BOUNDARY)
    }

    fn east(&self) -> Point2 {
        self.at_x(BOUNDARY)
    }

    fn north(&self) -> Point2 {
        self.at_y(BOUNDARY)
    }

    fn south(&self) -> Point2 {
        self.at_y(-BOUNDARY)
    }

    fn at_x(&self, x: f64) -> Point2 {
        Point2::new(x, self.origin.y + self.slope * (x - self.origin.x))
    }

    fn at_y(&self, y: f64) -> Point2 {
        Point2::new(self.origin.x + (y - self.origin.y) / self.slope, y)
    }
}

/// Clip `p1 → p2` against the viewing square.
pub fn clip_line(p1: Point2, p2: Point2) -> Option<(Point2, Point2)> {
    let (p1, p2) = (snap_to_border(p1), snap_to_border(p2));
    let r1 = Region::of(&p1);
    let r2 = Region::of(&p2);
    let p1_inside = r1 == Region::Inside;

    if p1_inside && r2 == Region::Inside {
        return Some((p1, p2));
    }
    if p1.x == p2.x {
        return clip_vertical(p1, p2);
    }

    let frame = if p1_inside {
        r2.canonical_frame()
    } else {
        r1.canonical_frame()
    };
    let q1 = frame.apply(p1);
    let q2 = frame.apply(p2);

    let outcome = if p1_inside {
        leave_from_inside(q1, q2)
    } else {
        match Region::of(&q1) {
            Region::West => enter_from_edge(q1, q2)?,
            Region::NorthWest => enter_from_corner(q1, q2)?,
            other => invariant_violation(other),
        }
    };

    Some(frame.invert_outcome(outcome).into_segment(p1, p2, p1_inside))
}

/// Segments of constant x have no slope to classify; only the horizontal
/// borders can cut them.
fn clip_vertical(p1: Point2, p2: Point2) -> Option<(Point2, Point2)> {
    if p1.x.abs() > BOUNDARY {
        return None;
    }
    if p1.y.max(p2.y) < -BOUNDARY || p1.y.min(p2.y) > BOUNDARY {
        return None;
    }
    let clamp = |y: f64| y.clamp(-BOUNDARY, BOUNDARY);
    Some((Point2::new(p1.x, clamp(p1.y)), Point2::new(p2.x, clamp(p2.y))))
}

/// p1 inside, p2 in the west or north-west region.
fn leave_from_inside(p1: Point2, p2: Point2) -> ClipOutcome {
    let line = Line::through(&p1, &p2);
    match Region::of(&p2) {
        Region::West => ClipOutcome::One(line.west()),
        Region::NorthWest => {
            // From the west border itself the top-left slope is undefined.
            if p1.x == -BOUNDARY || line.slope >= CornerSlopes::seen_from(&p1).top_left {
                ClipOutcome::One(line.west())
            } else {
                ClipOutcome::One(line.north())
            }
        }
        other => invariant_violation(other),
    }
}

/// p1 in the west region.
fn enter_from_edge(p1: Point2, p2: Point2) -> Option<ClipOutcome> {
    if p2.x < -BOUNDARY {
        return None;
    }

    let line = Line::through(&p1, &p2);
    if Region::of(&p2) == Region::Inside {
        return Some(ClipOutcome::One(line.west()));
    }

    let m = CornerSlopes::seen_from(&p1);
    if !(m.bottom_left..=m.top_left).contains(&line.slope) {
        return None;
    }

    let exit = if line.slope > m.top_right {
        line.north()
    } else if line.slope < m.bottom_right {
        line.south()
    } else {
        line.east()
    };
    Some(ClipOutcome::Two(line.west(), exit))
}

/// p1 in the north-west region.
fn enter_from_corner(p1: Point2, p2: Point2) -> Option<ClipOutcome> {
    if p2.x < -BOUNDARY || p2.y > BOUNDARY {
        return None;
    }

    let line = Line::through(&p1, &p2);
    let m = CornerSlopes::seen_from(&p1);

    if Region::of(&p2) == Region::Inside {
        let entry = if line.slope < m.top_left {
            line.west()
        } else {
            line.north()
        };
        return Some(ClipOutcome::One(entry));
    }

    if !(m.bottom_left..=m.top_right).contains(&line.slope) {
        return None;
    }

    // Entry switches from west to north at the top-left slope and exit from
    // south to east at the bottom-right one; either may come first.
    let (first, second) = if m.top_left < m.bottom_right {
        (m.top_left, m.bottom_right)
    } else {
        (m.bottom_right, m.top_left)
    };

    let (entry, exit) = if line.slope < first {
        (line.west(), line.south())
    } else if line.slope < second {
        if m.top_left < m.bottom_right {
            (line.north(), line.south())
        } else {
            (line.west(), line.east())
        }
    } else {
        (line.north(), line.east())
    };
    Some(ClipOutcome::Two(entry, exit))
}

#[cold]
fn invariant_violation(region: Region) -> ! {
    log::error!("nicholl-lee-nicholl: canonical frame produced region {region:?}");
    panic!("nicholl-lee-nicholl: canonical frame produced region {region:?}");
}
