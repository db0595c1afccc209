//! Sutherland–Hodgeman polygon clipping.
//!
//! The ring is clipped against each border of the square in turn (left,
//! top, right, bottom). Rings are implicitly closed; a trailing vertex equal
//! to the first one is accepted and ignored.

use viewclip_math::Point2;

use crate::BOUNDARY;

/// A face of a wireframe: indices into its vertex list, forming a closed ring.
pub type Face = Vec<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Border {
    Left,
    Top,
    Right,
    Bottom,
}

impl Border {
    const ALL: [Border; 4] = [Border::Left, Border::Top, Border::Right, Border::Bottom];

    fn keeps(self, p: &Point2) -> bool {
        match self {
            Border::Left => p.x >= -BOUNDARY,
            Border::Top => p.y <= BOUNDARY,
            Border::Right => p.x <= BOUNDARY,
            Border::Bottom => p.y >= -BOUNDARY,
        }
    }

    /// Crossing of the line `a → b` with this border.
    fn crossing(self, a: &Point2, b: &Point2) -> Point2 {
        match self {
            Border::Left => at_x(a, b, -BOUNDARY),
            Border::Right => at_x(a, b, BOUNDARY),
            Border::Top => at_y(a, b, BOUNDARY),
            Border::Bottom => at_y(a, b, -BOUNDARY),
        }
    }
}

fn at_x(a: &Point2, b: &Point2, x: f64) -> Point2 {
    if a.x == b.x {
        return Point2::new(x, a.y);
    }
    let m = (b.y - a.y) / (b.x - a.x);
    Point2::new(x, a.y + m * (x - a.x))
}

fn at_y(a: &Point2, b: &Point2, y: f64) -> Point2 {
    if a.x == b.x {
        return Point2::new(a.x, y);
    }
    let m = (b.y - a.y) / (b.x - a.x);
    let c = a.y - m * a.x;
    Point2::new((y - c) / m, y)
}

/// A vertex moving through the pipeline, remembering which input vertex it was.
#[derive(Debug, Clone, Copy)]
struct Tagged {
    point: Point2,
    source: Option<usize>,
}

/// Clip a ring against one border. Emission order follows the ring, starting
/// from its first vertex.
fn clip_ring(ring: &[Tagged], border: Border) -> Vec<Tagged> {
    let Some(&last) = ring.last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(ring.len() + 2);
    let mut prev = last;
    for &cur in ring {
        match (border.keeps(&prev.point), border.keeps(&cur.point)) {
            (true, true) => out.push(cur),
            (true, false) => out.push(Tagged {
                point: border.crossing(&prev.point, &cur.point),
                source: None,
            }),
            (false, true) => {
                out.push(Tagged {
                    point: border.crossing(&prev.point, &cur.point),
                    source: None,
                });
                out.push(cur);
            }
            (false, false) => {}
        }
        prev = cur;
    }
    out
}

fn clip_tagged(mut ring: Vec<Tagged>) -> Vec<Tagged> {
    if ring.len() > 1 && ring.first().map(|t| t.point) == ring.last().map(|t| t.point) {
        ring.pop();
    }
    for border in Border::ALL {
        if ring.is_empty() {
            break;
        }
        ring = clip_ring(&ring, border);
    }
    ring
}

/// Clip a closed polygon against the viewing square.
///
/// Returns the visible ring without a closing duplicate, or an empty vector
/// when nothing is visible. Consecutive duplicate vertices are collapsed.
pub fn clip_polygon(ring: &[Point2]) -> Vec<Point2> {
    let tagged = ring
        .iter()
        .map(|&point| Tagged { point, source: None })
        .collect();

    let mut out: Vec<Point2> = Vec::new();
    for t in clip_tagged(tagged) {
        if out.last() != Some(&t.point) {
            out.push(t.point);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Clip a vertex/face mesh, keeping shared vertices shared.
///
/// Every face is clipped as its own ring. Surviving input vertices appear
/// once in the output vertex list no matter how many faces use them; border
/// crossings are appended as new vertices. Faces that vanish are dropped.
pub fn clip_wireframe(vertices: &[Point2], faces: &[Face]) -> (Vec<Point2>, Vec<Face>) {
    let mut out_vertices: Vec<Point2> = Vec::new();
    let mut remap: Vec<Option<usize>> = vec![None; vertices.len()];
    let mut out_faces = Vec::with_capacity(faces.len());

    for face in faces {
        let ring = face
            .iter()
            .filter_map(|&i| {
                vertices.get(i).map(|&point| Tagged {
                    point,
                    source: Some(i),
                })
            })
            .collect();

        let mut indices: Face = Vec::new();
        for t in clip_tagged(ring) {
            let index = match t.source {
                Some(src) => *remap[src].get_or_insert_with(|| {
                    out_vertices.push(t.point);
                    out_vertices.len() - 1
                }),
                None => match indices.iter().copied().find(|&k| out_vertices[k] == t.point) {
                    Some(existing) => existing,
                    None => {
                        out_vertices.push(t.point);
                        out_vertices.len() - 1
                    }
                },
            };
            if indices.last() != Some(&index) {
                indices.push(index);
            }
        }
        while indices.len() > 1 && indices.first() == indices.last() {
            indices.pop();
        }

        if !indices.is_empty() {
            out_faces.push(indices);
        }
    }

    log::trace!(
        "clipped wireframe: {} -> {} vertices, {} -> {} faces",
        vertices.len(),
        out_vertices.len(),
        faces.len(),
        out_faces.len()
    );
    (out_vertices, out_faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(half: f64) -> Vec<Point2> {
        vec![pt(-half, -half), pt(half, -half), pt(half, half), pt(-half, half)]
    }

    #[test]
    fn test_inside_polygon_is_unchanged() {
        let ring = square(0.5);
        assert_eq!(clip_polygon(&ring), ring);
    }

    #[test]
    fn test_outside_polygon_vanishes() {
        let ring = vec![pt(2.0, 2.0), pt(3.0, 2.0), pt(3.0, 3.0)];
        assert!(clip_polygon(&ring).is_empty());
        assert!(clip_polygon(&[]).is_empty());
    }

    #[test]
    fn test_diamond_becomes_octagon() {
        let ring = vec![pt(-1.5, 0.0), pt(0.0, 1.5), pt(1.5, 0.0), pt(0.0, -1.5)];
        let clipped = clip_polygon(&ring);
        assert_eq!(clipped.len(), 8);
        for p in &clipped {
            assert!(p.x.abs() <= 1.0 + 1e-12 && p.y.abs() <= 1.0 + 1e-12, "{p:?}");
            // every output vertex lies on both the square and the diamond
            assert_abs_diff_eq!(p.x.abs() + p.y.abs(), 1.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_enclosing_diamond_yields_square() {
        let ring = vec![pt(-2.0, 0.0), pt(0.0, 2.0), pt(2.0, 0.0), pt(0.0, -2.0)];
        let clipped = clip_polygon(&ring);
        assert_eq!(clipped.len(), 4);
        for corner in square(1.0) {
            assert!(
                clipped.iter().any(|p| (p - corner).norm() < 1e-12),
                "missing corner {corner:?} in {clipped:?}"
            );
        }
    }

    #[test]
    fn test_explicit_closing_vertex_is_ignored() {
        let mut ring = square(0.5);
        ring.push(ring[0]);
        assert_eq!(clip_polygon(&ring), square(0.5));
    }

    #[test]
    fn test_half_covered_polygon() {
        let ring = vec![pt(0.0, -0.5), pt(2.0, -0.5), pt(2.0, 0.5), pt(0.0, 0.5)];
        let clipped = clip_polygon(&ring);
        assert_eq!(clipped, vec![pt(0.0, -0.5), pt(1.0, -0.5), pt(1.0, 0.5), pt(0.0, 0.5)]);
    }

    #[test]
    fn test_vertex_on_border_is_kept() {
        let ring = vec![pt(-1.0, 0.0), pt(0.5, 0.5), pt(0.5, -0.5)];
        let clipped = clip_polygon(&ring);
        assert_eq!(clipped, ring);
    }

    #[test]
    fn test_wireframe_keeps_shared_vertices() {
        // two unit squares side by side, the right one half outside
        let vertices = vec![
            pt(-0.5, -0.5),
            pt(0.5, -0.5),
            pt(0.5, 0.5),
            pt(-0.5, 0.5),
            pt(1.5, -0.5),
            pt(1.5, 0.5),
        ];
        let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]];
        let (out_vertices, out_faces) = clip_wireframe(&vertices, &faces);

        assert_eq!(out_faces.len(), 2);
        assert_eq!(out_faces[0], vec![0, 1, 2, 3]);
        // the shared edge keeps its indices in the second face
        assert!(out_faces[1].contains(&1));
        assert!(out_faces[1].contains(&2));
        assert_eq!(out_faces[1].len(), 4);
        // four original vertices survive, two crossings on x = 1 are added
        assert_eq!(out_vertices.len(), 6);
        assert!(out_vertices.contains(&pt(1.0, -0.5)));
        assert!(out_vertices.contains(&pt(1.0, 0.5)));
    }

    #[test]
    fn test_wireframe_drops_hidden_faces() {
        let vertices = vec![
            pt(2.0, 2.0),
            pt(3.0, 2.0),
            pt(3.0, 3.0),
            pt(0.0, 0.0),
            pt(0.5, 0.0),
            pt(0.0, 0.5),
        ];
        let faces = vec![vec![0, 1, 2], vec![3, 4, 5]];
        let (out_vertices, out_faces) = clip_wireframe(&vertices, &faces);
        assert_eq!(out_faces, vec![vec![0, 1, 2]]);
        assert_eq!(out_vertices, vec![pt(0.0, 0.0), pt(0.5, 0.0), pt(0.0, 0.5)]);
    }

    #[test]
    fn test_wireframe_ignores_bad_indices() {
        let vertices = vec![pt(0.0, 0.0), pt(0.5, 0.0), pt(0.0, 0.5)];
        let (_, out_faces) = clip_wireframe(&vertices, &[vec![0, 1, 2, 7]]);
        assert_eq!(out_faces, vec![vec![0, 1, 2]]);
    }
}
