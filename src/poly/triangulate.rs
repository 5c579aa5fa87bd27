// triangulation boundary
// the Delaunay algorithm itself lives in `spade`; this side only hands over
// the points and regroups the flat index list into triangles

use log::warn;
use spade::{DelaunayTriangulation, LastUsedVertexHintGenerator, Point2, Triangulation as _};

use super::{Point, Triangle};

/// Anything that turns an ordered point list into a flat index list,
/// every consecutive run of three being one triangle.
pub trait Triangulator {
    fn triangulate(&self, points: &[Point]) -> Vec<usize>;
}

/// Delaunay triangulation backed by `spade`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpadeTriangulator;

impl Triangulator for SpadeTriangulator {
    fn triangulate(&self, points: &[Point]) -> Vec<usize> {
        let mut triangulation: DelaunayTriangulation<Point2<f64>, (), (), (), LastUsedVertexHintGenerator> =
            DelaunayTriangulation::new();

        // spade numbers vertices by insertion and folds duplicates into the
        // existing vertex, so map every vertex back to its first input index
        let mut input_index = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            match triangulation.insert(Point2::new(p.x, p.y)) {
                Ok(handle) if handle.index() == input_index.len() => input_index.push(i),
                Ok(_) => {}
                Err(err) => warn!("point {i} ({}, {}) left out of triangulation: {err:?}", p.x, p.y),
            }
        }

        let mut indices = Vec::with_capacity(triangulation.num_inner_faces() * 3);
        for face in triangulation.inner_faces() {
            for vertex in face.vertices() {
                indices.push(input_index[vertex.fix().index()]);
            }
        }
        indices
    }
}

/// Regroups a flat index list into triangles, preserving order and winding.
pub fn to_triangles(indices: &[usize]) -> Vec<Triangle> {
    debug_assert!(indices.len() % 3 == 0, "triangulation returned {} indices", indices.len());
    indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn triangulates_square_into_two_triangles() {
        let points = square();
        let indices = SpadeTriangulator.triangulate(&points);
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| i < points.len()));

        let triangles = to_triangles(&indices);
        for t in &triangles {
            assert_ne!(t[0], t[1]);
            assert_ne!(t[1], t[2]);
            assert_ne!(t[0], t[2]);
        }
    }

    #[test]
    fn duplicate_points_map_to_first_occurrence() {
        let mut points = square();
        points.insert(2, Point::new(1.0, 0.0));
        let indices = SpadeTriangulator.triangulate(&points);
        assert_eq!(indices.len(), 6);
        assert!(!indices.contains(&2));
        assert!(indices.contains(&4));
    }

    #[test]
    fn degenerate_input_yields_no_triangles() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert!(SpadeTriangulator.triangulate(&points).is_empty());
        assert!(SpadeTriangulator.triangulate(&[]).is_empty());
    }

    #[test_log::test]
    fn non_finite_points_are_skipped() {
        let mut points = square();
        points.push(Point::new(f64::NAN, 0.5));
        let indices = SpadeTriangulator.triangulate(&points);
        assert_eq!(indices.len(), 6);
        assert!(!indices.contains(&4));
    }

    #[test]
    fn regrouping_preserves_order() {
        let triangles = to_triangles(&[4, 1, 0, 2, 3, 1]);
        assert_eq!(triangles, vec![[4, 1, 0], [2, 3, 1]]);
    }
}
