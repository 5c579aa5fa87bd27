// UTILS

use super::{Point, Triangle};

/// Arithmetic mean of the three vertices.
pub fn triangle_centroid(vertices: &[Point; 3]) -> Point {
    Point::new(
        (vertices[0].x + vertices[1].x + vertices[2].x) / 3.0,
        (vertices[0].y + vertices[1].y + vertices[2].y) / 3.0,
    )
}

/// Resolves a triangle's indices against the point list, keeping index order.
pub fn triangle_vertices(triangle: &Triangle, points: &[Point]) -> [Point; 3] {
    triangle.map(|i| points[i])
}

/// Position along one canvas axis, clamped into [0, 1] so bleed centroids
/// sample the gradient ends.
pub fn normalize(value: f64, extent: f64) -> f64 {
    (value / extent).clamp(0.0, 1.0)
}
