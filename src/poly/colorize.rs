use crate::color::functions::ColorInput;
use crate::color::Color;
use crate::options::ResolvedOptions;
use crate::rng::SeededRng;

use super::utils::{normalize, triangle_centroid, triangle_vertices};
use super::{Point, Triangle};

/// One finished triangle of the mosaic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poly {
    pub vertex_indices: Triangle,
    pub centroid: Point,
    pub color: Color,
}

impl Poly {
    pub fn vertices(&self, points: &[Point]) -> [Point; 3] {
        triangle_vertices(&self.vertex_indices, points)
    }
}

/// Colors every triangle in order. The color stream is shared across all
/// triangles and never reset, so each call sees the draws of the ones before.
pub fn assign_colors(
    triangles: &[Triangle],
    points: &[Point],
    opts: &ResolvedOptions,
    rng: &mut SeededRng,
) -> Vec<Poly> {
    let x_scale = opts.x_scale();
    let y_scale = opts.y_scale();

    triangles
        .iter()
        .map(|&vertex_indices| {
            let vertices = triangle_vertices(&vertex_indices, points);
            let centroid = triangle_centroid(&vertices);

            let mut input = ColorInput {
                centroid,
                x_percent: normalize(centroid.x, opts.width),
                y_percent: normalize(centroid.y, opts.height),
                vertex_indices,
                vertices,
                x_scale: &x_scale,
                y_scale: &y_scale,
                points,
                opts,
                rng: &mut *rng,
            };
            let color = opts.color_function.call(&mut input);

            Poly { vertex_indices, centroid, color }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::color::functions::ColorFunction;
    use crate::options::Options;

    fn recording_opts(seen: Arc<Mutex<Vec<(f64, f64)>>>) -> ResolvedOptions {
        let options = Options {
            width: Some(100.0),
            height: Some(50.0),
            x_colors: Some(crate::options::ColorOption::Palette("Greys".into())),
            color_function: Some(ColorFunction::new(move |input| {
                seen.lock().unwrap().push((input.x_percent, input.y_percent));
                input.x_scale.at(input.x_percent)
            })),
            ..Default::default()
        };
        options.resolve(&mut SeededRng::from_seed_str("assign")).unwrap()
    }

    #[test]
    fn bleed_centroids_clamp_to_gradient_ends() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let opts = recording_opts(Arc::clone(&seen));
        let points = vec![
            Point::new(-30.0, -30.0),
            Point::new(-20.0, -30.0),
            Point::new(-30.0, -20.0),
            Point::new(130.0, 80.0),
            Point::new(120.0, 80.0),
            Point::new(130.0, 70.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(25.0, 25.0),
        ];
        let triangles = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];
        let polys = assign_colors(&triangles, &points, &opts, &mut SeededRng::from_seed_str("c"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], (0.0, 0.0));
        assert_eq!(seen[1], (1.0, 1.0));
        assert_eq!(seen[2], (0.25, 0.3));

        // centroid stays in canvas units
        assert!(polys[0].centroid.x < 0.0);
        assert!(polys[1].centroid.x > 100.0);
    }

    #[test]
    fn keeps_triangle_order_and_winding() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let opts = recording_opts(seen);
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 3.0)];
        let triangles = [[2, 0, 1], [0, 1, 2]];
        let polys = assign_colors(&triangles, &points, &opts, &mut SeededRng::from_seed_str("c"));

        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].vertex_indices, [2, 0, 1]);
        assert_eq!(polys[1].vertex_indices, [0, 1, 2]);
        assert_eq!(polys[0].centroid, Point::new(1.0, 1.0));
        assert_eq!(polys[0].vertices(&points), [points[2], points[0], points[1]]);
    }

    #[test]
    fn color_stream_advances_across_triangles() {
        let options = Options {
            x_colors: Some(crate::options::ColorOption::Palette("Greys".into())),
            color_function: Some(ColorFunction::new(|input| {
                let v = input.random() as f32;
                Color::new(v, v, v)
            })),
            ..Default::default()
        };
        let opts = options.resolve(&mut SeededRng::from_seed_str("assign")).unwrap();
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 3.0)];
        let polys = assign_colors(&[[0, 1, 2], [0, 1, 2]], &points, &opts, &mut SeededRng::from_seed_str("c"));

        let mut ahead = SeededRng::from_seed_str("c");
        let first = ahead.next_f64() as f32;
        let second = ahead.next_f64() as f32;
        assert_eq!(polys[0].color, Color::new(first, first, first));
        assert_eq!(polys[1].color, Color::new(second, second, second));
    }
}
