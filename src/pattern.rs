// generation pipeline
// options -> geometry stream -> points -> triangles -> color stream -> polys

use log::debug;

use crate::config::COLOR_SEED_SALT;
use crate::error::Result;
use crate::options::{Options, ResolvedOptions};
use crate::poly::colorize::{assign_colors, Poly};
use crate::poly::point_gen::pgen;
use crate::poly::triangulate::{to_triangles, SpadeTriangulator, Triangulator};
use crate::poly::Point;
use crate::rng::{EntropySource, SeededRng, SYSTEM_ENTROPY};

/// A finished mosaic: points, colored triangles and the options that made them.
/// Read-only once built.
#[derive(Clone, Debug)]
pub struct Pattern {
    points: Vec<Point>,
    polys: Vec<Poly>,
    opts: ResolvedOptions,
}

impl Pattern {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn polys(&self) -> &[Poly] {
        &self.polys
    }

    pub fn opts(&self) -> &ResolvedOptions {
        &self.opts
    }

    pub fn width(&self) -> f64 {
        self.opts.width
    }

    pub fn height(&self) -> f64 {
        self.opts.height
    }
}

/// Generates with spade triangulation and the process-wide entropy source.
pub fn generate(options: Options) -> Result<Pattern> {
    generate_with(options, &SpadeTriangulator, &SYSTEM_ENTROPY)
}

/// Generates with injected collaborators.
///
/// Geometry and color draw from separate streams: the color stream is seeded
/// with the seed plus a fixed salt, so swapping the color function never moves
/// a point. Without a seed both streams come from independent entropy draws.
pub fn generate_with(
    options: Options,
    triangulator: &dyn Triangulator,
    entropy: &dyn EntropySource,
) -> Result<Pattern> {
    // reject bad geometry before any entropy is drawn
    options.validate()?;
    let mut geometry_rng = SeededRng::new(options.seed.as_deref(), entropy);

    // palette "random" draws happen here, before the grid, on the same stream
    let mut opts = options.resolve(&mut geometry_rng)?;

    let points = match opts.points.take() {
        Some(points) => points,
        None => pgen(&opts, &mut geometry_rng)?,
    };
    debug!("generated {} points", points.len());

    let indices = triangulator.triangulate(&points);
    let triangles = to_triangles(&indices);
    debug!("triangulated {} triangles", triangles.len());

    let mut color_rng = match &opts.seed {
        Some(seed) => SeededRng::from_seed_str(&format!("{seed}{COLOR_SEED_SALT}")),
        None => SeededRng::new(None, entropy),
    };
    let polys = assign_colors(&triangles, &points, &opts, &mut color_rng);
    debug!("colored {} polys", polys.len());

    Ok(Pattern { points, polys, opts })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTriangulator(Vec<usize>);

    impl Triangulator for FixedTriangulator {
        fn triangulate(&self, _points: &[Point]) -> Vec<usize> {
            self.0.clone()
        }
    }

    struct CountingEntropy(std::sync::atomic::AtomicU32);

    impl EntropySource for CountingEntropy {
        fn seed_string(&self) -> String {
            let n = self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            format!("entropy-{n}")
        }
    }

    fn triangle_points() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 3.0)]
    }

    #[test]
    fn supplied_points_skip_the_grid() {
        let options = Options {
            seed: Some("supplied".into()),
            points: Some(triangle_points()),
            ..Default::default()
        };
        let pattern = generate(options).unwrap();
        assert_eq!(pattern.points(), triangle_points().as_slice());
        assert_eq!(pattern.polys().len(), 1);
        assert_eq!(pattern.polys()[0].centroid, Point::new(1.0, 1.0));
        assert!(pattern.opts().points.is_none());
    }

    #[test]
    fn keeps_collaborator_triangle_order() {
        let options = Options {
            seed: Some("order".into()),
            points: Some(triangle_points()),
            ..Default::default()
        };
        let triangulator = FixedTriangulator(vec![2, 1, 0, 0, 1, 2]);
        let pattern = generate_with(options, &triangulator, &SYSTEM_ENTROPY).unwrap();
        let order: Vec<_> = pattern.polys().iter().map(|p| p.vertex_indices).collect();
        assert_eq!(order, vec![[2, 1, 0], [0, 1, 2]]);
    }

    #[test]
    fn seeded_color_stream_uses_salted_seed() {
        let options = Options {
            seed: Some("salt".into()),
            points: Some(triangle_points()),
            color_function: Some(crate::color::functions::ColorFunction::new(|input| {
                let v = input.random() as f32;
                crate::color::Color::new(v, v, v)
            })),
            ..Default::default()
        };
        let pattern = generate(options).unwrap();
        let v = SeededRng::from_seed_str("salt42").next_f64() as f32;
        assert_eq!(pattern.polys()[0].color, crate::color::Color::new(v, v, v));
    }

    #[test]
    fn unseeded_streams_take_separate_entropy_draws() {
        let entropy = CountingEntropy(std::sync::atomic::AtomicU32::new(0));
        generate_with(Options::default(), &SpadeTriangulator, &entropy).unwrap();
        assert_eq!(entropy.0.load(std::sync::atomic::Ordering::Relaxed), 2);
    }

    #[test]
    fn validation_fails_before_triangulation() {
        let options = Options { width: Some(-1.0), ..Default::default() };
        let err = generate(options).unwrap_err();
        assert_eq!(err, crate::error::ValidationError::InvalidWidth(-1.0));
    }

    #[test]
    fn invalid_options_draw_no_entropy() {
        let entropy = CountingEntropy(std::sync::atomic::AtomicU32::new(0));
        let options = Options { width: Some(f64::INFINITY), ..Default::default() };
        assert!(generate_with(options, &SpadeTriangulator, &entropy).is_err());

        let options = Options { cell_size: Some(1e-300), ..Default::default() };
        assert!(generate_with(options, &SpadeTriangulator, &entropy).is_err());
        assert_eq!(entropy.0.load(std::sync::atomic::Ordering::Relaxed), 0);
    }
}
