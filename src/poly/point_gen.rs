// handles point generation logic

use crate::config::{BLEED_CELLS, MAX_GRID_POINTS};
use crate::error::{Result, ValidationError};
use crate::options::ResolvedOptions;
use crate::rng::SeededRng;

use super::Point;

/// Column and row count of the padded grid, or `GridTooLarge` when the
/// grid would exceed `MAX_GRID_POINTS`.
pub fn grid_dimensions(width: f64, height: f64, cell_size: f64) -> Result<(usize, usize)> {
    // `as usize` saturates, so bound the float before converting
    let cells = |extent: f64| {
        let n = (extent / cell_size).floor();
        if n.is_finite() && n >= 0.0 && n <= MAX_GRID_POINTS as f64 {
            (n as usize).checked_add(BLEED_CELLS)
        } else {
            None
        }
    };

    match (cells(width), cells(height)) {
        (Some(col_count), Some(row_count))
            if col_count.checked_mul(row_count).is_some_and(|n| n <= MAX_GRID_POINTS) =>
        {
            Ok((col_count, row_count))
        }
        _ => Err(ValidationError::GridTooLarge { width, height, cell_size }),
    }
}

// generates a jittered lattice covering the canvas plus the bleed margin,
// row-major; every point takes two draws from `rng`, x first
pub fn pgen(opts: &ResolvedOptions, rng: &mut SeededRng) -> Result<Vec<Point>> {
    let (width, height, cell_size) = (opts.width, opts.height, opts.cell_size);
    let (col_count, row_count) = grid_dimensions(width, height, cell_size)?;

    // bleed keeps the padded grid centered over the canvas
    let bleed_x = (col_count as f64 * cell_size - width) / 2.0;
    let bleed_y = (row_count as f64 * cell_size - height) / 2.0;

    let cell_jitter = cell_size * opts.variance;
    let half_cell = cell_size / 2.0;
    let point_count = col_count * row_count;

    let mut points = Vec::with_capacity(point_count);
    for i in 0..point_count {
        let col = i % col_count;
        let row = i / col_count;

        let x = -bleed_x + col as f64 * cell_size + half_cell + (rng.next_f64() - 0.5) * cell_jitter;
        let y = -bleed_y + row as f64 * cell_size + half_cell + (rng.next_f64() - 0.5) * cell_jitter;
        points.push(Point::new(x, y));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn resolved(variance: f64) -> ResolvedOptions {
        let options = Options {
            width: Some(600.0),
            height: Some(400.0),
            cell_size: Some(75.0),
            variance: Some(variance),
            x_colors: Some(crate::options::ColorOption::Palette("Blues".into())),
            ..Default::default()
        };
        options.resolve(&mut SeededRng::from_seed_str("grid")).unwrap()
    }

    #[test]
    fn grid_pads_two_cells_per_side() {
        assert_eq!(grid_dimensions(600.0, 400.0, 75.0).unwrap(), (12, 9));
        assert_eq!(grid_dimensions(100.0, 100.0, 75.0).unwrap(), (5, 5));
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let too_large = |w: f64, h: f64, c: f64| {
            matches!(grid_dimensions(w, h, c), Err(ValidationError::GridTooLarge { .. }))
        };
        assert!(too_large(1e30, 400.0, 75.0));
        assert!(too_large(600.0, f64::INFINITY, 75.0));
        assert!(too_large(600.0, 400.0, 1e-300));
        // each axis fits on its own, the product does not
        assert!(too_large(1e6, 1e6, 1.0));
        assert!(grid_dimensions(4000.0, 4000.0, 1.0).is_ok());
    }

    #[test]
    fn zero_variance_is_a_regular_lattice() {
        let opts = resolved(0.0);
        let points = pgen(&opts, &mut SeededRng::from_seed_str("grid")).unwrap();
        assert_eq!(points.len(), (600 / 75 + 4) * (400 / 75 + 4));

        // bleed_x = (12 * 75 - 600) / 2 = 150, bleed_y = (9 * 75 - 400) / 2 = 137.5
        for (i, p) in points.iter().enumerate() {
            let (col, row) = ((i % 12) as f64, (i / 12) as f64);
            assert_eq!(p.x, -150.0 + col * 75.0 + 37.5);
            assert_eq!(p.y, -137.5 + row * 75.0 + 37.5);
        }
    }

    #[test]
    fn jitter_stays_within_cell_fraction() {
        let opts = resolved(0.5);
        let points = pgen(&opts, &mut SeededRng::from_seed_str("grid")).unwrap();
        let max_offset = 75.0 * 0.5 / 2.0;
        for (i, p) in points.iter().enumerate() {
            let (col, row) = ((i % 12) as f64, (i / 12) as f64);
            assert!((p.x - (-112.5 + col * 75.0)).abs() <= max_offset);
            assert!((p.y - (-100.0 + row * 75.0)).abs() <= max_offset);
        }
    }

    #[test]
    fn each_point_takes_two_draws() {
        let opts = resolved(0.75);
        let mut rng = SeededRng::from_seed_str("grid");
        let points = pgen(&opts, &mut rng).unwrap();

        let mut ahead = SeededRng::from_seed_str("grid");
        for _ in 0..points.len() * 2 {
            ahead.next_f64();
        }
        assert_eq!(rng.next_f64(), ahead.next_f64());

        let mut replay = SeededRng::from_seed_str("grid");
        let first_x = -112.5 + (replay.next_f64() - 0.5) * (75.0 * 0.75);
        assert_eq!(points[0].x, first_x);
    }

    #[test]
    fn large_variance_is_accepted() {
        let opts = resolved(3.0);
        let points = pgen(&opts, &mut SeededRng::from_seed_str("grid")).unwrap();
        assert_eq!(points.len(), 108);
    }
}
