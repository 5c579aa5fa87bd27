// handles point generation, triangulation and per-triangle coloring

use serde::{Deserialize, Serialize};

pub mod colorize;
pub mod point_gen;
pub mod triangulate;
pub mod utils;

/// A canvas-space position; may sit outside the canvas in the bleed margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Three indices into the shared point list, in triangulation order.
pub type Triangle = [usize; 3];
