// Configuration file, all measurements in canvas units (1 unit = 1 output pixel)
// These are the defaults every unset option falls back to

// Canvas size
pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;

// Grid parameters
pub const DEFAULT_CELL_SIZE: f64 = 75.0;
pub const DEFAULT_VARIANCE: f64 = 0.75;  // jitter as a fraction of the cell size
pub const BLEED_CELLS: usize = 4;        // two extra cells on every side of the canvas
pub const MAX_GRID_POINTS: usize = 1 << 24; // padded grid cap, larger grids are rejected

// Presentation, passed through untouched
pub const DEFAULT_FILL: bool = true;
pub const DEFAULT_STROKE_WIDTH: f64 = 0.0;

// Color function parameters
pub const DEFAULT_BIAS: f64 = 0.5;             // x/y weight of the linear interpolation
pub const DEFAULT_SPARKLE_JITTER: f64 = 0.15;  // max gradient offset of the sparkle effect
pub const DEFAULT_SHADOW_INTENSITY: f64 = 0.8; // darkest shadow of the shadows effect

// appended to the seed to derive the color stream,
// so swapping color functions never moves the geometry
pub const COLOR_SEED_SALT: &str = "42";

// CIE L* units removed per unit of darken amount
pub const LAB_DARKEN_STEP: f32 = 18.0;
// max sRGB channel spread for a color to count as grey when mixing hues
pub const GREY_TOLERANCE: f32 = 1.0 / 512.0;

// SVG output
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const DEFAULT_COORDINATE_DECIMALS: i32 = 1;
pub const DEBUG_POINT_RADIUS: f64 = 2.0;
pub const DEBUG_VIEW_MARGIN: f64 = 100.0;

// Viewer parameters
pub const VIEWER_WINDOW_WIDTH: f32 = 1440.0;
pub const VIEWER_WINDOW_HEIGHT: f32 = 900.0;
pub const INDICATOR_DURATION: f32 = 2.5; // seconds a status message stays on screen
