//! Seedable low-poly mosaics: a jittered point grid, Delaunay triangulated,
//! each triangle colored by sampling two gradients at its centroid.
//!
//! ```no_run
//! use lowpoly_gen::{generate, Options, SvgOptions};
//!
//! let options = Options::from_json_str(r#"{"seed": "hello", "cellSize": 40}"#)?;
//! let svg = generate(options)?.to_svg(&SvgOptions::default());
//! # Ok::<(), lowpoly_gen::ValidationError>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod options;
pub mod pattern;
pub mod poly;
pub mod rng;

pub use color::functions::{interpolate_linear, shadows, sparkle, BuiltinColorFunction, ColorFunction, ColorInput};
pub use color::{mix, Color, ColorSpace, Scale};
pub use error::{Result, ValidationError};
pub use export::{debug_points_svg, SvgOptions};
pub use options::{colorbrewer, ColorOption, Options, Palette, ResolvedOptions};
pub use pattern::{generate, generate_with, Pattern};
pub use poly::colorize::Poly;
pub use poly::triangulate::{SpadeTriangulator, Triangulator};
pub use poly::{Point, Triangle};
pub use rng::{EntropySource, SeededRng, SystemEntropy, SYSTEM_ENTROPY};
