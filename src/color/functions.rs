// Built in color functions
//
// A color function receives everything known about one triangle and returns its
// color. The built-ins below are factories returning such functions; any closure
// with the same signature can take their place:
//
//     let faded = ColorFunction::new(|input| input.x_scale.at(input.x_percent).darken(0.2));

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{DEFAULT_BIAS, DEFAULT_SHADOW_INTENSITY, DEFAULT_SPARKLE_JITTER};
use crate::options::ResolvedOptions;
use crate::poly::Point;
use crate::rng::SeededRng;

use super::{mix, Color, Scale};

/// Input bundle handed to a color function, one per triangle.
pub struct ColorInput<'a> {
    pub centroid: Point,        // not normalized, canvas units
    pub x_percent: f64,         // centroid x clamped into [0, 1]
    pub y_percent: f64,         // centroid y clamped into [0, 1]
    pub vertex_indices: [usize; 3],
    pub vertices: [Point; 3],
    pub x_scale: &'a Scale,
    pub y_scale: &'a Scale,
    pub points: &'a [Point],
    pub opts: &'a ResolvedOptions,
    pub rng: &'a mut SeededRng, // color stream, shared by all triangles of a pattern
}

impl ColorInput<'_> {
    /// Draws the next value of the color stream, in [0, 1).
    pub fn random(&mut self) -> f64 {
        self.rng.next_f64()
    }
}

type ColorFn = dyn Fn(&mut ColorInput<'_>) -> Color + Send + Sync;

/// A pluggable per-triangle coloring strategy.
#[derive(Clone)]
pub struct ColorFunction(Arc<ColorFn>);

impl ColorFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ColorInput<'_>) -> Color + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, input: &mut ColorInput<'_>) -> Color {
        (self.0)(input)
    }
}

impl Default for ColorFunction {
    fn default() -> Self {
        interpolate_linear(DEFAULT_BIAS)
    }
}

impl fmt::Debug for ColorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorFunction(..)")
    }
}

/// Mix of the two gradients; `bias` is the weight of the y gradient.
pub fn interpolate_linear(bias: f64) -> ColorFunction {
    ColorFunction::new(move |input| {
        mix(
            input.x_scale.at(input.x_percent),
            input.y_scale.at(input.y_percent),
            bias as f32,
            input.opts.color_space,
        )
    })
}

/// Random offsets on both gradient positions, for higher contrast between cells.
pub fn sparkle(jitter_factor: f64) -> ColorFunction {
    ColorFunction::new(move |input| {
        let x_jitter = (input.random() - 0.5) * jitter_factor;
        let a = input.x_scale.at(input.x_percent + x_jitter);
        let y_jitter = (input.random() - 0.5) * jitter_factor;
        let b = input.y_scale.at(input.y_percent + y_jitter);
        mix(a, b, 0.5, input.opts.color_space)
    })
}

/// Even mix of the gradients, darkened by a random amount up to `intensity`.
pub fn shadows(intensity: f64) -> ColorFunction {
    ColorFunction::new(move |input| {
        let a = input.x_scale.at(input.x_percent);
        let b = input.y_scale.at(input.y_percent);
        let color = mix(a, b, 0.5, input.opts.color_space);
        color.darken((intensity * input.random()) as f32)
    })
}

/// Serializable description of a built-in color function,
/// e.g. `{"kind": "sparkle", "jitterFactor": 0.2}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BuiltinColorFunction {
    InterpolateLinear {
        #[serde(default = "default_bias")]
        bias: f64,
    },
    Sparkle {
        #[serde(default = "default_jitter", rename = "jitterFactor")]
        jitter_factor: f64,
    },
    Shadows {
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
}

fn default_bias() -> f64 {
    DEFAULT_BIAS
}

fn default_jitter() -> f64 {
    DEFAULT_SPARKLE_JITTER
}

fn default_intensity() -> f64 {
    DEFAULT_SHADOW_INTENSITY
}

impl Default for BuiltinColorFunction {
    fn default() -> Self {
        BuiltinColorFunction::InterpolateLinear { bias: DEFAULT_BIAS }
    }
}

impl BuiltinColorFunction {
    pub fn label(&self) -> &'static str {
        match self {
            BuiltinColorFunction::InterpolateLinear { .. } => "Linear",
            BuiltinColorFunction::Sparkle { .. } => "Sparkle",
            BuiltinColorFunction::Shadows { .. } => "Shadows",
        }
    }
}

impl From<BuiltinColorFunction> for ColorFunction {
    fn from(builtin: BuiltinColorFunction) -> Self {
        match builtin {
            BuiltinColorFunction::InterpolateLinear { bias } => interpolate_linear(bias),
            BuiltinColorFunction::Sparkle { jitter_factor } => sparkle(jitter_factor),
            BuiltinColorFunction::Shadows { intensity } => shadows(intensity),
        }
    }
}

impl<'de> Deserialize<'de> for ColorFunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BuiltinColorFunction::deserialize(deserializer).map(Into::into)
    }
}
