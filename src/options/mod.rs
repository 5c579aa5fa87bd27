// option handling
// user options are merged over the defaults in config.rs, validated, and the
// palette shortcuts ("random", "match", palette keys) turned into color lists

use std::sync::Arc;

use log::debug;
use serde::Deserialize;

use crate::color::functions::ColorFunction;
use crate::color::{Color, ColorSpace, Scale};
use crate::config::*;
use crate::error::{Result, ValidationError};
use crate::poly::Point;
use crate::poly::point_gen::grid_dimensions;
use crate::rng::SeededRng;

pub mod palette;

pub use palette::{colorbrewer, Palette};

/// Every option name a configuration may contain.
pub const OPTION_NAMES: [&str; 13] = [
    "width",
    "height",
    "cellSize",
    "variance",
    "seed",
    "xColors",
    "yColors",
    "palette",
    "colorSpace",
    "colorFunction",
    "fill",
    "strokeWidth",
    "points",
];

/// Gradient endpoint choice for one axis.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawColorOption")]
pub enum ColorOption {
    /// A palette entry picked with one draw of the geometry stream.
    Random,
    /// Reuse the x gradient (y axis only).
    Match,
    /// A key of the active palette.
    Palette(String),
    /// Literal color list.
    Colors(Vec<String>),
}

impl ColorOption {
    fn keyword(&self) -> Option<&str> {
        match self {
            ColorOption::Random => Some("random"),
            ColorOption::Match => Some("match"),
            ColorOption::Palette(name) => Some(name),
            ColorOption::Colors(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColorOption {
    Keyword(String),
    Colors(Vec<String>),
}

impl From<RawColorOption> for ColorOption {
    fn from(raw: RawColorOption) -> Self {
        match raw {
            RawColorOption::Colors(colors) => ColorOption::Colors(colors),
            RawColorOption::Keyword(word) => match word.as_str() {
                "random" => ColorOption::Random,
                "match" => ColorOption::Match,
                _ => ColorOption::Palette(word),
            },
        }
    }
}

/// User configuration; unset fields take the defaults from `config`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub cell_size: Option<f64>,
    pub variance: Option<f64>,
    pub seed: Option<String>,
    pub x_colors: Option<ColorOption>,
    pub y_colors: Option<ColorOption>,
    pub palette: Option<Palette>,
    pub color_space: Option<ColorSpace>,
    pub color_function: Option<ColorFunction>,
    pub fill: Option<bool>,
    pub stroke_width: Option<f64>,
    pub points: Option<Vec<Point>>,
}

impl Options {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Rejects the first key that is not an option name, then deserializes.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = &value else {
            return Err(ValidationError::Malformed("options must be a JSON object".to_string()));
        };
        if let Some(key) = map.keys().find(|key| !OPTION_NAMES.contains(&key.as_str())) {
            return Err(ValidationError::UnrecognizedOption(key.clone()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Checks the canvas and grid geometry without touching any random
    /// stream. Supplied points skip the grid size check.
    pub fn validate(&self) -> Result<()> {
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        let height = self.height.unwrap_or(DEFAULT_HEIGHT);
        let cell_size = self.cell_size.unwrap_or(DEFAULT_CELL_SIZE);

        // written so NaN fails too
        if !(height > 0.0 && height.is_finite()) {
            return Err(ValidationError::InvalidHeight(height));
        }
        if !(width > 0.0 && width.is_finite()) {
            return Err(ValidationError::InvalidWidth(width));
        }
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(ValidationError::InvalidCellSize(cell_size));
        }
        if self.points.is_none() {
            grid_dimensions(width, height, cell_size)?;
        }
        Ok(())
    }

    /// Merges over the defaults and validates. Resolving `"random"` draws
    /// from `rng`, which is the same stream the grid jitter uses afterwards.
    pub fn resolve(self, rng: &mut SeededRng) -> Result<ResolvedOptions> {
        self.validate()?;
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        let height = self.height.unwrap_or(DEFAULT_HEIGHT);
        let cell_size = self.cell_size.unwrap_or(DEFAULT_CELL_SIZE);

        let palette = self.palette.unwrap_or_default();
        let x_option = self.x_colors.unwrap_or(ColorOption::Random);
        let y_option = self.y_colors.unwrap_or(ColorOption::Match);

        let x_colors = resolve_colors(&x_option, &palette, rng)?;
        let y_colors = match y_option {
            ColorOption::Match => Arc::clone(&x_colors),
            other => resolve_colors(&other, &palette, rng)?,
        };
        debug!("resolved gradients: {} x stops, {} y stops", x_colors.len(), y_colors.len());

        Ok(ResolvedOptions {
            width,
            height,
            cell_size,
            variance: self.variance.unwrap_or(DEFAULT_VARIANCE),
            seed: self.seed,
            x_colors,
            y_colors,
            palette,
            color_space: self.color_space.unwrap_or_default(),
            color_function: self.color_function.unwrap_or_default(),
            fill: self.fill.unwrap_or(DEFAULT_FILL),
            stroke_width: self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            points: self.points,
        })
    }
}

// palette keys win over the "random" keyword, literal lists pass through
fn resolve_colors(option: &ColorOption, palette: &Palette, rng: &mut SeededRng) -> Result<Arc<Vec<Color>>> {
    let names: &[String] = match option {
        ColorOption::Colors(colors) => colors,
        other => {
            let keyword = other.keyword().unwrap_or_default();
            match (palette.get(keyword), other) {
                (Some(colors), _) => colors,
                (None, ColorOption::Random) => palette.random_entry(rng).ok_or(ValidationError::EmptyPalette)?,
                _ => return Err(ValidationError::UnrecognizedColorOption(keyword.to_string())),
            }
        }
    };

    if names.is_empty() {
        return Err(ValidationError::EmptyColorList);
    }
    let colors = names.iter().map(|name| Color::parse(name)).collect::<Result<Vec<_>>>()?;
    Ok(Arc::new(colors))
}

/// Options with every default applied and every shortcut resolved.
#[derive(Clone, Debug)]
pub struct ResolvedOptions {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub variance: f64,
    pub seed: Option<String>,
    pub x_colors: Arc<Vec<Color>>,
    pub y_colors: Arc<Vec<Color>>, // same allocation as x_colors when "match"
    pub palette: Palette,
    pub color_space: ColorSpace,
    pub color_function: ColorFunction,
    pub fill: bool,
    pub stroke_width: f64,
    pub points: Option<Vec<Point>>,
}

impl ResolvedOptions {
    pub fn x_scale(&self) -> Scale {
        Scale::new(Arc::clone(&self.x_colors), self.color_space)
    }

    pub fn y_scale(&self) -> Scale {
        Scale::new(Arc::clone(&self.y_colors), self.color_space)
    }
}
