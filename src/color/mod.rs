// color values, interpolation spaces and gradient scales
// the color math itself is delegated to the `palette` crate

use std::fmt;
use std::sync::Arc;

use palette::white_point::D65;
use palette::{FromColor, Hsl, Hsv, Lab, Lch, LinSrgb, Mix, Oklab, Oklch, Srgb};
use serde::{Deserialize, Serialize};

use crate::config::{GREY_TOLERANCE, LAB_DARKEN_STEP};
use crate::error::{Result, ValidationError};

pub mod functions;

type HslF = Hsl<palette::encoding::Srgb, f32>;
type HsvF = Hsv<palette::encoding::Srgb, f32>;
type LabF = Lab<D65, f32>;
type LchF = Lch<D65, f32>;
type OklabF = Oklab<f32>;
type OklchF = Oklch<f32>;

/// An sRGB color with components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub Srgb<f32>);

impl Color {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Parses `#rgb`, `#rrggbb` or a CSS color name.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            let rgb: Srgb<u8> = hex.parse().map_err(|err| ValidationError::InvalidColor {
                color: text.to_string(),
                reason: format!("{err}"),
            })?;
            return Ok(Self(rgb.into_format()));
        }

        palette::named::from_str(&trimmed.to_ascii_lowercase())
            .map(|rgb| Self(rgb.into_format()))
            .ok_or_else(|| ValidationError::InvalidColor {
                color: text.to_string(),
                reason: "not a hex code or color name".to_string(),
            })
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let rgb: Srgb<u8> = self.0.into_format();
        [rgb.red, rgb.green, rgb.blue]
    }

    /// CSS functional notation, `rgb(r,g,b)`.
    pub fn css(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r},{g},{b})")
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Lowers CIE L* by `LAB_DARKEN_STEP * amount`.
    pub fn darken(self, amount: f32) -> Self {
        let mut lab = LabF::from_color(self.0);
        lab.l -= LAB_DARKEN_STEP * amount;
        Self(Srgb::from_color(lab))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

/// The space two colors are blended in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Rgb,
    Lrgb,
    Hsl,
    Hsv,
    #[default]
    Lab,
    #[serde(alias = "hcl")]
    Lch,
    Oklab,
    Oklch,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 8] = [
        ColorSpace::Rgb,
        ColorSpace::Lrgb,
        ColorSpace::Hsl,
        ColorSpace::Hsv,
        ColorSpace::Lab,
        ColorSpace::Lch,
        ColorSpace::Oklab,
        ColorSpace::Oklch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Lrgb => "lrgb",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Lab => "lab",
            ColorSpace::Lch => "lch",
            ColorSpace::Oklab => "oklab",
            ColorSpace::Oklch => "oklch",
        }
    }
}

/// Blends `a` toward `b`; `t = 0` gives `a`, `t = 1` gives `b`.
pub fn mix(a: Color, b: Color, t: f32, space: ColorSpace) -> Color {
    let (a, b) = (a.0, b.0);
    let greys = (is_grey(a), is_grey(b));
    let mixed: Srgb<f32> = match space {
        ColorSpace::Rgb => lerp_rgb(a, b, t),
        ColorSpace::Lrgb => {
            let (la, lb): (LinSrgb<f32>, LinSrgb<f32>) = (a.into_linear(), b.into_linear());
            Srgb::from_linear(lerp_rgb(la, lb, t))
        }
        ColorSpace::Hsl => {
            let (mut ha, mut hb) = (HslF::from_color(a), HslF::from_color(b));
            borrow_hue(&mut ha.hue, &mut hb.hue, greys);
            Srgb::from_color(ha.mix(hb, t))
        }
        ColorSpace::Hsv => {
            let (mut ha, mut hb) = (HsvF::from_color(a), HsvF::from_color(b));
            borrow_hue(&mut ha.hue, &mut hb.hue, greys);
            Srgb::from_color(ha.mix(hb, t))
        }
        ColorSpace::Lab => Srgb::from_color(LabF::from_color(a).mix(LabF::from_color(b), t)),
        ColorSpace::Lch => {
            let (mut ha, mut hb) = (LchF::from_color(a), LchF::from_color(b));
            borrow_hue(&mut ha.hue, &mut hb.hue, greys);
            Srgb::from_color(ha.mix(hb, t))
        }
        ColorSpace::Oklab => Srgb::from_color(OklabF::from_color(a).mix(OklabF::from_color(b), t)),
        ColorSpace::Oklch => {
            let (mut ha, mut hb) = (OklchF::from_color(a), OklchF::from_color(b));
            borrow_hue(&mut ha.hue, &mut hb.hue, greys);
            Srgb::from_color(ha.mix(hb, t))
        }
    };
    Color(mixed)
}

// greys report hue 0, which would bend the path through red
fn is_grey(c: Srgb<f32>) -> bool {
    let max = c.red.max(c.green).max(c.blue);
    let min = c.red.min(c.green).min(c.blue);
    max - min < GREY_TOLERANCE
}

// a grey endpoint takes the other endpoint's hue
fn borrow_hue<H: Copy>(hue_a: &mut H, hue_b: &mut H, greys: (bool, bool)) {
    match greys {
        (true, false) => *hue_a = *hue_b,
        (false, true) => *hue_b = *hue_a,
        _ => {}
    }
}

fn lerp_rgb<S>(a: palette::rgb::Rgb<S, f32>, b: palette::rgb::Rgb<S, f32>, t: f32) -> palette::rgb::Rgb<S, f32> {
    palette::rgb::Rgb::new(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    )
}

/// A gradient over evenly spaced color stops, sampled on [0, 1].
#[derive(Clone, Debug)]
pub struct Scale {
    colors: Arc<Vec<Color>>,
    space: ColorSpace,
}

impl Scale {
    pub fn new(colors: Arc<Vec<Color>>, space: ColorSpace) -> Self {
        Self { colors, space }
    }

    /// Color at `t`; values outside [0, 1] sample the nearest end.
    pub fn at(&self, t: f64) -> Color {
        let n = self.colors.len();
        match n {
            0 => Color::new(0.0, 0.0, 0.0),
            1 => self.colors[0],
            _ => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                let segments = (n - 1) as f64;
                let position = t * segments;
                let idx = (position.floor() as usize).min(n - 2);
                let local = position - idx as f64;
                mix(self.colors[idx], self.colors[idx + 1], local as f32, self.space)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        let (a, b) = (a.to_rgb8(), b.to_rgb8());
        a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
    }

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(Color::parse("#ff0000").unwrap().to_rgb8(), [255, 0, 0]);
        assert_eq!(Color::parse("#0f0").unwrap().to_rgb8(), [0, 255, 0]);
        assert_eq!(Color::parse("Blue").unwrap().to_rgb8(), [0, 0, 255]);
        assert!(matches!(
            Color::parse("not-a-color"),
            Err(ValidationError::InvalidColor { .. })
        ));
        assert!(Color::parse("#zzzzzz").is_err());
    }

    #[test]
    fn serializes_css_and_hex() {
        let c = Color::parse("#08306b").unwrap();
        assert_eq!(c.css(), "rgb(8,48,107)");
        assert_eq!(c.hex(), "#08306b");
        assert_eq!(c.to_string(), "rgb(8,48,107)");
    }

    #[test]
    fn rgb_mix_is_componentwise() {
        let black = Color::new(0.0, 0.0, 0.0);
        let white = Color::new(1.0, 1.0, 1.0);
        assert_eq!(mix(black, white, 0.5, ColorSpace::Rgb), Color::new(0.5, 0.5, 0.5));
        assert_eq!(mix(black, white, 0.0, ColorSpace::Rgb), black);
    }

    #[test]
    fn mix_endpoints_round_trip_in_every_space() {
        let a = Color::parse("#d73027").unwrap();
        let b = Color::parse("#4575b4").unwrap();
        for space in ColorSpace::ALL {
            assert!(close(mix(a, b, 0.0, space), a), "{space:?} start");
            assert!(close(mix(a, b, 1.0, space), b), "{space:?} end");
        }
    }

    #[test]
    fn grey_endpoint_keeps_the_other_hue() {
        let white = Color::new(1.0, 1.0, 1.0);
        let blue = Color::parse("blue").unwrap();
        let hue_of = |c: Color, space| match space {
            ColorSpace::Hsl => HslF::from_color(c.0).hue.into_positive_degrees(),
            ColorSpace::Hsv => HsvF::from_color(c.0).hue.into_positive_degrees(),
            ColorSpace::Lch => LchF::from_color(c.0).hue.into_positive_degrees(),
            _ => OklchF::from_color(c.0).hue.into_positive_degrees(),
        };

        for space in [ColorSpace::Hsl, ColorSpace::Hsv, ColorSpace::Lch, ColorSpace::Oklch] {
            for mixed in [mix(white, blue, 0.5, space), mix(blue, white, 0.5, space)] {
                let gap = (hue_of(mixed, space) - hue_of(blue, space)).rem_euclid(360.0);
                assert!(gap.min(360.0 - gap) < 1.0, "{space:?} drifted to {mixed:?}");
                let [r, g, b] = mixed.to_rgb8();
                assert!(b > r && b > g, "{space:?} lost blue: {mixed:?}");
            }
        }
    }

    #[test]
    fn grey_to_grey_stays_grey() {
        let black = Color::new(0.0, 0.0, 0.0);
        let white = Color::new(1.0, 1.0, 1.0);
        for space in ColorSpace::ALL {
            let [r, g, b] = mix(black, white, 0.5, space).to_rgb8();
            assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1, "{space:?}");
        }
    }

    #[test]
    fn darken_lowers_lightness() {
        let c = Color::parse("#4292c6").unwrap();
        let dark = c.darken(1.0);
        let l_before = LabF::from_color(c.0).l;
        let l_after = LabF::from_color(dark.0).l;
        assert!(l_after < l_before);
        assert!(close(c.darken(0.0), c));
    }

    #[test]
    fn scale_hits_stops_and_clamps() {
        let stops = Arc::new(vec![
            Color::parse("#000000").unwrap(),
            Color::parse("#ff0000").unwrap(),
            Color::parse("#ffffff").unwrap(),
        ]);
        let scale = Scale::new(stops.clone(), ColorSpace::Rgb);
        assert_eq!(scale.at(0.0), stops[0]);
        assert_eq!(scale.at(0.5), stops[1]);
        assert_eq!(scale.at(1.0), stops[2]);
        assert_eq!(scale.at(-0.3), stops[0]);
        assert_eq!(scale.at(1.7), stops[2]);
        assert_eq!(scale.at(0.25).to_rgb8(), [128, 0, 0]);
    }

    #[test]
    fn single_stop_scale_is_constant() {
        let only = Color::parse("#123456").unwrap();
        let scale = Scale::new(Arc::new(vec![only]), ColorSpace::Lab);
        assert_eq!(scale.at(0.0), only);
        assert_eq!(scale.at(0.9), only);
    }

    #[test]
    fn color_space_names_deserialize() {
        let space: ColorSpace = serde_json::from_str("\"oklch\"").unwrap();
        assert_eq!(space, ColorSpace::Oklch);
        let hcl: ColorSpace = serde_json::from_str("\"hcl\"").unwrap();
        assert_eq!(hcl, ColorSpace::Lch);
        assert!(serde_json::from_str::<ColorSpace>("\"cmyk\"").is_err());
    }
}
