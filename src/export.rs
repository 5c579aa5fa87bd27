// serializes a pattern as an svg document
// one path per triangle, in triangle order

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::{DEBUG_POINT_RADIUS, DEBUG_VIEW_MARGIN, DEFAULT_COORDINATE_DECIMALS, SVG_NAMESPACE};
use crate::options::ResolvedOptions;
use crate::pattern::Pattern;
use crate::poly::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SvgOptions {
    /// Emit the `xmlns` attribute on the root element.
    pub include_namespace: bool,
    /// Decimal places kept in path coordinates; negative keeps full precision.
    pub coordinate_decimals: i32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            include_namespace: true,
            coordinate_decimals: DEFAULT_COORDINATE_DECIMALS,
        }
    }
}

impl Pattern {
    pub fn to_svg(&self, svg_opts: &SvgOptions) -> String {
        let opts = self.opts();
        let points: Vec<Point> = self
            .points()
            .iter()
            .map(|p| Point::new(round(p.x, svg_opts.coordinate_decimals), round(p.y, svg_opts.coordinate_decimals)))
            .collect();

        let has_stroke = opts.stroke_width > 0.0;
        let mut paths = String::new();
        for poly in self.polys() {
            let [a, b, c] = poly.vertices(&points);
            let d = format!("M{},{}L{},{}L{},{}Z", a.x, a.y, b.x, b.y, c.x, c.y);
            let css = poly.color.css();

            let attrs = serialize_attrs(&[
                ("d", Some(d)),
                ("fill", opts.fill.then(|| css.clone())),
                ("stroke", has_stroke.then(|| css.clone())),
                ("stroke-width", has_stroke.then(|| opts.stroke_width.to_string())),
                ("stroke-linejoin", has_stroke.then(|| "round".to_string())),
                ("shape-rendering", opts.fill.then(|| "crispEdges".to_string())),
            ]);
            let _ = write!(paths, "<path {attrs}></path>");
        }

        let root = serialize_attrs(&[
            ("xmlns", svg_opts.include_namespace.then(|| SVG_NAMESPACE.to_string())),
            ("width", Some(opts.width.to_string())),
            ("height", Some(opts.height.to_string())),
        ]);
        format!("<svg {root}>{paths}</svg>")
    }

    /// Writes `to_svg` output to `path`.
    pub fn write_svg(&self, path: impl AsRef<Path>, svg_opts: &SvgOptions) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_svg(svg_opts).as_bytes())?;
        writer.flush()
    }
}

/// Raw points as small circles over a blue canvas outline, with a margin
/// around the canvas so the bleed is visible.
pub fn debug_points_svg(opts: &ResolvedOptions, points: &[Point]) -> String {
    let margin = DEBUG_VIEW_MARGIN;
    let mut svg = format!(
        "<svg xmlns='{SVG_NAMESPACE}' width='{}' height='{}' viewBox='{} {} {} {}'>",
        opts.width + 4.0 * margin,
        opts.height + 4.0 * margin,
        -margin,
        -margin,
        opts.width + 2.0 * margin,
        opts.height + 2.0 * margin,
    );
    for p in points {
        let _ = write!(svg, "<circle cx='{}' cy='{}' r='{}'></circle>", p.x, p.y, DEBUG_POINT_RADIUS);
    }
    let _ = write!(
        svg,
        "<rect x='0' y='0' width='{}' height='{}' stroke-width='1' stroke='blue' fill='none'></rect></svg>",
        opts.width, opts.height
    );
    svg
}

// attributes set to None are left out
fn serialize_attrs(attrs: &[(&str, Option<String>)]) -> String {
    attrs
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}='{v}'")))
        .collect::<Vec<_>>()
        .join(" ")
}

fn round(value: f64, decimals: i32) -> f64 {
    if decimals < 0 {
        return value;
    }
    let factor = 10f64.powi(decimals);
    // adding zero turns -0 into 0
    (value * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ColorOption, Options};
    use crate::pattern::generate;

    fn single_triangle(fill: bool, stroke_width: f64) -> Pattern {
        let options = Options {
            width: Some(10.0),
            height: Some(10.0),
            seed: Some("svg".into()),
            x_colors: Some(ColorOption::Colors(vec!["#ff0000".into()])),
            fill: Some(fill),
            stroke_width: Some(stroke_width),
            points: Some(vec![Point::new(0.04, -0.04), Point::new(3.26, 0.0), Point::new(0.0, 3.0)]),
            ..Default::default()
        };
        generate(options).unwrap()
    }

    #[test]
    fn rounds_coordinates() {
        assert_eq!(round(3.26, 1), 3.3);
        assert_eq!(round(-0.04, 1).to_string(), "0");
        assert_eq!(round(1.23456, -1), 1.23456);
        assert_eq!(round(2.5, 0), 3.0);
    }

    #[test]
    fn filled_paths_use_crisp_edges_and_no_stroke() {
        let svg = single_triangle(true, 0.0).to_svg(&SvgOptions::default());
        assert!(svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg' width='10' height='10'>"));
        assert!(svg.ends_with("</path></svg>"));
        assert!(svg.contains("fill='rgb(255,0,0)'"));
        assert!(svg.contains("shape-rendering='crispEdges'"));
        assert!(!svg.contains("stroke"));
        assert_eq!(svg.matches("<path ").count(), 1);

        let pattern = single_triangle(true, 0.0);
        let [a, b, c] = pattern.polys()[0].vertex_indices;
        let rounded = ["0,0", "3.3,0", "0,3"];
        let d = format!("d='M{}L{}L{}Z'", rounded[a], rounded[b], rounded[c]);
        assert!(svg.contains(&d), "{svg}");
    }

    #[test]
    fn stroked_paths_without_fill() {
        let svg = single_triangle(false, 1.5).to_svg(&SvgOptions::default());
        assert!(svg.contains("stroke='rgb(255,0,0)'"));
        assert!(svg.contains("stroke-width='1.5'"));
        assert!(svg.contains("stroke-linejoin='round'"));
        assert!(!svg.contains("fill="));
        assert!(!svg.contains("crispEdges"));
    }

    #[test]
    fn namespace_and_rounding_are_optional() {
        let svg_opts = SvgOptions { include_namespace: false, coordinate_decimals: -1 };
        let svg = single_triangle(true, 0.0).to_svg(&svg_opts);
        assert!(svg.starts_with("<svg width='10' height='10'>"));
        assert!(svg.contains("3.26,0"));
        assert!(svg.contains("0.04,-0.04"));
    }

    #[test]
    fn debug_render_shows_points_and_bounds() {
        let pattern = single_triangle(true, 0.0);
        let svg = debug_points_svg(pattern.opts(), pattern.points());
        assert!(svg.contains("viewBox='-100 -100 210 210'"));
        assert!(svg.contains("width='410' height='410'"));
        assert_eq!(svg.matches("<circle ").count(), 3);
        assert!(svg.contains("<circle cx='3.26' cy='0' r='2'></circle>"));
        assert!(svg.contains("stroke='blue'"));
    }
}
