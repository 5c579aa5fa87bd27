use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use lowpoly_gen::{Pattern, Point};

// canvas space is y-down with the origin at the top left,
// the view is y-up and centered on the canvas
pub fn canvas_to_view(p: Point, width: f64, height: f64) -> Vec2 {
    Vec2::new((p.x - width / 2.0) as f32, (height / 2.0 - p.y) as f32)
}

// flat-shaded triangle list, three vertices per poly so every triangle keeps its own color
pub fn pattern_to_mesh(pattern: &Pattern) -> Mesh {
    let (width, height) = (pattern.width(), pattern.height());
    let points = pattern.points();

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(pattern.polys().len() * 3);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(pattern.polys().len() * 3);

    for poly in pattern.polys() {
        let [a, b, c] = poly.vertices(points).map(|p| canvas_to_view(p, width, height));

        // the pattern keeps the triangulation's winding, the mesh wants ccw
        let (b, c) = if (b - a).perp_dot(c - a) < 0.0 { (c, b) } else { (b, c) };
        positions.extend([a, b, c].map(|v| [v.x, v.y, 0.0]));

        // vertex colors are linear
        let linear: palette::LinSrgb<f32> = poly.color.0.into_linear();
        colors.extend([[linear.red, linear.green, linear.blue, 1.0]; 3]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);

    mesh
}
