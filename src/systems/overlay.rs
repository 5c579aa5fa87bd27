use bevy::prelude::*;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};

use lowpoly_gen::config::DEBUG_POINT_RADIUS;

use crate::systems::mesh::CurrentPattern;
use crate::systems::mesh::mesh_gen::canvas_to_view;

// debug overlay for the generated points and the canvas bounds,
// so the bleed margin around the canvas can be inspected
pub struct OverlayPlugin;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct OverlayGizmoGroup;

#[derive(Resource)]
pub struct PointsVisible(pub bool);

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(PointsVisible(false))
            .init_gizmo_group::<OverlayGizmoGroup>()
            .add_systems(Startup, setup_gizmos)
            .add_systems(Update, (draw_outlines, draw_overlay));
    }
}

fn setup_gizmos(
    mut config_store: ResMut<GizmoConfigStore>
) {
    let (config, _) = config_store.config_mut::<OverlayGizmoGroup>();
    config.line.width = 1.0;
}

// unfilled patterns have no mesh, their triangles are stroked in their own color
fn draw_outlines(
    mut gizmos: Gizmos,
    current: Res<CurrentPattern>,
) {
    let Some(pattern) = &current.pattern else {
        return;
    };
    if pattern.opts().fill {
        return;
    }

    let (width, height, scale) = (pattern.width(), pattern.height(), current.scale);
    for poly in pattern.polys() {
        let [a, b, c] = poly.vertices(pattern.points()).map(|p| canvas_to_view(p, width, height) * scale);
        let [r, g, bl] = poly.color.to_rgb8();
        gizmos.linestrip_2d([a, b, c, a], Color::srgb_u8(r, g, bl));
    }
}

fn draw_overlay(
    mut gizmos: Gizmos<OverlayGizmoGroup>,
    current: Res<CurrentPattern>,
    visible: Res<PointsVisible>,
) {
    if !visible.0 {
        return;
    }
    let Some(pattern) = &current.pattern else {
        return;
    };

    let (width, height, scale) = (pattern.width(), pattern.height(), current.scale);

    // generated points, bleed included
    for p in pattern.points() {
        gizmos.circle_2d(
            canvas_to_view(*p, width, height) * scale,
            DEBUG_POINT_RADIUS as f32,
            Color::srgba(1.0, 1.0, 1.0, 0.8),
        );
    }

    // canvas bounds
    gizmos.rect_2d(
        Vec2::ZERO,
        Vec2::new(width as f32, height as f32) * scale,
        Color::srgb(0.2, 0.4, 1.0),
    );
}
