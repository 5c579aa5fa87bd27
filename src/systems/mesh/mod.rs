// this is the entry point for the mosaic plugin
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use lowpoly_gen::rng::{EntropySource, SYSTEM_ENTROPY};
use lowpoly_gen::{generate, BuiltinColorFunction, ColorOption, ColorSpace, Options, Pattern};

use crate::systems::ui::StatusEvent;

pub mod mesh_gen;

// share of the window the canvas may cover
const VIEW_FILL: f32 = 0.8;

// mosaic parameters editable from the side panel
// anything the panel does not expose (custom palette, supplied points) rides along in `base`
#[derive(Resource, Clone, Debug)]
pub struct MosaicParams {
    pub seed: String,
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub variance: f64,
    pub x_colors: ColorOption,
    pub y_colors: ColorOption,
    pub color_space: ColorSpace,
    pub color_function: BuiltinColorFunction,
    pub fill: bool,
    pub stroke_width: f64,
    pub base: Options,
}

impl MosaicParams {
    pub fn from_options(options: Options) -> Self {
        use lowpoly_gen::config::*;

        // the viewer always works seeded so that tweaking a slider never reshuffles the grid
        let seed = options.seed.clone().unwrap_or_else(|| SYSTEM_ENTROPY.seed_string());
        Self {
            seed,
            width: options.width.unwrap_or(DEFAULT_WIDTH),
            height: options.height.unwrap_or(DEFAULT_HEIGHT),
            cell_size: options.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
            variance: options.variance.unwrap_or(DEFAULT_VARIANCE),
            x_colors: options.x_colors.clone().unwrap_or(ColorOption::Random),
            y_colors: options.y_colors.clone().unwrap_or(ColorOption::Match),
            color_space: options.color_space.unwrap_or_default(),
            color_function: BuiltinColorFunction::default(),
            fill: options.fill.unwrap_or(DEFAULT_FILL),
            stroke_width: options.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
            base: options,
        }
    }

    pub fn to_options(&self) -> Options {
        Options {
            width: Some(self.width),
            height: Some(self.height),
            cell_size: Some(self.cell_size),
            variance: Some(self.variance),
            seed: Some(self.seed.clone()),
            x_colors: Some(self.x_colors.clone()),
            y_colors: Some(self.y_colors.clone()),
            color_space: Some(self.color_space),
            color_function: Some(self.color_function.into()),
            fill: Some(self.fill),
            stroke_width: Some(self.stroke_width),
            ..self.base.clone()
        }
    }
}

// the last successfully generated pattern and the scale it is drawn at
#[derive(Resource, Default)]
pub struct CurrentPattern {
    pub pattern: Option<Pattern>,
    pub scale: f32,
}

// marks the mosaic mesh entity
#[derive(Component)]
pub struct Mosaic;

// Event for regeneration
#[derive(Event)]
pub struct RegenerateEvent;

// main plugin for generation
pub struct MosaicPlugin;

impl Plugin for MosaicPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(CurrentPattern::default())
            .add_event::<RegenerateEvent>()
            .add_event::<crate::systems::export::ExportEvent>()
            .add_systems(Startup, |mut regen_events: EventWriter<RegenerateEvent>| {
                regen_events.write(RegenerateEvent);
            })
            .add_systems(Update, (handle_regeneration, crate::systems::export::handle_export));
    }
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut current: ResMut<CurrentPattern>,
    mut status_events: EventWriter<StatusEvent>,
    params: Res<MosaicParams>,
    query: Query<Entity, With<Mosaic>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    // several panel edits in one frame collapse into one rebuild
    if events.read().count() == 0 {
        return;
    }

    let pattern = match generate(params.to_options()) {
        Ok(pattern) => pattern,
        Err(e) => {
            // keep showing the last good pattern
            error!("generation failed: {e}");
            status_events.write(StatusEvent::error(e.to_string()));
            return;
        }
    };

    // cleanup existing mosaic
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }

    let scale = match windows.single() {
        Ok(window) => {
            let fit_x = window.width() * VIEW_FILL / pattern.width() as f32;
            let fit_y = window.height() * VIEW_FILL / pattern.height() as f32;
            fit_x.min(fit_y)
        }
        Err(_) => 1.0,
    };

    debug!(
        "mosaic rebuilt: {} points, {} triangles, seed {:?}",
        pattern.points().len(),
        pattern.polys().len(),
        params.seed
    );

    // unfilled patterns are drawn as outlines by the overlay
    if pattern.opts().fill {
        commands.spawn((
            Mesh2d(meshes.add(mesh_gen::pattern_to_mesh(&pattern))),
            MeshMaterial2d(materials.add(ColorMaterial::default())),
            Transform::from_scale(Vec3::new(scale, scale, 1.0)),
            Mosaic,
        ));
    }

    current.pattern = Some(pattern);
    current.scale = scale;
}
