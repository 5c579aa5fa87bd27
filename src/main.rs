use bevy::prelude::*;
use bevy::window::WindowPlugin;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy_egui::EguiPlugin;

use lowpoly_gen::Options;
use lowpoly_gen::config::{VIEWER_WINDOW_HEIGHT, VIEWER_WINDOW_WIDTH};

mod systems;

// import modules here
use systems::mesh::{MosaicParams, MosaicPlugin};
use systems::overlay::OverlayPlugin;
use systems::ui::UIPlugin;

fn main() -> AppExit {
    // optional first argument: path to a JSON options file
    let options = match load_options(std::env::args().nth(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "lowpoly".to_string(),
                mode: bevy::window::WindowMode::Windowed,
                resolution: bevy::window::WindowResolution::new(VIEWER_WINDOW_WIDTH, VIEWER_WINDOW_HEIGHT),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())

        // my custom plugins
        .add_plugins(MosaicPlugin)
        .add_plugins(OverlayPlugin)
        .add_plugins(UIPlugin)

        .insert_resource(MosaicParams::from_options(options))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.09))) // backdrop color
        .add_systems(Startup, start)
        .add_systems(Update, handle_exit)
        .run()
}

fn load_options(path: Option<String>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("could not read {path}: {e}"))?;
    Options::from_json_str(&json).map_err(|e| format!("{path}: {e}"))
}

// application entry point here
fn start(mut commands: Commands) {
    commands.spawn(Camera2d);
}

// application exit
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
