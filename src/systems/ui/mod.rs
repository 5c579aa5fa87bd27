use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use lowpoly_gen::rng::{EntropySource, SYSTEM_ENTROPY};
use lowpoly_gen::{colorbrewer, BuiltinColorFunction, ColorOption, ColorSpace};
use lowpoly_gen::config::{DEFAULT_BIAS, DEFAULT_SHADOW_INTENSITY, DEFAULT_SPARKLE_JITTER};

use crate::systems::export::{export_filename, ExportEvent};
use crate::systems::mesh::{CurrentPattern, MosaicParams, RegenerateEvent};
use crate::systems::overlay::PointsVisible;

pub mod indicator;

// re-export the main items that other modules need
pub use indicator::{StatusIndicator, StatusEvent};
pub use indicator::{update_status_indicator, render_status_indicator};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .insert_resource(StatusIndicator::default())
            .add_event::<StatusEvent>()
            .add_systems(Update, (key_input, update_status_indicator))
            .add_systems(EguiPrimaryContextPass, (ui_main, fps, render_status_indicator)); // UI rendering here
    }
}

const COLOR_FUNCTIONS: [BuiltinColorFunction; 3] = [
    BuiltinColorFunction::InterpolateLinear { bias: DEFAULT_BIAS },
    BuiltinColorFunction::Sparkle { jitter_factor: DEFAULT_SPARKLE_JITTER },
    BuiltinColorFunction::Shadows { intensity: DEFAULT_SHADOW_INTENSITY },
];

fn key_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut params: ResMut<MosaicParams>,
    mut points_visible: ResMut<PointsVisible>,
    mut regen_events: EventWriter<RegenerateEvent>,
) {
    // typing into the seed field is not a shortcut
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    if keyboard_input.just_pressed(KeyCode::KeyP) {
        points_visible.0 = !points_visible.0;
    }

    if keyboard_input.just_pressed(KeyCode::KeyR) {
        params.seed = SYSTEM_ENTROPY.seed_string();
        regen_events.write(RegenerateEvent);
    }
}

fn color_option_text(option: &ColorOption) -> &str {
    match option {
        ColorOption::Random => "random",
        ColorOption::Match => "match",
        ColorOption::Palette(name) => name,
        ColorOption::Colors(_) => "custom",
    }
}

fn color_option_combo(ui: &mut egui::Ui, label: &str, option: &mut ColorOption, choices: &[ColorOption]) -> bool {
    let mut changed = false;
    egui::ComboBox::from_label(label)
        .selected_text(color_option_text(option).to_string())
        .show_ui(ui, |ui| {
            for choice in choices {
                changed |= ui.selectable_value(option, choice.clone(), color_option_text(choice)).changed();
            }
        });
    changed
}

fn ui_main(
    mut contexts: EguiContexts,
    mut params: ResMut<MosaicParams>,
    mut points_visible: ResMut<PointsVisible>,
    current: Res<CurrentPattern>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut export_events: EventWriter<ExportEvent>,
) {
    let params = &mut *params;

    // palette keys offered by the gradient pickers
    let palette = params.base.palette.clone().unwrap_or_else(colorbrewer);
    let names: Vec<ColorOption> = palette.names().map(|n| ColorOption::Palette(n.to_string())).collect();

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(250.0)
            .min_width(250.0)
            .max_width(400.0)
            .resizable(true)
            .show(ctx, |ui| {
                let mut regenerate = false;

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        regenerate |= ui.text_edit_singleline(&mut params.seed)
                            .on_hover_text("Same seed and options always give the same mosaic")
                            .changed();
                        if ui.button("Randomize").on_hover_text("R").clicked() {
                            params.seed = SYSTEM_ENTROPY.seed_string();
                            regenerate = true;
                        }
                    });
                });

                // canvas and grid
                egui::CollapsingHeader::new("Geometry")
                    .default_open(true)
                    .show(ui, |ui| {
                    regenerate |= ui.add(egui::Slider::new(&mut params.width, 100.0..=2000.0)
                        .text("Width")
                        .suffix(" px"))
                        .changed();
                    regenerate |= ui.add(egui::Slider::new(&mut params.height, 100.0..=2000.0)
                        .text("Height")
                        .suffix(" px"))
                        .changed();
                    regenerate |= ui.add(egui::Slider::new(&mut params.cell_size, 10.0..=300.0)
                        .text("Cell Size")
                        .suffix(" px"))
                        .on_hover_text("Spacing of the point grid. Smaller cells give more triangles.")
                        .changed();
                    regenerate |= ui.add(egui::Slider::new(&mut params.variance, 0.0..=2.0)
                        .text("Variance"))
                        .on_hover_text("Point jitter as a fraction of the cell size. Zero gives a regular grid.")
                        .changed();
                });

                // coloring
                egui::CollapsingHeader::new("Color")
                    .default_open(true)
                    .show(ui, |ui| {
                    let mut x_choices = vec![ColorOption::Random];
                    x_choices.extend(names.iter().cloned());
                    regenerate |= color_option_combo(ui, "X Gradient", &mut params.x_colors, &x_choices);

                    let mut y_choices = vec![ColorOption::Match, ColorOption::Random];
                    y_choices.extend(names.iter().cloned());
                    regenerate |= color_option_combo(ui, "Y Gradient", &mut params.y_colors, &y_choices);

                    egui::ComboBox::from_label("Color Space")
                        .selected_text(params.color_space.name())
                        .show_ui(ui, |ui| {
                        for space in ColorSpace::ALL {
                            regenerate |= ui.selectable_value(&mut params.color_space, space, space.name()).changed();
                        }
                    });

                    egui::ComboBox::from_label("Function")
                        .selected_text(params.color_function.label())
                        .show_ui(ui, |ui| {
                        for candidate in COLOR_FUNCTIONS {
                            let selected = params.color_function.label() == candidate.label();
                            if ui.selectable_label(selected, candidate.label()).clicked() && !selected {
                                params.color_function = candidate;
                                regenerate = true;
                            }
                        }
                    });

                    // parameter of the selected function
                    regenerate |= match &mut params.color_function {
                        BuiltinColorFunction::InterpolateLinear { bias } => ui
                            .add(egui::Slider::new(bias, 0.0..=1.0).text("Bias"))
                            .on_hover_text("Weight of the y gradient")
                            .changed(),
                        BuiltinColorFunction::Sparkle { jitter_factor } => ui
                            .add(egui::Slider::new(jitter_factor, 0.0..=1.0).text("Jitter"))
                            .on_hover_text("Random gradient offset per triangle")
                            .changed(),
                        BuiltinColorFunction::Shadows { intensity } => ui
                            .add(egui::Slider::new(intensity, 0.0..=2.0).text("Intensity"))
                            .on_hover_text("Darkest possible shadow")
                            .changed(),
                    };
                });

                // presentation
                egui::CollapsingHeader::new("Output")
                    .default_open(true)
                    .show(ui, |ui| {
                    regenerate |= ui.checkbox(&mut params.fill, "Fill")
                        .on_hover_text("Unfilled triangles are drawn as outlines")
                        .changed();
                    regenerate |= ui.add(egui::Slider::new(&mut params.stroke_width, 0.0..=5.0)
                        .text("Stroke Width"))
                        .on_hover_text("Only affects the exported SVG")
                        .changed();
                    ui.checkbox(&mut points_visible.0, "Show Points")
                        .on_hover_text("Overlay the generated points and canvas bounds (P)");
                });

                ui.separator();

                if let Some(pattern) = &current.pattern {
                    ui.label(format!("{} points, {} triangles", pattern.points().len(), pattern.polys().len()));
                }

                // export section
                ui.horizontal(|ui| {
                    if ui.button("Export SVG")
                        .on_hover_text("Export the mosaic as an SVG file, current directory")
                        .clicked() {
                        export_events.write(ExportEvent { filename: export_filename() });
                    }
                });

                ui.separator();
                ui.label("R - New seed");
                ui.label("P - Toggle points");
                ui.label("ESC - Exit");

                // trigger regeneration on any parameter change
                if regenerate {
                    regen_events.write(RegenerateEvent);
                }
            });
    }
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps) = diagnostics
                        .get(&FrameTimeDiagnosticsPlugin::FPS)
                        .and_then(|d| d.smoothed())
                    {
                        ui.label(egui::RichText::new(format!("{fps:.0}"))
                            .size(26.0)
                            .color(egui::Color32::WHITE));
                    }
                });
            });
    }
}
