use egui::{Color32, Context, RichText, ScrollArea, Ui};

use crate::flower::{PRESETS, SLIDER_RANGES};
use crate::renderer::CameraMode;
use crate::ui::state::{DisplayMode, UiState};
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub randomize: bool,
    pub load_preset: Option<usize>,
    pub export_params: bool,
    pub import_params: bool,
    pub export_obj: bool,
    pub reset_view: bool,
}

/// Per-frame numbers the app feeds back into the stats panel.
pub struct RenderStats {
    pub fps: f32,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub rebuild_ms: f32,
}

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    stats: &RenderStats,
    last_error: &Option<String>,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(340.0)
        .max_width(420.0)
        .default_width(360.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("FLORA 3D").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Parametric Flower Generator")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(16.0);

                section_header(ui, "PRESET");
                preset_picker(ui, state, &mut actions);
                ui.add_space(16.0);

                section_header(ui, "RESOLUTION");
                let mut changed = false;
                changed |= resolution_slider(
                    ui,
                    "Vertical",
                    &mut state.params.vertical_resolution,
                    SLIDER_RANGES.vertical_resolution,
                    &mut state.locks.vertical_resolution,
                );
                changed |= resolution_slider(
                    ui,
                    "Radial",
                    &mut state.params.radial_resolution,
                    SLIDER_RANGES.radial_resolution,
                    &mut state.locks.radial_resolution,
                );
                ui.add_space(16.0);

                section_header(ui, "SHAPE");
                changed |= shape_slider(
                    ui,
                    "Petals",
                    &mut state.params.petal_number,
                    SLIDER_RANGES.petal_number,
                    1.0,
                    &mut state.locks.petal_number,
                );
                changed |= shape_slider(
                    ui,
                    "Petal length",
                    &mut state.params.petal_length,
                    SLIDER_RANGES.petal_length,
                    0.0,
                    &mut state.locks.petal_length,
                );
                changed |= shape_slider(
                    ui,
                    "Diameter",
                    &mut state.params.diameter,
                    SLIDER_RANGES.diameter,
                    0.0,
                    &mut state.locks.diameter,
                );
                changed |= shape_slider(
                    ui,
                    "Sharpness",
                    &mut state.params.petal_sharpness,
                    SLIDER_RANGES.petal_sharpness,
                    0.0,
                    &mut state.locks.petal_sharpness,
                );
                changed |= shape_slider(
                    ui,
                    "Height",
                    &mut state.params.height,
                    SLIDER_RANGES.height,
                    0.0,
                    &mut state.locks.height,
                );
                changed |= shape_slider(
                    ui,
                    "Curvature 1",
                    &mut state.params.curvature1,
                    SLIDER_RANGES.curvature1,
                    0.0,
                    &mut state.locks.curvature1,
                );
                changed |= shape_slider(
                    ui,
                    "Curvature 2",
                    &mut state.params.curvature2,
                    SLIDER_RANGES.curvature2,
                    0.0,
                    &mut state.locks.curvature2,
                );
                changed |= shape_slider(
                    ui,
                    "Bumpiness",
                    &mut state.params.bumpiness,
                    SLIDER_RANGES.bumpiness,
                    0.0,
                    &mut state.locks.bumpiness,
                );
                changed |= shape_slider(
                    ui,
                    "Bumps",
                    &mut state.params.bump_number,
                    SLIDER_RANGES.bump_number,
                    1.0,
                    &mut state.locks.bump_number,
                );
                ui.add_space(16.0);

                section_header(ui, "COLOURS");
                changed |= color_row(ui, "Center", &mut state.color1, &mut state.locks.color1);
                changed |= color_row(ui, "Edge", &mut state.color2, &mut state.locks.color2);
                ui.add_space(16.0);

                if changed {
                    state.mesh_dirty = true;
                    state.selected_preset = None;
                }

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "RANDOMISE");
                ui.horizontal(|ui| {
                    if ui
                        .add(
                            egui::Button::new(RichText::new("Randomise").color(BG_DEEP))
                                .fill(ACCENT_PETAL)
                                .min_size(egui::vec2(120.0, 32.0)),
                        )
                        .clicked()
                    {
                        actions.randomize = true;
                    }
                    ui.checkbox(&mut state.locks.keep_resolution, "Keep resolution");
                });
                ui.label(
                    RichText::new("Ticked rows above stay fixed. R does the same.")
                        .color(TEXT_MUTED)
                        .size(10.0)
                        .italics(),
                );
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "VIEW");
                ui.horizontal(|ui| {
                    ui.label("Display:");
                    if ui
                        .selectable_label(state.display_mode == DisplayMode::Shaded, "Shaded")
                        .clicked()
                    {
                        state.display_mode = DisplayMode::Shaded;
                    }
                    if ui
                        .selectable_label(state.display_mode == DisplayMode::Points, "Points")
                        .clicked()
                    {
                        state.display_mode = DisplayMode::Points;
                    }
                });
                ui.checkbox(&mut state.show_axes, "Show axes");
                camera_controls(ui, &mut state.camera_mode);
                if ui.button("Reset view").clicked() {
                    actions.reset_view = true;
                }
                ui.add_space(16.0);

                section_header(ui, "FILE");
                ui.horizontal(|ui| {
                    if ui.button("Export JSON").clicked() {
                        actions.export_params = true;
                    }
                    if ui.button("Import JSON").clicked() {
                        actions.import_params = true;
                    }
                    if ui.button("Export OBJ").clicked() {
                        actions.export_obj = true;
                    }
                });
                ui.add_space(16.0);

                perf_controls(ui, state);
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                if state.show_stats {
                    stats_panel(ui, stats);
                }

                if let Some(err) = last_error {
                    ui.add_space(8.0);
                    egui::Frame::default()
                        .fill(Color32::from_rgb(40, 15, 15))
                        .stroke(egui::Stroke::new(1.0, ACCENT_ERROR))
                        .rounding(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(err).color(ACCENT_ERROR).size(11.0));
                        });
                }
            });
        });

    actions
}

fn preset_picker(ui: &mut Ui, state: &mut UiState, actions: &mut UiActions) {
    let selected_text = match state.selected_preset {
        Some(i) => PRESETS[i].name,
        None => "Custom",
    };

    egui::ComboBox::from_id_salt("flower_presets")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for (i, preset) in PRESETS.iter().enumerate() {
                if ui
                    .selectable_label(state.selected_preset == Some(i), preset.name)
                    .clicked()
                {
                    actions.load_preset = Some(i);
                }
            }
        });

    if let Some(i) = state.selected_preset {
        ui.add_space(4.0);
        ui.label(
            RichText::new(PRESETS[i].description)
                .color(TEXT_MUTED)
                .size(11.0)
                .italics(),
        );
    }
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn resolution_slider(
    ui: &mut Ui,
    label: &str,
    value: &mut u32,
    range: (u32, u32),
    lock: &mut bool,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.checkbox(lock, "").on_hover_text("Keep during randomise");
        changed = ui
            .add(egui::Slider::new(value, range.0..=range.1).text(label))
            .changed();
    });
    changed
}

fn shape_slider(
    ui: &mut Ui,
    label: &str,
    value: &mut f64,
    range: (f64, f64),
    step: f64,
    lock: &mut bool,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.checkbox(lock, "").on_hover_text("Keep during randomise");
        let mut slider = egui::Slider::new(value, range.0..=range.1).text(label);
        if step > 0.0 {
            slider = slider.step_by(step);
        }
        changed = ui.add(slider).changed();
    });
    changed
}

fn color_row(
    ui: &mut Ui,
    label: &str,
    color: &mut crate::flower::Rgb,
    lock: &mut bool,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.checkbox(lock, "").on_hover_text("Keep during randomise");
        let mut rgb = color.to_array();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            *color = crate::flower::Rgb::from_array(rgb);
            changed = true;
        }
        ui.label(label);
        ui.label(
            RichText::new(color.to_hex())
                .color(TEXT_MUTED)
                .family(egui::FontFamily::Monospace)
                .size(11.0),
        );
    });
    changed
}

fn camera_controls(ui: &mut Ui, mode: &mut CameraMode) {
    ui.horizontal(|ui| {
        ui.label("Camera:");
        if ui
            .selectable_label(*mode == CameraMode::Orbital, "Orbital")
            .clicked()
        {
            *mode = CameraMode::Orbital;
        }
        if ui
            .selectable_label(*mode == CameraMode::Free, "Free")
            .clicked()
        {
            *mode = CameraMode::Free;
        }
    });
}

fn perf_controls(ui: &mut Ui, state: &mut UiState) {
    section_header(ui, "PERFORMANCE");
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.vsync_enabled, "VSync");
        ui.checkbox(&mut state.show_stats, "Stats");
    });
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.fps_cap_enabled, "FPS Cap:");
        ui.add_enabled(
            state.fps_cap_enabled,
            egui::DragValue::new(&mut state.fps_cap)
                .range(30..=500)
                .suffix(" fps"),
        );
    });
}

fn stats_panel(ui: &mut Ui, stats: &RenderStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps_color = if stats.fps >= 60.0 {
                ACCENT_LEAF
            } else if stats.fps >= 30.0 {
                ACCENT_AMBER
            } else {
                ACCENT_ERROR
            };

            egui::Grid::new("stats")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("FPS").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("{:.0}", stats.fps)).color(fps_color));
                    ui.end_row();

                    ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                    ui.label(RichText::new(fmt_num(stats.vertex_count)).color(ACCENT_SKY));
                    ui.end_row();

                    ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                    ui.label(RichText::new(fmt_num(stats.triangle_count)).color(ACCENT_PETAL));
                    ui.end_row();

                    ui.label(RichText::new("Rebuild ms").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!("{:.1}", stats.rebuild_ms)).color(TEXT_PRIMARY),
                    );
                    ui.end_row();
                });
        });
}

pub fn draw_help_overlay(ctx: &Context, pos: [f32; 3], speed: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(
                        RichText::new(
                            "WASD - Move | RMB+Drag - Look | Scroll - Zoom | R - Randomise",
                        )
                        .color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!(
                            "Pos: ({:.0}, {:.0}, {:.0}) | Speed: {:.0}",
                            pos[0], pos[1], pos[2], speed
                        ))
                        .color(TEXT_MUTED),
                    );
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}
