//! UI panels for the application
//!
//! Sidebar with the layer control (base layers and overlays), the trace list
//! with per-trace info, load errors and aggregate statistics.

use crate::app::state::{AppState, BaseLayer};
use egui::{Color32, RichText, Ui};

/// Render the sidebar toggle button (overlaid on top-right of map)
pub fn sidebar_toggle_button(ui: &mut Ui, state: &mut AppState) {
    let button_size = egui::vec2(40.0, 40.0);
    let margin = 10.0;

    let rect = ui.max_rect();
    let button_pos = rect.right_top() + egui::vec2(-button_size.x - margin, margin);
    let button_rect = egui::Rect::from_min_size(button_pos, button_size);

    let response = ui.allocate_rect(button_rect, egui::Sense::click());

    if response.clicked() {
        state.ui_settings.sidebar_open = !state.ui_settings.sidebar_open;
    }

    let bg_color = if response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };

    ui.painter().rect_filled(button_rect, 5.0, bg_color);

    let icon = if state.ui_settings.sidebar_open {
        "✕"
    } else {
        "☰"
    };

    ui.painter().text(
        button_rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(20.0),
        ui.visuals().text_color(),
    );
}

/// Render the main sidebar
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    if !state.ui_settings.sidebar_open {
        return;
    }

    egui::SidePanel::right("main_sidebar")
        .default_width(300.0)
        .min_width(260.0)
        .max_width(450.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    render_layers_section(ui, state);
                    ui.separator();
                    render_traces_section(ui, state);
                    ui.separator();
                    render_stats_section(ui, state);
                });
        });
}

/// Layer control: base layer selection and overlay toggles
fn render_layers_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🗺 Layers");

    for layer in BaseLayer::all() {
        ui.radio_value(&mut state.ui_settings.base_layer, *layer, layer.name());
    }

    ui.add_space(4.0);
    ui.checkbox(&mut state.ui_settings.show_traces, "Traces bateau");
    ui.checkbox(&mut state.ui_settings.show_live, "Position live");
}

/// Trace list with per-trace info, progress and errors
fn render_traces_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📂 Traces");

    if state.loader.is_busy() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!(
                "Loading {} of {}...",
                state.loader.total_files - state.loader.pending_files.len(),
                state.loader.total_files
            ));
        });
        ui.add(egui::ProgressBar::new(state.loader.progress()).show_percentage());
    }

    {
        let tracks = state.tracks.read().unwrap();
        for track in tracks.iter() {
            egui::CollapsingHeader::new(&track.name)
                .default_open(false)
                .show(ui, |ui| {
                    for line in track.info_text().lines() {
                        ui.label(line);
                    }
                });
        }
    }

    if ui.button("🎯 Fit to bounds").clicked() {
        state.pending_fit_bounds = true;
    }

    if !state.loader.errors.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new("Load errors:").color(Color32::from_rgb(220, 80, 80)));
        for (path, error) in &state.loader.errors {
            ui.label(
                RichText::new(format!("{}: {}", path.display(), error))
                    .small()
                    .color(Color32::from_rgb(220, 80, 80)),
            );
        }
    }
}

/// Aggregate statistics over the loaded traces
fn render_stats_section(ui: &mut Ui, state: &AppState) {
    ui.heading("📊 Stats");

    egui::Grid::new("stats_grid").num_columns(2).show(ui, |ui| {
        ui.label("Traces:");
        ui.label(format!("{}", state.stats.track_count));
        ui.end_row();

        ui.label("Points:");
        ui.label(format!("{}", state.stats.total_points));
        ui.end_row();

        ui.label("Distance:");
        ui.label(state.stats.format_distance());
        ui.end_row();
    });
}
