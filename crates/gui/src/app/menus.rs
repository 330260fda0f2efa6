//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::{AppSettings, AppState};
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open_model")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_model_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                tracing::info!("Opening model {}", path.display());
                state.asset_override = Some(path.to_string_lossy().into_owned());
            }
        }
        if ui
            .add_enabled(state.asset_override.is_some(), egui::Button::new(t("menu.builtin_model")))
            .clicked()
        {
            state.asset_override = None;
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.jobs, t("menu.jobs_panel"));
        ui.checkbox(&mut state.panels.work, t("menu.work_panel"));
        ui.separator();
        ui.checkbox(&mut state.settings.viewport.show_markers, t("menu.markers"));
        ui.checkbox(&mut state.settings.viewport.auto_rotate, t("menu.auto_rotate"));
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            let current = lang();
            for (l, label) in [(Lang::Ru, "Русский"), (Lang::En, "English")] {
                if ui.radio(current == l, label).clicked() {
                    set_lang(l);
                    state.settings.ui.language = l.code().to_string();
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                section(ui, "settings.viewer", true, |ui| viewer_rows(ui, state));
                section(ui, "settings.zone_colors", true, |ui| zone_color_rows(ui, state));
                section(ui, "settings.viewport", false, |ui| viewport_rows(ui, state));
                section(ui, "settings.grid", false, |ui| grid_rows(ui, state));
                section(ui, "settings.ui", false, |ui| ui_rows(ui, state));
            });
            ui.separator();
            settings_buttons(ui, state);
        });
    state.show_settings_window = open && state.show_settings_window;
}

/// Collapsible block with a two-column label/value grid
fn section(ui: &mut egui::Ui, title: &str, open: bool, rows: impl FnOnce(&mut egui::Ui)) {
    egui::CollapsingHeader::new(t(title))
        .default_open(open)
        .show(ui, |ui| {
            egui::Grid::new(title)
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, rows);
        });
}

fn row(ui: &mut egui::Ui, label: &str, value: impl FnOnce(&mut egui::Ui)) {
    ui.label(t(label));
    value(ui);
    ui.end_row();
}

fn viewer_rows(ui: &mut egui::Ui, state: &mut AppState) {
    let viewer = &mut state.settings.viewer;
    row(ui, "settings.target_size", |ui| {
        ui.add(egui::DragValue::new(&mut viewer.target_size).speed(0.1).range(0.5..=20.0));
    });
    row(ui, "settings.metalness_max", |ui| {
        ui.add(egui::Slider::new(&mut viewer.metalness_max, 0.0..=1.0));
    });
    row(ui, "settings.roughness_min", |ui| {
        ui.add(egui::Slider::new(&mut viewer.roughness_min, 0.0..=1.0));
    });
    row(ui, "settings.default_color", |ui| {
        ui.add(egui::TextEdit::singleline(&mut viewer.default_color).desired_width(100.0));
    });
}

fn zone_color_rows(ui: &mut egui::Ui, state: &mut AppState) {
    let zones = &mut state.settings.zones;
    for (label, rgb) in [
        ("settings.zone_default", &mut zones.default),
        ("settings.zone_hovered", &mut zones.hovered),
        ("settings.zone_selected", &mut zones.selected),
        ("settings.zone_completed", &mut zones.completed),
    ] {
        row(ui, label, |ui| {
            ui.color_edit_button_srgb(rgb);
        });
    }
}

fn viewport_rows(ui: &mut egui::Ui, state: &mut AppState) {
    let viewport = &mut state.settings.viewport;
    row(ui, "settings.bg_color", |ui| {
        ui.color_edit_button_srgb(&mut viewport.background_color);
    });
    row(ui, "menu.markers", |ui| {
        ui.checkbox(&mut viewport.show_markers, "");
    });
    row(ui, "menu.auto_rotate", |ui| {
        ui.checkbox(&mut viewport.auto_rotate, "");
    });
}

fn grid_rows(ui: &mut egui::Ui, state: &mut AppState) {
    let grid = &mut state.settings.grid;
    row(ui, "settings.grid_visible", |ui| {
        ui.checkbox(&mut grid.visible, "");
    });
    row(ui, "settings.grid_size", |ui| {
        ui.add(egui::DragValue::new(&mut grid.size).speed(0.05).range(0.1..=5.0));
    });
    row(ui, "settings.grid_range", |ui| {
        ui.add(egui::DragValue::new(&mut grid.range).speed(1).range(1..=50));
    });
    row(ui, "settings.grid_opacity", |ui| {
        ui.add(egui::Slider::new(&mut grid.opacity, 0.0..=1.0));
    });
}

fn ui_rows(ui: &mut egui::Ui, state: &mut AppState) {
    row(ui, "settings.font_size", |ui| {
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
}

fn settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
            tracing::info!("Settings saved");
        }
        if ui.button(t("settings.reset")).clicked() {
            // Language is picked from the View menu and survives a reset
            let language = std::mem::take(&mut state.settings.ui.language);
            state.settings = AppSettings::default();
            state.settings.ui.language = language;
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
