use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;
use crate::viewer::{ModelViewer, ViewerStatus};

pub fn show(ui: &mut Ui, state: &AppState, viewer: &ModelViewer) {
    ui.horizontal(|ui| {
        ui.weak(viewer.asset_url());
        ui.separator();

        match viewer.status() {
            ViewerStatus::Loading => {
                ui.spinner();
                ui.weak(t("viewer.loading"));
            }
            ViewerStatus::Failed(_) => {
                ui.colored_label(egui::Color32::from_rgb(230, 110, 90), t("viewer.could_not_load"));
            }
            ViewerStatus::Ready(model) => {
                ui.weak(format!(
                    "{}: {}  {}: {}  {}: {:.3}",
                    t("status.meshes"),
                    model.scene.mesh_count(),
                    t("status.vertices"),
                    model.scene.vertex_count(),
                    t("status.scale"),
                    model.scale
                ));
                ui.separator();
                ui.weak(format!(
                    "{}: {}  {}: {}",
                    t("status.painted"),
                    model.stats.painted,
                    t("status.excluded"),
                    model.stats.excluded
                ));
            }
        }

        if state.timer.is_running() {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(90, 200, 110),
                format!("{} #{}", t("status.timer_running"), state.timer.job_id()),
            );
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Detail Studio v", env!("CARGO_PKG_VERSION")));
        });
    });
}
