use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, ZoneMode};
use crate::zones::ZoneOverlay;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.selectable_value(&mut state.zone_mode, ZoneMode::Intake, t("zones.intake"));
        ui.selectable_value(&mut state.zone_mode, ZoneMode::Work, t("zones.work"));
    });

    let Some(job) = state.active_job() else {
        return;
    };
    let palette = state.settings.zones;
    let mode = state.zone_mode;

    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, width * 0.5), egui::Sense::hover());
    ui.painter().rect_filled(rect, 6.0, egui::Color32::from_rgb(24, 24, 28));

    // Intake mode shows noted damage as the "selected" state
    let (selected, completed) = match mode {
        ZoneMode::Intake => (job.intake.as_slice(), &[][..]),
        ZoneMode::Work => (job.selected.as_slice(), job.completed.as_slice()),
    };

    let mut clicked = None;
    ZoneOverlay::new(job.category, selected, completed)
        .palette(palette)
        .show(ui, rect, |zone| clicked = Some(zone.id));

    if let Some(zone_id) = clicked {
        state.click_zone(zone_id);
    }

    let Some(job) = state.active_job_mut() else {
        return;
    };
    match mode {
        ZoneMode::Intake => {
            ui.weak(format!("{}: {}", t("zones.noted"), job.intake.len()));
        }
        ZoneMode::Work => {
            let (done, total) = job.progress();
            ui.horizontal(|ui| {
                ui.weak(format!("{}: {done}/{total}", t("zones.done")));
                if ui
                    .add_enabled(!job.selected.is_empty(), egui::Button::new(t("zones.mark_done")))
                    .clicked()
                {
                    let n = job.complete_selected();
                    tracing::info!("Job {}: {n} zones completed", job.id);
                }
            });
        }
    }
}
