use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("jobs.title"));
    ui.add_space(4.0);

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("jobs_scroll")
        .show(ui, |ui| {
            for (index, job) in state.jobs.iter().enumerate() {
                let selected = index == state.active_index();
                let (done, total) = job.progress();
                let text = format!("#{}  {}\n{} · {done}/{total}", job.id, job.vehicle, job.customer);
                if ui.selectable_label(selected, text).clicked() {
                    clicked = Some(index);
                }
                ui.add_space(2.0);
            }
        });

    if let Some(index) = clicked {
        state.select_job(index);
    }
}
