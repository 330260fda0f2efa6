use std::time::Duration;

use egui::{RichText, Ui};
use shared::format_hms;

use crate::i18n::t;
use crate::state::StudioTimer;

/// Job stopwatch. While running it asks for a repaint every second; the
/// request stops as soon as the panel is no longer drawn.
pub fn show(ui: &mut Ui, timer: &mut StudioTimer) {
    let secs = timer.tick();
    let running = timer.is_running();

    ui.horizontal(|ui| {
        ui.label(t("timer.title"));
        if running {
            ui.colored_label(egui::Color32::from_rgb(90, 200, 110), "●");
        }
    });
    ui.label(RichText::new(format_hms(secs)).monospace().size(28.0));

    ui.horizontal(|ui| {
        if running {
            if ui.button(t("timer.pause")).clicked() {
                timer.pause();
            }
        } else if ui.button(t("timer.start")).clicked() {
            timer.start();
        }
        if ui
            .add_enabled(secs > 0 || running, egui::Button::new(t("timer.reset")))
            .clicked()
        {
            timer.reset();
        }
    });

    if timer.is_running() {
        ui.ctx().request_repaint_after(Duration::from_secs(1));
    }
}
