//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let (toggle_timer, reset_camera, job_key, complete) = ctx.input(|i| {
        let job_key = [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3, egui::Key::Num4]
            .iter()
            .position(|k| i.key_pressed(*k));
        (
            i.key_pressed(egui::Key::Space),
            i.key_pressed(egui::Key::Home),
            job_key,
            i.modifiers.command && i.key_pressed(egui::Key::Enter),
        )
    });

    // Space: start / pause the job timer
    if toggle_timer {
        if state.timer.is_running() {
            state.timer.pause();
        } else {
            state.timer.start();
        }
    }
    // Home: reset camera
    if reset_camera {
        viewport.reset_camera();
    }
    // 1..4: switch job
    if let Some(index) = job_key {
        state.select_job(index);
    }
    // Ctrl+Enter: mark selected zones done
    if complete {
        if let Some(job) = state.active_job_mut() {
            job.complete_selected();
        }
    }
}
