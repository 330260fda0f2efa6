use egui::Ui;
use shared::Rgb;

use crate::i18n::t;
use crate::state::AppState;

const PRESETS: &[(&str, &str)] = &[
    ("#b01c2e", "paint.red"),
    ("#1f5fbf", "paint.blue"),
    ("#2b2b2b", "paint.black"),
    ("#f2f2f2", "paint.white"),
    ("#8a8d91", "paint.silver"),
    ("#2e6b3a", "paint.green"),
    ("orange", "paint.orange"),
];

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(job) = state.active_job_mut() else {
        return;
    };

    ui.label(t("paint.title"));
    ui.horizontal_wrapped(|ui| {
        for (css, key) in PRESETS {
            let Ok(rgb) = Rgb::parse(css) else {
                continue;
            };
            let [r, g, b] = rgb.to_rgb8();
            let selected = job.color.eq_ignore_ascii_case(css);
            let (rect, response) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::click());
            let stroke = if selected {
                egui::Stroke::new(2.0, egui::Color32::WHITE)
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(80))
            };
            ui.painter().rect(
                rect,
                4.0,
                egui::Color32::from_rgb(r, g, b),
                stroke,
                egui::StrokeKind::Inside,
            );
            if response.on_hover_text(t(key)).clicked() {
                job.color = css.to_string();
            }
        }
    });

    ui.horizontal(|ui| {
        // Picker edits the parsed color; the text field accepts any CSS form
        let mut rgb8 = Rgb::parse(&job.color).map(|c| c.to_rgb8()).unwrap_or([128, 128, 128]);
        if ui.color_edit_button_srgb(&mut rgb8).changed() {
            job.color = Rgb::from_rgb8(rgb8[0], rgb8[1], rgb8[2]).to_hex();
        }
        let mut text = job.color.clone();
        let edit = ui.add(egui::TextEdit::singleline(&mut text).desired_width(120.0));
        if edit.changed() {
            job.color = text;
        }
    });
    if Rgb::parse(&job.color).is_err() {
        ui.colored_label(egui::Color32::from_rgb(230, 110, 90), t("paint.invalid"));
    }
}
