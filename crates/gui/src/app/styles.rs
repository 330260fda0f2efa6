//! Application style configuration

use eframe::egui::{self, Color32, CornerRadius, FontId, TextStyle};

/// Amber accent used for selection across the workshop UI
const ACCENT: Color32 = Color32::from_rgb(150, 95, 10);
const ACCENT_LIGHT: Color32 = Color32::from_rgb(255, 200, 120);

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    ctx.style_mut(|style| {
        style.visuals = egui::Visuals::dark();

        style.visuals.window_corner_radius = CornerRadius::same(6);
        style.visuals.menu_corner_radius = CornerRadius::same(4);
        for widget in [
            &mut style.visuals.widgets.noninteractive,
            &mut style.visuals.widgets.inactive,
            &mut style.visuals.widgets.hovered,
            &mut style.visuals.widgets.active,
        ] {
            widget.corner_radius = CornerRadius::same(3);
        }

        // Spacing
        style.spacing.item_spacing = egui::vec2(6.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style.spacing.interact_size.y = 22.0;
        style.spacing.menu_margin = egui::Margin::same(4);

        style.visuals.panel_fill = Color32::from_rgb(32, 31, 30);
        style.visuals.window_fill = Color32::from_rgb(38, 37, 35);
        style.visuals.extreme_bg_color = Color32::from_rgb(22, 22, 22);

        style.visuals.selection.bg_fill = ACCENT;
        style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT_LIGHT);
        style.visuals.warn_fg_color = Color32::from_rgb(255, 170, 0);

        apply_text_styles(style, font_size);
    });
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    ctx.style_mut(|style| apply_text_styles(style, font_size));
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    let sizes = [
        (TextStyle::Body, FontId::proportional(font_size)),
        (TextStyle::Button, FontId::proportional(font_size)),
        (TextStyle::Small, FontId::proportional(font_size * 0.85)),
        (TextStyle::Heading, FontId::proportional(font_size * 1.3)),
        (TextStyle::Monospace, FontId::monospace(font_size)),
    ];
    style.text_styles.extend(sizes);
}
