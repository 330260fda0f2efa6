//! Clickable zone overlay drawn over a vehicle diagram or viewer.
//!
//! The overlay is a pure function of its inputs: it paints the zones of a
//! category in their resolved visual state and reports clicks. Selection
//! and completion sets belong to the caller.

use egui::{Color32, Pos2, Rect, Stroke};
use shared::{zones_for, VehicleCategory, VehicleZone, ZoneId};

use crate::state::settings::ZoneColors;

/// How a zone is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneVisual {
    Default,
    Hovered,
    Selected,
    Completed,
}

impl ZoneVisual {
    /// Completed beats selected beats hovered
    pub fn resolve(completed: bool, selected: bool, hovered: bool) -> Self {
        if completed {
            ZoneVisual::Completed
        } else if selected {
            ZoneVisual::Selected
        } else if hovered {
            ZoneVisual::Hovered
        } else {
            ZoneVisual::Default
        }
    }

    /// (fill, stroke) for this state
    pub fn colors(self, palette: &ZoneColors) -> (Color32, Stroke) {
        let (rgb, fill_alpha, width) = match self {
            ZoneVisual::Default => (palette.default, 24, 1.0),
            ZoneVisual::Hovered => (palette.hovered, 60, 1.5),
            ZoneVisual::Selected => (palette.selected, 90, 2.0),
            ZoneVisual::Completed => (palette.completed, 110, 2.0),
        };
        let [r, g, b] = rgb;
        (
            Color32::from_rgba_unmultiplied(r, g, b, fill_alpha),
            Stroke::new(width, Color32::from_rgb(r, g, b)),
        )
    }
}

/// Topmost zone under a point given in percent-of-area coordinates.
/// Later zones are drawn on top, so they win on overlap.
pub fn hit_test(zones: &[VehicleZone], percent: kurbo::Point) -> Option<&VehicleZone> {
    zones.iter().rev().find(|zone| percent_rect(zone).contains(percent))
}

fn percent_rect(zone: &VehicleZone) -> kurbo::Rect {
    let (x, y) = (zone.x as f64, zone.y as f64);
    kurbo::Rect::new(x, y, x + zone.width as f64, y + zone.height as f64)
}

/// Screen rectangle of a zone inside `area`
pub fn zone_rect(zone: &VehicleZone, area: Rect) -> Rect {
    let r = percent_rect(zone);
    let to_screen = |x: f64, y: f64| {
        Pos2::new(
            area.min.x + (x / 100.0) as f32 * area.width(),
            area.min.y + (y / 100.0) as f32 * area.height(),
        )
    };
    Rect::from_min_max(to_screen(r.x0, r.y0), to_screen(r.x1, r.y1))
}

/// Screen position to percent-of-area coordinates
pub fn to_percent(pos: Pos2, area: Rect) -> Option<kurbo::Point> {
    if area.width() <= 0.0 || area.height() <= 0.0 {
        return None;
    }
    Some(kurbo::Point::new(
        ((pos.x - area.min.x) / area.width() * 100.0) as f64,
        ((pos.y - area.min.y) / area.height() * 100.0) as f64,
    ))
}

pub struct ZoneOverlay<'a> {
    pub category: VehicleCategory,
    pub selected: &'a [ZoneId],
    pub completed: &'a [ZoneId],
    palette: ZoneColors,
    show_labels: bool,
}

impl<'a> ZoneOverlay<'a> {
    pub fn new(category: VehicleCategory, selected: &'a [ZoneId], completed: &'a [ZoneId]) -> Self {
        Self {
            category,
            selected,
            completed,
            palette: ZoneColors::default(),
            show_labels: true,
        }
    }

    pub fn palette(mut self, palette: ZoneColors) -> Self {
        self.palette = palette;
        self
    }

    pub fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn visual(&self, zone_id: &str, hovered: bool) -> ZoneVisual {
        ZoneVisual::resolve(
            self.completed.iter().any(|id| id == zone_id),
            self.selected.iter().any(|id| id == zone_id),
            hovered,
        )
    }

    /// Paint the zones over `rect` and call `on_zone_click` for a clicked zone
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        rect: Rect,
        mut on_zone_click: impl FnMut(&VehicleZone),
    ) -> egui::Response {
        let zones = zones_for(self.category);
        let id = ui.id().with(("zone_overlay", self.category.as_str()));
        let response = ui.interact(rect, id, egui::Sense::click());

        let hovered = response
            .hover_pos()
            .and_then(|pos| to_percent(pos, rect))
            .and_then(|p| hit_test(zones, p))
            .map(|zone| zone.id);

        let painter = ui.painter_at(rect);
        for zone in zones {
            let visual = self.visual(zone.id, hovered == Some(zone.id));
            let (fill, stroke) = visual.colors(&self.palette);
            let screen = zone_rect(zone, rect);
            painter.rect(screen, 4.0, fill, stroke, egui::StrokeKind::Inside);

            if self.show_labels && screen.width() > 40.0 {
                let text_color = if visual == ZoneVisual::Default {
                    Color32::from_gray(170)
                } else {
                    Color32::WHITE
                };
                painter.text(
                    screen.center(),
                    egui::Align2::CENTER_CENTER,
                    zone.name,
                    egui::FontId::proportional(11.0),
                    text_color,
                );
            }
            if visual == ZoneVisual::Completed {
                painter.text(
                    screen.right_top() + egui::vec2(-6.0, 4.0),
                    egui::Align2::RIGHT_TOP,
                    "✔",
                    egui::FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
        }

        if let Some(zone) = hovered.and_then(|id| zones.iter().find(|z| z.id == id)) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            if response.clicked() {
                tracing::debug!("Zone clicked: {}", zone.id);
                on_zone_click(zone);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(ZoneVisual::resolve(true, true, true), ZoneVisual::Completed);
        assert_eq!(ZoneVisual::resolve(false, true, true), ZoneVisual::Selected);
        assert_eq!(ZoneVisual::resolve(false, false, true), ZoneVisual::Hovered);
        assert_eq!(ZoneVisual::resolve(false, false, false), ZoneVisual::Default);
    }

    #[test]
    fn test_overlay_visual_uses_caller_sets() {
        let selected = vec!["hood".to_string(), "roof".to_string()];
        let completed = vec!["hood".to_string()];
        let overlay = ZoneOverlay::new(VehicleCategory::Sedan, &selected, &completed);
        assert_eq!(overlay.visual("hood", false), ZoneVisual::Completed);
        assert_eq!(overlay.visual("roof", false), ZoneVisual::Selected);
        assert_eq!(overlay.visual("trunk", true), ZoneVisual::Hovered);
    }

    #[test]
    fn test_hit_test_later_zone_wins() {
        let zones = [
            VehicleZone::new("big", "Big", 0.0, 0.0, 50.0, 50.0),
            VehicleZone::new("small", "Small", 10.0, 10.0, 10.0, 10.0),
        ];
        assert_eq!(hit_test(&zones, kurbo::Point::new(15.0, 15.0)).map(|z| z.id), Some("small"));
        assert_eq!(hit_test(&zones, kurbo::Point::new(40.0, 40.0)).map(|z| z.id), Some("big"));
        assert!(hit_test(&zones, kurbo::Point::new(80.0, 80.0)).is_none());
    }

    #[test]
    fn test_zone_rect_maps_percent_to_screen() {
        let zone = VehicleZone::new("z", "Z", 25.0, 50.0, 50.0, 25.0);
        let area = Rect::from_min_size(Pos2::new(100.0, 0.0), egui::vec2(400.0, 200.0));
        let r = zone_rect(&zone, area);
        assert_eq!(r.min, Pos2::new(200.0, 100.0));
        assert_eq!(r.max, Pos2::new(400.0, 150.0));

        let p = to_percent(Pos2::new(300.0, 100.0), area).unwrap();
        assert_eq!((p.x, p.y), (50.0, 50.0));
        assert!(to_percent(Pos2::ZERO, Rect::NOTHING).is_none());
    }

    #[test]
    fn test_completed_colors_differ_from_selected() {
        let palette = ZoneColors::default();
        assert_ne!(
            ZoneVisual::Completed.colors(&palette),
            ZoneVisual::Selected.colors(&palette)
        );
    }
}
