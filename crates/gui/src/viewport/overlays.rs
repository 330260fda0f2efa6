//! Viewport overlay drawing (zone markers, status text, camera info)

use egui::{Color32, Painter, Rect};
use glam::Vec3;
use shared::{zones_for, VehicleCategory, VehicleZone};

use super::camera::TurntableCamera;
use super::picking::Aabb;
use crate::state::{Job, ZoneColors};

/// World position of a zone marker on the near (+Z) side of the model
pub fn marker_position(zone: &VehicleZone, bounds: &Aabb) -> Vec3 {
    let [ax, ay] = zone.marker_anchor();
    let center = bounds.center();
    let size = bounds.size();
    Vec3::new(
        center.x + ax * size.x,
        center.y + ay * size.y,
        bounds.max.z,
    )
}

/// Draw a dot for every selected and completed zone of the job
pub fn draw_zone_markers(
    painter: &Painter,
    rect: Rect,
    camera: &TurntableCamera,
    bounds: &Aabb,
    job: &Job,
    palette: &ZoneColors,
) {
    if bounds.is_empty() {
        return;
    }
    for zone in zones_for(job.category) {
        let rgb = if job.completed.contains(zone.id) {
            palette.completed
        } else if job.selected.contains(zone.id) {
            palette.selected
        } else {
            continue;
        };
        let color = Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        let Some(screen) = camera.project(marker_position(zone, bounds), rect) else {
            continue;
        };
        if !rect.contains(screen) {
            continue;
        }
        painter.circle(screen, 6.0, color, egui::Stroke::new(1.5, Color32::WHITE));
        painter.text(
            screen + egui::vec2(9.0, 0.0),
            egui::Align2::LEFT_CENTER,
            zone.name,
            egui::FontId::proportional(11.0),
            Color32::from_gray(230),
        );
    }
}

/// Centered status line ("Loading...", fallback message)
pub fn draw_center_message(painter: &Painter, rect: Rect, title: &str, detail: Option<&str>, color: Color32) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_BOTTOM,
        title,
        egui::FontId::proportional(18.0),
        color,
    );
    if let Some(detail) = detail {
        painter.text(
            rect.center() + egui::vec2(0.0, 6.0),
            egui::Align2::CENTER_TOP,
            detail,
            egui::FontId::proportional(12.0),
            Color32::from_gray(160),
        );
    }
}

pub fn draw_camera_info(painter: &Painter, rect: Rect, camera: &TurntableCamera, category: VehicleCategory) {
    let text = format!(
        "{}  yaw {:.0}°  pitch {:.0}°  dist {:.1}",
        category.display_name(),
        camera.yaw.to_degrees(),
        camera.pitch.to_degrees(),
        camera.distance
    );
    painter.text(
        rect.left_bottom() + egui::vec2(8.0, -6.0),
        egui::Align2::LEFT_BOTTOM,
        text,
        egui::FontId::monospace(11.0),
        Color32::from_gray(140),
    );
}
