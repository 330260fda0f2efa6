//! Software fallback for the viewport when no GL context exists.
//!
//! Projects every triangle with the camera, shades it flat and paints the
//! lot back to front through a single egui mesh.

use std::collections::BTreeMap;

use egui::{Color32, Pos2, Rect, Stroke};
use glam::{Vec3, Vec4};

use super::camera::TurntableCamera;
use super::mesh::MeshData;
use crate::state::settings::GridSettings;

struct ScreenTriangle {
    points: [Pos2; 3],
    depth: f32,
    color: Color32,
}

/// Paint the model with egui's painter
pub fn paint_viewport(
    painter: &egui::Painter,
    rect: Rect,
    camera: &TurntableCamera,
    meshes: &BTreeMap<String, MeshData>,
    grid: Option<(&GridSettings, f32)>,
    bg: [u8; 3],
) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    if let Some((settings, floor_y)) = grid {
        draw_grid(painter, rect, camera, settings, floor_y);
    }

    let mut triangles = project_triangles(rect, camera, meshes);
    // Farthest first
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut mesh = egui::Mesh::default();
    for tri in &triangles {
        let base = mesh.vertices.len() as u32;
        for p in tri.points {
            mesh.colored_vertex(p, tri.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    if !mesh.is_empty() {
        painter.add(egui::Shape::mesh(mesh));
    }
}

fn project_triangles(
    rect: Rect,
    camera: &TurntableCamera,
    meshes: &BTreeMap<String, MeshData>,
) -> Vec<ScreenTriangle> {
    let aspect = rect.width() / rect.height().max(1.0);
    let vp = camera.view_projection(aspect);
    let view = camera.view_matrix();
    let eye = camera.eye_position();
    let light = Vec3::new(-0.4, 0.8, 0.5).normalize();

    let mut out = Vec::new();
    for data in meshes.values() {
        for tri in data.indices.chunks_exact(3) {
            let Some(verts) = tri
                .iter()
                .map(|&i| {
                    let base = i as usize * 9;
                    data.vertices.get(base..base + 9)
                })
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let world = [0, 1, 2].map(|k| Vec3::new(verts[k][0], verts[k][1], verts[k][2]));
            let normal = (world[1] - world[0]).cross(world[2] - world[0]).normalize_or_zero();

            // Back-face cull
            if normal.dot(eye - world[0]) <= 0.0 {
                continue;
            }

            let mut points = [Pos2::ZERO; 3];
            let mut visible = true;
            for (k, p) in world.iter().enumerate() {
                let clip = vp * Vec4::new(p.x, p.y, p.z, 1.0);
                if clip.w <= 0.0 {
                    visible = false;
                    break;
                }
                let ndc = clip.truncate() / clip.w;
                points[k] = Pos2::new(
                    rect.center().x + ndc.x * rect.width() * 0.5,
                    rect.center().y - ndc.y * rect.height() * 0.5,
                );
            }
            if !visible {
                continue;
            }

            let center = (world[0] + world[1] + world[2]) / 3.0;
            let depth = -(view * center.extend(1.0)).z;
            let shade = 0.3 + normal.dot(light).max(0.0) * 0.7;
            let c = verts[0];
            let color = Color32::from_rgb(
                (c[6] * shade * 255.0).clamp(0.0, 255.0) as u8,
                (c[7] * shade * 255.0).clamp(0.0, 255.0) as u8,
                (c[8] * shade * 255.0).clamp(0.0, 255.0) as u8,
            );
            out.push(ScreenTriangle { points, depth, color });
        }
    }
    out
}

fn draw_grid(
    painter: &egui::Painter,
    rect: Rect,
    camera: &TurntableCamera,
    settings: &GridSettings,
    floor_y: f32,
) {
    let alpha = (settings.opacity * 255.0) as u8;
    let grid_color = Color32::from_rgba_premultiplied(60, 60, 60, alpha);
    let stroke = Stroke::new(0.5, grid_color);

    let range = settings.range;
    let step = settings.size;

    for i in -range..=range {
        let f = i as f32 * step;
        let extent = range as f32 * step;

        // Lines along Z
        if let (Some(a), Some(b)) = (
            camera.project(Vec3::new(f, floor_y, -extent), rect),
            camera.project(Vec3::new(f, floor_y, extent), rect),
        ) {
            if rect.contains(a) || rect.contains(b) {
                painter.line_segment([a, b], stroke);
            }
        }
        // Lines along X
        if let (Some(a), Some(b)) = (
            camera.project(Vec3::new(-extent, floor_y, f), rect),
            camera.project(Vec3::new(extent, floor_y, f), rect),
        ) {
            if rect.contains(a) || rect.contains(b) {
                painter.line_segment([a, b], stroke);
            }
        }
    }
}
