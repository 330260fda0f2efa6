//! 3D viewport panel with OpenGL rendering

mod camera;
mod gl_renderer;
pub use detail_studio_lib::viewport::{mesh, picking};
mod overlays;
mod renderer;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::helpers::{mesh_bounds, part_name};
use crate::i18n::t;
use crate::model::{classify, MaterialClass};
use crate::state::AppState;
use crate::viewer::{ModelViewer, ViewerStatus};
use camera::TurntableCamera;
use gl_renderer::GlRenderer;
use mesh::{tessellate, MeshData};
use picking::{pick_nearest, Aabb};

/// Tessellated copy of the viewer's current model
#[derive(Default)]
struct ModelBuffers {
    meshes: Arc<BTreeMap<String, MeshData>>,
    part_bounds: Vec<(String, Aabb)>,
    bounds: Option<Aabb>,
}

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: TurntableCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    buffers: ModelBuffers,
    /// Viewer revision the buffers were built from
    synced_revision: Option<u64>,
    hovered_part: Option<String>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: TurntableCamera::new(),
            gl_renderer: None,
            buffers: ModelBuffers::default(),
            synced_revision: None,
            hovered_part: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using software fallback: {e}"),
        }
    }

    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = TurntableCamera::new();
        if let Some(bounds) = &self.buffers.bounds {
            self.camera.frame(bounds);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, viewer: &ModelViewer, state: &AppState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        self.sync_model(viewer);

        // ── Camera controls ─────────────────────────────
        self.handle_camera(&response, ui);

        // ── Hover picking ─────────────────────────────
        self.hovered_part = response.hover_pos().and_then(|pos| {
            let ray = self.camera.screen_ray(pos, rect);
            pick_nearest(&ray, &self.buffers.part_bounds)
        });
        if let (Some(part), Some(model)) = (&self.hovered_part, viewer.model()) {
            let label = part_label(part, &model.scene);
            response.clone().on_hover_text_at_pointer(label);
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── Rendering ────────────────────────────────────────
        self.render(ui, rect, state);

        // ── Overlays ─────────────────────────────────────
        self.draw_overlays(ui, rect, viewer, state);
    }

    fn sync_model(&mut self, viewer: &ModelViewer) {
        if self.synced_revision == Some(viewer.revision()) {
            return;
        }
        self.synced_revision = Some(viewer.revision());

        let Some(model) = viewer.model() else {
            self.buffers = ModelBuffers::default();
            return;
        };
        let first_model = self.buffers.bounds.is_none();
        let bounds = model.bounds();
        self.buffers = ModelBuffers {
            meshes: Arc::new(tessellate(&model.scene)),
            part_bounds: mesh_bounds(&model.scene),
            bounds: Some(bounds),
        };
        if first_model {
            self.camera.frame(&bounds);
        }
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            let speed = self.camera.distance * 0.0015;
            self.camera.pan(-delta.x * speed, delta.y * speed);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }

        if response.double_clicked() {
            self.reset_camera();
        }
    }

    fn render(&mut self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        if state.settings.viewport.auto_rotate && !ui.input(|i| i.pointer.any_down()) {
            let dt = ui.input(|i| i.stable_dt).min(0.1);
            self.camera.spin(dt);
            ui.ctx().request_repaint();
        }

        let floor_y = self.buffers.bounds.map(|b| b.min.y).unwrap_or(0.0);
        match &self.gl_renderer {
            Some(gl_renderer) => self.render_gl(ui, rect, state, gl_renderer.clone(), floor_y),
            None => {
                // Fallback: software flat-shaded rendering
                let grid = state
                    .settings
                    .grid
                    .visible
                    .then_some((&state.settings.grid, floor_y));
                renderer::paint_viewport(
                    &ui.painter_at(rect),
                    rect,
                    &self.camera,
                    &self.buffers.meshes,
                    grid,
                    state.settings.viewport.background_color,
                );
            }
        }
    }

    fn render_gl(
        &self,
        ui: &mut Ui,
        rect: egui::Rect,
        state: &AppState,
        renderer: Arc<Mutex<GlRenderer>>,
        floor_y: f32,
    ) {
        let camera = self.camera;
        let meshes = self.buffers.meshes.clone();
        let revision = self.synced_revision.unwrap_or_default();
        let grid_settings = state.settings.grid.clone();
        let bg_color = state.settings.viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    let synced = r
                        .update_grid(gl, &grid_settings, floor_y)
                        .and_then(|_| r.sync_model(gl, &meshes, revision));
                    if let Err(e) = synced {
                        tracing::error!("GL upload failed: {e}");
                    }

                    let params = gl_renderer::RenderParams {
                        viewport,
                        grid_visible: grid_settings.visible,
                        bg_color,
                    };
                    r.paint(gl, &camera, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &Ui, rect: egui::Rect, viewer: &ModelViewer, state: &AppState) {
        let painter = ui.painter_at(rect);

        match viewer.status() {
            ViewerStatus::Loading => {
                overlays::draw_center_message(
                    &painter,
                    rect,
                    t("viewer.loading"),
                    Some(viewer.asset_url()),
                    egui::Color32::from_gray(200),
                );
                ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
            }
            ViewerStatus::Failed(reason) => {
                overlays::draw_center_message(
                    &painter,
                    rect,
                    t("viewer.could_not_load"),
                    Some(reason),
                    egui::Color32::from_rgb(230, 110, 90),
                );
            }
            ViewerStatus::Ready(_) => {
                if let (Some(job), Some(bounds)) = (state.active_job(), &self.buffers.bounds) {
                    if state.settings.viewport.show_markers && state.asset_override.is_none() {
                        overlays::draw_zone_markers(
                            &painter,
                            rect,
                            &self.camera,
                            bounds,
                            job,
                            &state.settings.zones,
                        );
                    }
                }
            }
        }

        if let Some(job) = state.active_job() {
            overlays::draw_camera_info(&painter, rect, &self.camera, job.category);
        }
    }
}

/// Tooltip text for a hovered part: its name and how the colorizer treats it
fn part_label(part: &str, scene: &shared::SceneGraph) -> String {
    let part = match scene.find_mesh(part) {
        Some(_) => part,
        None => part_name(part),
    };
    let material = scene
        .find_mesh(part)
        .and_then(|mesh| mesh.materials.first())
        .map(|m| m.name().to_string())
        .unwrap_or_default();
    let class = match classify(part, &material) {
        MaterialClass::Paintable => t("part.paintable"),
        MaterialClass::Excluded => t("part.excluded"),
        MaterialClass::Untouched => t("part.untouched"),
    };
    if material.is_empty() {
        format!("{part}\n{class}")
    } else {
        format!("{part} · {material}\n{class}")
    }
}
