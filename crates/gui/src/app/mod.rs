//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::sync::Arc;

use eframe::egui;

use crate::assets::{AssetCache, AssetLoader};
use crate::i18n::{set_lang, Lang};
use crate::state::AppState;
use crate::ui::{jobs_panel, paint_panel, status_bar, timer_panel, zone_panel};
use crate::viewer::{ModelViewer, ViewerProps};
use crate::viewport::ViewportPanel;

/// Main application
pub struct DetailStudioApp {
    state: AppState,
    viewport: ViewportPanel,
    loader: AssetLoader,
    viewer: ModelViewer,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl DetailStudioApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_asset: Option<String>,
        initial_color: Option<String>,
    ) -> Self {
        let mut state = AppState::default();
        set_lang(Lang::from_code(&state.settings.ui.language));

        // Command line takes priority over the job's own vehicle and paint
        if let Some(url) = initial_asset {
            tracing::info!("Showing {url} from the command line");
            state.asset_override = Some(url);
        }
        if let Some(color) = initial_color {
            if let Some(job) = state.active_job_mut() {
                job.color = color;
            }
        }

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let loader = AssetLoader::new(Arc::new(AssetCache::new()));
        let props = ViewerProps::new(state.asset_url(), state.paint_color())
            .on_ready(|model| tracing::debug!("Preview ready ({} meshes)", model.scene.mesh_count()))
            .on_error(|reason| tracing::warn!("Viewer fallback shown: {reason}"));
        let viewer = ModelViewer::mount_with_options(
            props,
            state.settings.viewer.colorize_options(),
            &loader,
        );

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport,
            loader,
            viewer,
            last_font_size,
        }
    }

    /// Push the active job's asset, paint and options into the viewer
    fn sync_viewer(&mut self, ctx: &egui::Context) {
        if self.viewer.poll() {
            ctx.request_repaint();
        }
        self.viewer
            .set_asset_url(&self.state.asset_url(), &self.loader);
        self.viewer.set_color(&self.state.paint_color());
        self.viewer
            .set_options(self.state.settings.viewer.colorize_options());
    }
}

impl eframe::App for DetailStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        self.sync_viewer(ctx);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state, &self.viewer);
            });

        // ── Left panel: Jobs ─────────────────────────────────
        if self.state.panels.jobs {
            egui::SidePanel::left("jobs_panel")
                .default_width(220.0)
                .width_range(160.0..=360.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    jobs_panel::show(ui, &mut self.state);
                });
        }

        // ── Right panel: Timer + Paint + Zones ───────────────
        self.show_work_panel(ctx);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &self.viewer, &self.state);
            });
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
        self.state.settings.save();
    }
}

impl DetailStudioApp {
    fn show_work_panel(&mut self, ctx: &egui::Context) {
        if !self.state.panels.work {
            return;
        }

        egui::SidePanel::right("work_panel")
            .default_width(320.0)
            .width_range(240.0..=520.0)
            .resizable(true)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("work_scroll")
                    .show(ui, |ui| {
                        timer_panel::show(ui, &mut self.state.timer);
                        ui.add_space(4.0);
                        ui.separator();
                        paint_panel::show(ui, &mut self.state);
                        ui.add_space(4.0);
                        ui.separator();
                        zone_panel::show(ui, &mut self.state);
                    });
            });
    }
}
