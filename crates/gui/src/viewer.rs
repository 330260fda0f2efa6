//! Mount-scoped model viewer state.
//!
//! A `ModelViewer` owns exactly one prepared clone of its asset. The cached
//! original stays untouched, so any number of viewers can show the same
//! asset in different colors. Dropping the viewer frees the clone.

use std::sync::Arc;

use shared::SceneGraph;
use uuid::Uuid;

use crate::assets::{AssetLoader, LoadHandle};
use crate::model::{prepare_model, ColorizeOptions, PreparedModel};

pub type ReadyCallback = Box<dyn FnMut(&PreparedModel)>;
pub type ErrorCallback = Box<dyn FnMut(&str)>;

/// What the caller hands to [`ModelViewer::mount`]
pub struct ViewerProps {
    pub asset_url: String,
    pub color: String,
    pub on_ready: Option<ReadyCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl ViewerProps {
    pub fn new(asset_url: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            asset_url: asset_url.into(),
            color: color.into(),
            on_ready: None,
            on_error: None,
        }
    }

    pub fn on_ready(mut self, f: impl FnMut(&PreparedModel) + 'static) -> Self {
        self.on_ready = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

#[derive(Debug)]
pub enum ViewerStatus {
    Loading,
    Ready(PreparedModel),
    Failed(String),
}

pub struct ModelViewer {
    id: Uuid,
    props: ViewerProps,
    options: ColorizeOptions,
    pending: Option<LoadHandle>,
    /// Pristine cached original; every prepare starts from here
    source: Option<Arc<SceneGraph>>,
    status: ViewerStatus,
    /// Bumped whenever the displayed model changes
    revision: u64,
}

impl ModelViewer {
    pub fn mount(props: ViewerProps, loader: &AssetLoader) -> Self {
        Self::mount_with_options(props, ColorizeOptions::default(), loader)
    }

    pub fn mount_with_options(
        props: ViewerProps,
        options: ColorizeOptions,
        loader: &AssetLoader,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!("Viewer {id} mounted for {}", props.asset_url);
        let pending = Some(loader.request(&props.asset_url));
        let mut viewer = Self {
            id,
            props,
            options,
            pending,
            source: None,
            status: ViewerStatus::Loading,
            revision: 0,
        };
        viewer.poll();
        viewer
    }

    /// Drive a pending load. Returns true when the status changed.
    pub fn poll(&mut self) -> bool {
        let Some(handle) = self.pending.as_mut() else {
            return false;
        };
        let Some(result) = handle.poll() else {
            return false;
        };
        let url = handle.url().to_string();
        self.pending = None;

        if url != self.props.asset_url {
            tracing::debug!("Viewer {} ignoring stale load of {url}", self.id);
            return false;
        }

        match result {
            Ok(scene) => {
                self.source = Some(scene);
                self.prepare();
            }
            Err(e) => {
                tracing::error!("Viewer {} could not load {url}: {e}", self.id);
                self.fail(e.to_string());
            }
        }
        true
    }

    /// Repaint from the cached original. No-op for the current color.
    pub fn set_color(&mut self, color: &str) {
        if self.props.color == color {
            return;
        }
        self.props.color = color.to_string();
        if self.source.is_some() {
            self.prepare();
        }
    }

    /// Discard the current clone and load another asset
    pub fn set_asset_url(&mut self, url: &str, loader: &AssetLoader) {
        if self.props.asset_url == url {
            return;
        }
        tracing::debug!("Viewer {} switching to {url}", self.id);
        self.props.asset_url = url.to_string();
        self.source = None;
        self.status = ViewerStatus::Loading;
        self.revision += 1;
        self.pending = Some(loader.request(url));
        self.poll();
    }

    pub fn set_options(&mut self, options: ColorizeOptions) {
        if self.options == options {
            return;
        }
        self.options = options;
        if self.source.is_some() {
            self.prepare();
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn asset_url(&self) -> &str {
        &self.props.asset_url
    }

    pub fn color(&self) -> &str {
        &self.props.color
    }

    pub fn options(&self) -> &ColorizeOptions {
        &self.options
    }

    pub fn status(&self) -> &ViewerStatus {
        &self.status
    }

    pub fn model(&self) -> Option<&PreparedModel> {
        match &self.status {
            ViewerStatus::Ready(model) => Some(model),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ViewerStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ViewerStatus::Loading)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn prepare(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        self.revision += 1;
        match prepare_model(&source, &self.props.color, &self.options) {
            Ok(model) => {
                tracing::info!(
                    "Viewer {} ready: {} painted, {} excluded, scale {:.3}",
                    self.id,
                    model.stats.painted,
                    model.stats.excluded,
                    model.scale
                );
                if let Some(on_ready) = self.props.on_ready.as_mut() {
                    on_ready(&model);
                }
                self.status = ViewerStatus::Ready(model);
            }
            Err(e) => {
                tracing::error!("Viewer {} failed to prepare model: {e}", self.id);
                self.fail(e.to_string());
            }
        }
    }

    fn fail(&mut self, reason: String) {
        if let Some(on_error) = self.props.on_error.as_mut() {
            on_error(&reason);
        }
        self.status = ViewerStatus::Failed(reason);
    }
}

impl Drop for ModelViewer {
    fn drop(&mut self) {
        tracing::debug!("Viewer {} unmounted", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCache;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn loader() -> AssetLoader {
        AssetLoader::new(Arc::new(AssetCache::new()))
    }

    #[test]
    fn test_builtin_mount_is_ready() {
        let loader = loader();
        let viewer = ModelViewer::mount(ViewerProps::new("builtin://sedan", "#336699"), &loader);
        let model = viewer.model().expect("ready");
        assert!(model.stats.painted > 0);
        assert!(!viewer.is_loading());
    }

    #[test]
    fn test_ready_fires_once_per_attempt() {
        let loader = loader();
        let ready = Rc::new(RefCell::new(0));
        let counter = ready.clone();
        let mut viewer = ModelViewer::mount(
            ViewerProps::new("builtin://suv", "red").on_ready(move |_| *counter.borrow_mut() += 1),
            &loader,
        );
        assert_eq!(*ready.borrow(), 1);
        assert!(!viewer.poll());
        assert_eq!(*ready.borrow(), 1);

        viewer.set_color("blue");
        assert_eq!(*ready.borrow(), 2);
        viewer.set_color("blue");
        assert_eq!(*ready.borrow(), 2);
    }

    #[test]
    fn test_bad_color_fails_without_model() {
        let loader = loader();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = errors.clone();
        let viewer = ModelViewer::mount(
            ViewerProps::new("builtin://bike", "not-a-color")
                .on_error(move |e| sink.borrow_mut().push(e.to_string())),
            &loader,
        );
        assert!(viewer.model().is_none());
        assert!(viewer.error().is_some());
        assert_eq!(errors.borrow().len(), 1);
    }

    #[test]
    fn test_recolor_starts_from_pristine_source() {
        let loader = loader();
        let mut viewer = ModelViewer::mount(ViewerProps::new("builtin://sedan", "red"), &loader);
        viewer.set_color("#00ff00");
        let model = viewer.model().unwrap();
        assert_eq!(model.color, shared::Rgb::new(0.0, 1.0, 0.0));

        let cached = loader.cache().get("builtin://sedan").unwrap();
        let original = cached.find_mesh("Hood_Panel").unwrap();
        assert_ne!(original.materials[0].display_color(), shared::Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_switch_url_reloads() {
        let loader = loader();
        let mut viewer = ModelViewer::mount(ViewerProps::new("builtin://sedan", "red"), &loader);
        let before = viewer.revision();
        viewer.set_asset_url("builtin://bike", &loader);
        assert_eq!(viewer.asset_url(), "builtin://bike");
        assert!(viewer.revision() > before);
        assert!(viewer.model().unwrap().scene.find_mesh("Fuel_Tank").is_some());
    }
}
