//! Asset retrieval and caching.
//!
//! The cache hands out `Arc<SceneGraph>` and never lets anyone mutate a
//! cached scene; viewers work on their own clones.

pub mod builtin;
mod loader;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use shared::{SceneGraph, VehicleCategory};

pub use loader::{AssetLoader, LoadHandle};

/// Where an asset URL points
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    Builtin(String),
    Remote(String),
    File(PathBuf),
}

impl AssetSource {
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        if let Some(name) = url.strip_prefix(builtin::SCHEME) {
            AssetSource::Builtin(name.to_string())
        } else if url.starts_with("http://") || url.starts_with("https://") {
            AssetSource::Remote(url.to_string())
        } else if let Some(path) = url.strip_prefix("file://") {
            AssetSource::File(PathBuf::from(path))
        } else {
            AssetSource::File(PathBuf::from(url))
        }
    }
}

/// Process-wide asset cache keyed by URL
#[derive(Default)]
pub struct AssetCache {
    entries: Mutex<HashMap<String, Arc<SceneGraph>>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<SceneGraph>> {
        self.lock().get(url).cloned()
    }

    /// Insert a freshly loaded scene. If another load for the same URL
    /// finished first, that entry is kept and returned instead.
    pub fn insert(&self, url: &str, scene: SceneGraph) -> Arc<SceneGraph> {
        self.lock()
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(scene))
            .clone()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached scene (viewers keep their clones)
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<SceneGraph>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolve a `builtin://` name to a category
pub(crate) fn builtin_category(name: &str) -> Option<VehicleCategory> {
    VehicleCategory::parse(name)
}
