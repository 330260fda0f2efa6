use std::sync::Arc;

use shared::SceneGraph;
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::{builtin, builtin_category, AssetCache, AssetSource};
use crate::error::AssetError;

type LoadResult = Result<Arc<SceneGraph>, AssetError>;

/// Pending asset load, polled from the UI thread
pub struct LoadHandle {
    url: String,
    rx: oneshot::Receiver<LoadResult>,
}

impl LoadHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Non-blocking check; `None` while the load is still running
    pub fn poll(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(AssetError::Runtime(
                "loader task ended without a result".to_string(),
            ))),
        }
    }

    /// Block until the load finishes. Must not be called from async code.
    pub fn wait(self) -> LoadResult {
        self.rx.blocking_recv().unwrap_or_else(|_| {
            Err(AssetError::Runtime(
                "loader task ended without a result".to_string(),
            ))
        })
    }
}

/// Fetches assets in the background and fills the shared cache.
/// Failed loads are reported once and never retried automatically.
pub struct AssetLoader {
    cache: Arc<AssetCache>,
    runtime: Option<tokio::runtime::Runtime>,
}

impl AssetLoader {
    pub fn new(cache: Arc<AssetCache>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("asset-loader")
            .enable_all()
            .build()
            .map_err(|e| tracing::error!("Failed to start asset loader runtime: {e}"))
            .ok();
        Self { cache, runtime }
    }

    pub fn cache(&self) -> &Arc<AssetCache> {
        &self.cache
    }

    /// Start loading `url`. Cache hits and built-in models resolve
    /// immediately; everything else completes on the loader runtime.
    pub fn request(&self, url: &str) -> LoadHandle {
        let (tx, rx) = oneshot::channel();
        let handle = LoadHandle {
            url: url.to_string(),
            rx,
        };

        if let Some(scene) = self.cache.get(url) {
            tracing::debug!("Asset cache hit: {url}");
            let _ = tx.send(Ok(scene));
            return handle;
        }

        match AssetSource::parse(url) {
            AssetSource::Builtin(name) => {
                let result = builtin_category(&name)
                    .map(|category| self.cache.insert(url, builtin::vehicle(category)))
                    .ok_or(AssetError::UnknownBuiltin(name));
                let _ = tx.send(result);
            }
            source => {
                let Some(runtime) = &self.runtime else {
                    let _ = tx.send(Err(AssetError::Runtime(
                        "asset loader runtime is not available".to_string(),
                    )));
                    return handle;
                };
                let cache = self.cache.clone();
                let url = url.to_string();
                runtime.spawn(async move {
                    let result = fetch(source).await.map(|scene| cache.insert(&url, scene));
                    match &result {
                        Ok(scene) => tracing::info!(
                            "Loaded asset {url} ({} meshes, {} vertices)",
                            scene.mesh_count(),
                            scene.vertex_count()
                        ),
                        Err(e) => tracing::error!("Failed to load asset {url}: {e}"),
                    }
                    let _ = tx.send(result);
                });
            }
        }

        handle
    }
}

async fn fetch(source: AssetSource) -> Result<SceneGraph, AssetError> {
    let bytes = match source {
        AssetSource::Remote(url) => {
            let client = reqwest::Client::builder().build()?;
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AssetError::Status(status.as_u16()));
            }
            response.bytes().await?.to_vec()
        }
        AssetSource::File(path) => tokio::fs::read(&path).await?,
        AssetSource::Builtin(name) => return Err(AssetError::UnknownBuiltin(name)),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_resolves_immediately_and_caches() {
        let cache = Arc::new(AssetCache::new());
        let loader = AssetLoader::new(cache.clone());
        let mut handle = loader.request("builtin://sedan");
        let scene = handle.poll().expect("builtin is synchronous").unwrap();
        assert!(cache.contains("builtin://sedan"));

        let again = loader.request("builtin://sedan").wait().unwrap();
        assert!(Arc::ptr_eq(&scene, &again));
    }

    #[test]
    fn test_unknown_builtin_is_error() {
        let loader = AssetLoader::new(Arc::new(AssetCache::new()));
        let err = loader.request("builtin://truck").wait().unwrap_err();
        assert!(matches!(err, AssetError::UnknownBuiltin(name) if name == "truck"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = AssetLoader::new(Arc::new(AssetCache::new()));
        let err = loader
            .request("/definitely/not/here/model.json")
            .wait()
            .unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn test_file_asset_round_trip() {
        let dir = std::env::temp_dir().join(format!("detail-studio-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bike.json");
        let scene = builtin::vehicle(shared::VehicleCategory::Bike);
        std::fs::write(&path, scene.to_json().unwrap()).unwrap();

        let cache = Arc::new(AssetCache::new());
        let loader = AssetLoader::new(cache.clone());
        let url = path.to_string_lossy().to_string();
        let loaded = loader.request(&url).wait().unwrap();
        assert_eq!(*loaded, scene);
        assert!(cache.contains(&url));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
