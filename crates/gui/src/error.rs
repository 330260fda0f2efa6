//! Error types for model preparation, asset loading and timer storage.

/// Failure while turning a cached asset into a displayable model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid paint color: {0}")]
    Color(#[from] shared::ColorParseError),

    #[error("Mesh '{mesh}' has a non-finite vertex position")]
    NonFiniteVertex { mesh: String },

    #[error("Mesh '{mesh}' references vertex {index} but only has {count}")]
    IndexOutOfRange { mesh: String, index: u32, count: usize },

    #[error("Mesh '{mesh}' draws with material slot {slot} but has {count} materials")]
    MissingMaterialSlot { mesh: String, slot: usize, count: usize },
}

/// Failure while fetching or decoding a 3D asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Server returned HTTP {0}")]
    Status(u16),

    #[error("Unknown built-in model '{0}'")]
    UnknownBuiltin(String),

    #[error("Could not start loader runtime: {0}")]
    Runtime(String),
}

/// Failure in the key-value store backing job timers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No writable data directory available")]
    NoDataDir,
}

pub type Result<T, E = ModelError> = std::result::Result<T, E>;
