//! Application settings

use serde::{Deserialize, Serialize};

use crate::model::ColorizeOptions;

/// Model preparation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Largest model dimension after normalization (world units)
    pub target_size: f32,
    /// Metalness cap for repainted panels
    pub metalness_max: f32,
    /// Roughness floor for repainted panels
    pub roughness_min: f32,
    /// Paint used when a job has no color yet
    pub default_color: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let options = ColorizeOptions::default();
        Self {
            target_size: options.target_size,
            metalness_max: options.metalness_max,
            roughness_min: options.roughness_min,
            default_color: "#1f5fbf".to_string(),
        }
    }
}

impl ViewerSettings {
    pub fn colorize_options(&self) -> ColorizeOptions {
        let defaults = ColorizeOptions::default();
        let sane = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        ColorizeOptions {
            target_size: sane(self.target_size, defaults.target_size).max(0.1),
            metalness_max: sane(self.metalness_max, defaults.metalness_max).clamp(0.0, 1.0),
            roughness_min: sane(self.roughness_min, defaults.roughness_min).clamp(0.0, 1.0),
        }
    }
}

/// Grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in world units
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 0.5,
            range: 8,
            opacity: 0.5,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Draw completion markers over the model
    pub show_markers: bool,
    /// Slowly spin the model while idle
    pub auto_rotate: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            show_markers: true,
            auto_rotate: false,
        }
    }
}

/// Zone overlay colors, one RGB triple per visual state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneColors {
    pub default: [u8; 3],
    pub hovered: [u8; 3],
    pub selected: [u8; 3],
    pub completed: [u8; 3],
}

impl Default for ZoneColors {
    fn default() -> Self {
        Self {
            default: [120, 120, 130],
            hovered: [0, 180, 220],
            selected: [255, 170, 0],
            completed: [60, 190, 90],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// Interface language code ("ru" or "en")
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "ru".to_string()
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: default_language(),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub viewer: ViewerSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub zones: ZoneColors,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = project_dirs() {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring unreadable settings file: {e}"),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = project_dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(config_path, json) {
                        tracing::warn!("Failed to save settings: {e}");
                    }
                }
            }
        }
    }
}

pub(crate) fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "detailstudio", "detail-studio")
}
