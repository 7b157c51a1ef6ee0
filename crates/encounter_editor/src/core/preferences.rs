//! Editor preferences and settings.
//!
//! Persistent settings that survive editor restarts, stored as TOML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scene_state::DEFAULT_MIN_UNITS;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Editor preferences and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    // Window scaling steps
    pub window_enlarge_factor: f64,
    pub window_shrink_factor: f64,

    // New encounters
    pub default_min_units: u32,

    // Viewport
    pub show_grid: bool,

    /// Maximum undo depth, unbounded when absent
    pub history_limit: Option<usize>,

    /// Root holding the `images/` and `encounters/` directories
    pub data_dir: PathBuf,

    /// Chord (`"ctrl+g"`) to action name (`"enlarge_grid"`) overrides
    pub key_bindings: BTreeMap<String, String>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            window_enlarge_factor: 1.15,
            window_shrink_factor: 0.85,
            default_min_units: DEFAULT_MIN_UNITS,
            show_grid: false,
            history_limit: None,
            data_dir: Self::default_data_dir(),
            key_bindings: BTreeMap::new(),
        }
    }
}

impl EditorPreferences {
    /// Load preferences from a file.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path)?;
        let prefs = toml::from_str(&content)?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(prefs)
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, PreferencesError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No preferences at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save preferences to a file.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Get the default preferences path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("encounter_manager");
            p.push("preferences.toml");
            p
        })
    }

    fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".encountermanager")
    }

    pub fn image_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    pub fn encounter_dir(&self) -> PathBuf {
        self.data_dir.join("encounters")
    }
}
