// Settings persistence: strip geometry and the base URL for shareable links.
// Uses platform-native config dir: e.g. ~/Library/Application Support/splitbar/settings.json
// on macOS, ~/.config/splitbar/settings.json on Linux.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use splitbar_layout::{StripGeometry, DEFAULT_INSERT_BAND, DEFAULT_ITEM_GAP, DEFAULT_ITEM_WIDTH};

pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitbarSettings {
    #[serde(default)]
    pub strip: StripSettings,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for SplitbarSettings {
    fn default() -> Self {
        Self {
            strip: StripSettings::default(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    pub item_width: f32,
    pub item_gap: f32,
    /// Share of each tile edge that inserts rather than replaces.
    pub insert_band: f32,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            item_width: DEFAULT_ITEM_WIDTH,
            item_gap: DEFAULT_ITEM_GAP,
            insert_band: DEFAULT_INSERT_BAND,
        }
    }
}

impl StripSettings {
    /// Geometry for the drag engine. Unusable values fall back to defaults.
    pub fn geometry(&self) -> StripGeometry {
        let geometry =
            StripGeometry::new(self.item_width, self.item_gap).with_insert_band(self.insert_band);
        match geometry.validate() {
            Ok(()) => geometry,
            Err(e) => {
                log::warn!("Ignoring strip settings: {}", e);
                StripGeometry::default()
            }
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("splitbar").join("settings.json"))
}

pub fn load_settings() -> SplitbarSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => SplitbarSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> SplitbarSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                SplitbarSettings::default()
            }
        },
        Err(_) => SplitbarSettings::default(),
    }
}

pub fn save_settings(settings: &SplitbarSettings) {
    let path = match settings_path() {
        Some(p) => p,
        None => {
            log::warn!("Cannot determine settings path");
            return;
        }
    };
    save_settings_to(settings, &path);
}

pub fn save_settings_to(settings: &SplitbarSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
