//! RON data loader
//!
//! Loads session data from external RON files, with fallback to hardcoded defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::config::SessionConfig;
use super::enemies::{default_enemy_roster, EnemyRoster};

/// Default directory for data files
pub const DATA_DIR: &str = "assets/data";

/// Everything the session reads from data files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameData {
    pub config: SessionConfig,
    pub enemies: EnemyRoster,
}

impl GameData {
    /// Load from `assets/data/`
    pub fn load_from_assets() -> Self {
        Self::load_from(Path::new(DATA_DIR))
    }

    /// Load from a directory; missing or malformed files fall back to defaults
    pub fn load_from(base_path: &Path) -> Self {
        let config = load_ron_or(&base_path.join("session.ron"), SessionConfig::default);
        let enemies = load_ron_or(&base_path.join("enemies.ron"), default_enemy_roster);
        Self { config, enemies }
    }
}

fn load_ron_or<T: DeserializeOwned>(path: &Path, fallback: impl FnOnce() -> T) -> T {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str(&content) {
                Ok(value) => {
                    log::info!("Loaded {:?}", path);
                    return value;
                }
                Err(e) => log::warn!("Failed to parse {:?}: {}", path, e),
            },
            Err(e) => log::warn!("Failed to read {:?}: {}", path, e),
        }
    }
    fallback()
}

fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| format!("Failed to serialize {:?}: {}", path, e))?;
    fs::write(path, content).map_err(|e| format!("Failed to write {:?}: {}", path, e))
}

/// Write the built-in defaults as RON files, as a starting point for editing
pub fn export_default_data(base_path: &Path) -> Result<(), String> {
    fs::create_dir_all(base_path).map_err(|e| e.to_string())?;
    write_ron(&base_path.join("session.ron"), &SessionConfig::default())?;
    write_ron(&base_path.join("enemies.ron"), &default_enemy_roster())?;
    Ok(())
}
