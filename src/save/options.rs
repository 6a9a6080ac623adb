//! Player options
//!
//! Settings that persist independently of save slots.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::save_game::SaveError;

/// Current options version for compatibility
const OPTIONS_VERSION: u32 = 1;

/// Persistent player options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Version for compatibility checking
    pub version: u32,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub effects_volume: f32,
    /// Camera shake on hits and explosions
    pub screen_shake: bool,
    /// UI language code
    pub language: String,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            version: OPTIONS_VERSION,
            master_volume: 1.0,
            music_volume: 0.8,
            effects_volume: 0.8,
            screen_shake: true,
            language: "en".to_string(),
        }
    }
}

impl GameOptions {
    /// Clamp volumes into range
    pub fn normalized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.effects_volume = self.effects_volume.clamp(0.0, 1.0);
        self
    }
}

/// Storage for player options
pub trait OptionsStore {
    /// Load options, falling back to defaults
    fn load(&self) -> GameOptions;

    fn save(&mut self, options: &GameOptions) -> Result<(), SaveError>;
}

/// Options stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonOptionsStore {
    path: PathBuf,
}

impl JsonOptionsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store `options.json` inside a data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("options.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptionsStore for JsonOptionsStore {
    fn load(&self) -> GameOptions {
        if self.path.exists() {
            match fs::read_to_string(&self.path) {
                Ok(data) => match serde_json::from_str::<GameOptions>(&data) {
                    Ok(options) => {
                        log::info!("Options loaded from {:?}", self.path);
                        return options.normalized();
                    }
                    Err(e) => log::warn!("Failed to parse options: {}, using defaults", e),
                },
                Err(e) => log::warn!("Failed to read options: {}, using defaults", e),
            }
        }

        log::info!("Using default options");
        GameOptions::default()
    }

    fn save(&mut self, options: &GameOptions) -> Result<(), SaveError> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(options)?;
        fs::write(&self.path, json)?;

        log::info!("Options saved to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonOptionsStore::in_dir(dir.path());
        assert_eq!(store.load(), GameOptions::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonOptionsStore::in_dir(&dir.path().join("nested"));
        let options = GameOptions {
            music_volume: 0.25,
            screen_shake: false,
            language: "nl".to_string(),
            ..GameOptions::default()
        };

        store.save(&options).unwrap();
        assert_eq!(store.load(), options);
    }

    #[test]
    fn test_load_clamps_volumes_and_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonOptionsStore::in_dir(dir.path());
        fs::write(store.path(), r#"{ "master_volume": 3.0 }"#).unwrap();

        let options = store.load();
        assert_eq!(options.master_volume, 1.0);
        assert_eq!(options.language, "en");
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonOptionsStore::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.load(), GameOptions::default());
    }
}
