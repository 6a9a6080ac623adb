//! Session configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::game::GameState;

/// Settings the host passes when building a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Scene loaded when a slot holds no save
    pub starting_scene: String,
    /// Game state at construction
    pub initial_state: GameState,
    /// Slot to load during `on_init`; only honored when starting in `Play`
    pub auto_load_slot_on_start: Option<u32>,
    /// Number of slots shown by the load menu
    pub slot_count: u32,
    /// Overrides the platform data directory for saves and options
    pub save_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_scene: "Prologue".to_string(),
            initial_state: GameState::Title,
            auto_load_slot_on_start: None,
            slot_count: 3,
            save_dir: None,
        }
    }
}
