//! Save/load system
//!
//! Handles save slots and player options.

pub mod save_game;
pub mod options;

pub use save_game::{
    SaveRecord, SaveError, SaveSummary, PersistenceStore,
    JsonFileStore, MemoryStore, check_slot, save_directory, SAVE_VERSION,
};

pub use options::{GameOptions, OptionsStore, JsonOptionsStore};
