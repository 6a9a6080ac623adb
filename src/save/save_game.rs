//! Game save/load system
//!
//! Save records, the slot-keyed persistence interface, and its JSON-file and
//! in-memory implementations.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::game::{format_playtime, Vec2};
use crate::world::{Ability, MapCoord};

/// Save file version for compatibility checking
pub const SAVE_VERSION: u32 = 1;

/// Durable snapshot of a play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: u32,
    pub play_time_seconds: u64,
    /// Resurrection scene at the time of saving
    pub scene_id: String,
    /// Resurrection position at the time of saving
    pub player_position: Vec2,
    pub learned_skills: BTreeSet<Ability>,
    pub discovered_maps: BTreeSet<MapCoord>,
    pub defeated_boss_ids: BTreeSet<String>,
    pub seen_tutorial_ids: BTreeSet<String>,
}

impl SaveRecord {
    /// Create an otherwise empty record at a scene and position
    pub fn new(scene_id: impl Into<String>, player_position: Vec2) -> Self {
        Self {
            version: SAVE_VERSION,
            play_time_seconds: 0,
            scene_id: scene_id.into(),
            player_position,
            learned_skills: BTreeSet::new(),
            discovered_maps: BTreeSet::new(),
            defeated_boss_ids: BTreeSet::new(),
            seen_tutorial_ids: BTreeSet::new(),
        }
    }

    /// Brief summary for the load menu
    pub fn summary(&self) -> SaveSummary {
        SaveSummary {
            scene_id: self.scene_id.clone(),
            play_time_seconds: self.play_time_seconds,
            play_time: format_playtime(self.play_time_seconds),
        }
    }
}

/// Brief summary of a save for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub scene_id: String,
    pub play_time_seconds: u64,
    /// Playtime rendered as `H:MM:SS`
    pub play_time: String,
}

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Invalid save slot {0}: slots start at 1")]
    InvalidSlot(u32),
}

/// Reject slot 0
pub fn check_slot(slot: u32) -> Result<u32, SaveError> {
    if slot == 0 {
        Err(SaveError::InvalidSlot(slot))
    } else {
        Ok(slot)
    }
}

/// Slot-keyed storage for save records
///
/// `read` returns `Ok(None)` when the slot holds no save.
pub trait PersistenceStore {
    /// Write a record, replacing whatever the slot held
    fn write(&mut self, slot: u32, record: &SaveRecord) -> Result<(), SaveError>;

    fn read(&self, slot: u32) -> Result<Option<SaveRecord>, SaveError>;

    fn exists(&self, slot: u32) -> bool;

    /// Delete a slot; deleting an empty slot is not an error
    fn delete(&mut self, slot: u32) -> Result<(), SaveError>;
}

/// Get the data directory saves and options live in
pub fn save_directory(override_dir: Option<&Path>) -> PathBuf {
    use directories::ProjectDirs;

    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "emberdrift", "Emberdrift") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Stores each slot as `save_<slot>.json` in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the path for a specific save slot
    pub fn save_path(&self, slot: u32) -> PathBuf {
        self.dir.join(format!("save_{}.json", slot))
    }
}

impl PersistenceStore for JsonFileStore {
    fn write(&mut self, slot: u32, record: &SaveRecord) -> Result<(), SaveError> {
        check_slot(slot)?;
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.save_path(slot), json)?;

        log::info!("Game saved to slot {}", slot);
        Ok(())
    }

    fn read(&self, slot: u32) -> Result<Option<SaveRecord>, SaveError> {
        let path = self.save_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        let record: SaveRecord = serde_json::from_str(&data)?;

        // Version check
        if record.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: record.version,
            });
        }

        log::info!("Game loaded from slot {}", slot);
        Ok(Some(record))
    }

    fn exists(&self, slot: u32) -> bool {
        self.save_path(slot).exists()
    }

    fn delete(&mut self, slot: u32) -> Result<(), SaveError> {
        let path = self.save_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            log::info!("Deleted save slot {}", slot);
        }
        Ok(())
    }
}

/// In-memory store; clones share the same slots
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<HashMap<u32, SaveRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn write(&mut self, slot: u32, record: &SaveRecord) -> Result<(), SaveError> {
        check_slot(slot)?;
        self.records.borrow_mut().insert(slot, record.clone());
        Ok(())
    }

    fn read(&self, slot: u32) -> Result<Option<SaveRecord>, SaveError> {
        Ok(self.records.borrow().get(&slot).cloned())
    }

    fn exists(&self, slot: u32) -> bool {
        self.records.borrow().contains_key(&slot)
    }

    fn delete(&mut self, slot: u32) -> Result<(), SaveError> {
        self.records.borrow_mut().remove(&slot);
        Ok(())
    }
}
