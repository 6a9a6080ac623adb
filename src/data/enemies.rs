//! Enemy roster
//!
//! Classifies enemy ids so the defeat registry knows which defeats survive a
//! player death. Loaded from RON, with a built-in fallback roster.

use serde::{Deserialize, Serialize};

/// How long a defeat of this enemy is remembered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Respawns when the player dies
    #[default]
    Regular,
    /// Stays defeated for the whole save (gate guards, scripted encounters)
    Persistent,
    /// Stays defeated and is written to the save
    Boss,
}

/// A roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyEntry {
    /// Unique enemy id, as placed in scenes
    pub id: String,
    /// Display name
    pub name: String,
    pub kind: EnemyKind,
}

/// All known enemies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyRoster {
    pub entries: Vec<EnemyEntry>,
}

impl EnemyRoster {
    /// Find an entry by id
    pub fn find(&self, id: &str) -> Option<&EnemyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Kind of an enemy; ids missing from the roster are regular
    pub fn kind_of(&self, id: &str) -> EnemyKind {
        self.find(id).map(|e| e.kind).unwrap_or_default()
    }

    /// All boss entries
    pub fn bosses(&self) -> Vec<&EnemyEntry> {
        self.entries.iter()
            .filter(|e| e.kind == EnemyKind::Boss)
            .collect()
    }
}

fn entry(id: &str, name: &str, kind: EnemyKind) -> EnemyEntry {
    EnemyEntry {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    }
}

/// Built-in roster used when no data file is present
pub fn default_enemy_roster() -> EnemyRoster {
    EnemyRoster {
        entries: vec![
            entry("scrap_crawler", "Scrap Crawler", EnemyKind::Regular),
            entry("rust_wasp", "Rust Wasp", EnemyKind::Regular),
            entry("ash_hound", "Ash Hound", EnemyKind::Regular),
            entry("gate_sentinel", "Gate Sentinel", EnemyKind::Persistent),
            entry("cinder_warden", "Cinder Warden", EnemyKind::Boss),
            entry("hollow_engine", "The Hollow Engine", EnemyKind::Boss),
        ],
    }
}
