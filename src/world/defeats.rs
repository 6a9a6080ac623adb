//! Defeated enemy registry
//!
//! Regular defeats are transient and forgotten when the player dies.
//! Persistent and boss defeats last for the whole save; only boss ids are
//! written to save records.

use std::collections::{BTreeSet, HashSet};

use crate::data::{EnemyKind, EnemyRoster};

#[derive(Debug, Clone, Default)]
pub struct EnemyDefeatRegistry {
    roster: EnemyRoster,
    transient: HashSet<String>,
    persistent: HashSet<String>,
    bosses: BTreeSet<String>,
}

impl EnemyDefeatRegistry {
    /// Create a registry classifying enemies with the given roster
    pub fn new(roster: EnemyRoster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn roster(&self) -> &EnemyRoster {
        &self.roster
    }

    /// Record a defeat; returns the kind it was filed under
    pub fn record_defeat(&mut self, id: &str) -> EnemyKind {
        let kind = self.roster.kind_of(id);
        match kind {
            EnemyKind::Regular => {
                self.transient.insert(id.to_string());
            }
            EnemyKind::Persistent => {
                self.persistent.insert(id.to_string());
            }
            EnemyKind::Boss => {
                if self.bosses.insert(id.to_string()) {
                    log::info!("Boss defeated: {}", id);
                }
            }
        }
        kind
    }

    pub fn is_defeated(&self, id: &str) -> bool {
        self.transient.contains(id) || self.persistent.contains(id) || self.bosses.contains(id)
    }

    /// Forget regular defeats so those enemies respawn
    pub fn clear_transient(&mut self) {
        self.transient.clear();
    }

    pub fn defeated_boss_ids(&self) -> &BTreeSet<String> {
        &self.bosses
    }

    /// Merge boss ids from a save
    pub fn add_defeated_bosses<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        self.bosses.extend(ids);
    }

    /// Forget every defeat
    pub fn clear(&mut self) {
        self.transient.clear();
        self.persistent.clear();
        self.bosses.clear();
    }
}
