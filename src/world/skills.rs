//! Learned movement and combat abilities

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Abilities the player can learn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Dash,
    DoubleJump,
    WallClimb,
    AirDash,
    Glide,
    GroundPound,
    OverdriveBurst,
}

impl Ability {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Dash => "Dash",
            Ability::DoubleJump => "Double Jump",
            Ability::WallClimb => "Wall Climb",
            Ability::AirDash => "Air Dash",
            Ability::Glide => "Glide",
            Ability::GroundPound => "Ground Pound",
            Ability::OverdriveBurst => "Overdrive Burst",
        }
    }
}

/// Set of abilities the player has learned
#[derive(Debug, Clone, Default)]
pub struct LearnedSkills {
    flags: BTreeSet<Ability>,
}

impl LearnedSkills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn an ability; returns true if it was not known before
    pub fn learn(&mut self, ability: Ability) -> bool {
        let learned = self.flags.insert(ability);
        if learned {
            log::info!("Learned ability: {}", ability.name());
        }
        learned
    }

    /// Merge abilities from a save
    pub fn extend<I: IntoIterator<Item = Ability>>(&mut self, abilities: I) {
        self.flags.extend(abilities);
    }

    pub fn has(&self, ability: Ability) -> bool {
        self.flags.contains(&ability)
    }

    pub fn flags(&self) -> &BTreeSet<Ability> {
        &self.flags
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}
