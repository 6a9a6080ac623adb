//! World progress registries
//!
//! Facts about the game world the player has uncovered or completed.

pub mod defeats;
pub mod maps;
pub mod skills;
pub mod tutorials;

pub use defeats::EnemyDefeatRegistry;
pub use maps::{DiscoveredMaps, MapCoord};
pub use skills::{Ability, LearnedSkills};
pub use tutorials::SeenTutorials;
