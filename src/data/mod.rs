//! Data loading and external session content
//!
//! Session configuration and the enemy roster are read from RON files,
//! so they can be tuned without rebuilding.

pub mod config;
pub mod enemies;
pub mod loader;

pub use config::SessionConfig;
pub use enemies::{default_enemy_roster, EnemyEntry, EnemyKind, EnemyRoster};
pub use loader::{export_default_data, GameData};
