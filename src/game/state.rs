//! Game state and the live session working copy
//!
//! `SessionState` is the mutable copy of everything the current play session
//! tracks. Save records are snapshots taken from it.

use serde::{Deserialize, Serialize};

/// Top-level game states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen, no session in progress
    #[default]
    Title,
    /// Actively playing
    Play,
    /// In-game menu is open, world time is stopped
    MenuOpen,
}

/// A 2D world-space position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Mutable state of the current play session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Current game state
    pub game_state: GameState,
    /// True until a save has been loaded into this session
    pub is_first_start: bool,
    /// Where the player spawns on the next scene activation
    pub player_start_position: Vec2,
    /// Facing of the player at spawn (sign selects left/right)
    pub player_start_facing: f32,
    pub player_health: i32,
    pub player_driving_force: i32,
    /// Scene the player returns to after death
    pub resurrection_scene: String,
    /// Position in `resurrection_scene` the player returns to after death
    pub resurrection_position: Vec2,
    /// Save slot used by `game_save`
    pub active_slot: u32,
    /// Playtime carried over from the loaded save, in seconds
    pub accumulated_playtime_secs: u64,
    /// Wall-clock time (seconds) at which the current session started
    pub session_started_at: f64,
    /// Armed start latch; consumed by the first `is_started` call
    pub session_start_pending: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            game_state: GameState::Title,
            is_first_start: true,
            player_start_position: Vec2::ZERO,
            player_start_facing: 0.0,
            player_health: 0,
            player_driving_force: 0,
            resurrection_scene: String::new(),
            resurrection_position: Vec2::ZERO,
            active_slot: 1,
            accumulated_playtime_secs: 0,
            session_started_at: 0.0,
            session_start_pending: true,
        }
    }
}

impl SessionState {
    /// Create session state starting in the given game state
    pub fn with_game_state(game_state: GameState) -> Self {
        Self {
            game_state,
            ..Self::default()
        }
    }

    /// Reset every field to its default, keeping the current game state
    pub fn reset(&mut self) {
        *self = Self::with_game_state(self.game_state);
    }
}
