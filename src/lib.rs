//! Emberdrift - session core for a 2D action game
//!
//! Tracks the game state, player vitals and playtime of the current session,
//! and saves and loads progress to numbered slots.

pub mod game;
pub mod world;
pub mod save;
pub mod data;
pub mod host;

// Re-export commonly used types
pub use game::{GameState, SessionHost, SessionManager};
pub use save::{SaveRecord, PersistenceStore};
