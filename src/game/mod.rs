//! Game module - Session state and lifecycle

mod state;
mod session;
mod instance;
mod time;
mod events;

#[cfg(test)]
pub(crate) mod testing;

pub use state::{GameState, SessionState, Vec2};
pub use session::{Collaborators, LoadOutcome, SessionError, SessionManager};
pub use instance::SessionHost;
pub use time::{Clock, SystemClock, elapsed_whole_seconds, format_playtime};
pub use events::{DeathListener, DeathObservers, ObserverId};
