//! Single-instance session ownership
//!
//! The host loop owns at most one running session. A second session
//! installed while one is running is discarded without being initialized.

use super::session::{SessionError, SessionManager};

#[derive(Default)]
pub struct SessionHost {
    session: Option<SessionManager>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install and initialize a session
    ///
    /// Returns false, dropping `session`, if one is already running.
    pub fn install(&mut self, session: SessionManager) -> bool {
        if self.session.is_some() {
            log::warn!("Session already running, discarding new instance");
            return false;
        }
        self.session.insert(session).on_init();
        true
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SessionManager> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut SessionManager> {
        self.session.as_mut()
    }

    /// Shut down and release the running session, if any
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        match self.session.take() {
            Some(mut session) => session.on_shutdown(),
            None => Ok(()),
        }
    }
}
