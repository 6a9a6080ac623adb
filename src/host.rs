//! Engine-facing collaborators
//!
//! The session never touches the engine directly. Scene changes and the
//! global time-stop effect go through these traits, implemented by the host.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Requests scene changes
///
/// Fire-and-forget: the host activates the scene later and reports it back
/// through `SessionManager::on_scene_activated`.
pub trait SceneLoader {
    fn load_scene(&mut self, scene_id: &str);
}

/// Controls the global time-stop effect
pub trait TimeControl {
    fn start_time_stop(&mut self);
    fn cancel_time_stop(&mut self);
}

/// Queue of scene requests, drained by the host loop at frame boundaries
///
/// Clones share the same queue, so the host keeps one while the session owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct SceneRequests {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl SceneRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending request
    pub fn take_next(&self) -> Option<String> {
        self.queue.borrow_mut().pop_front()
    }

    /// Pending requests, oldest first
    pub fn pending(&self) -> Vec<String> {
        self.queue.borrow().iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl SceneLoader for SceneRequests {
    fn load_scene(&mut self, scene_id: &str) {
        log::debug!("Scene requested: {}", scene_id);
        self.queue.borrow_mut().push_back(scene_id.to_string());
    }
}

/// Shared world time scale: 0.0 while time is stopped, 1.0 otherwise
#[derive(Debug, Clone)]
pub struct TimeScale {
    scale: Rc<Cell<f32>>,
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            scale: Rc::new(Cell::new(1.0)),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn is_stopped(&self) -> bool {
        self.scale.get() == 0.0
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeControl for TimeScale {
    fn start_time_stop(&mut self) {
        self.scale.set(0.0);
    }

    fn cancel_time_stop(&mut self) {
        self.scale.set(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_requests_shared_between_clones() {
        let requests = SceneRequests::new();
        let mut loader = requests.clone();
        loader.load_scene("Prologue");
        loader.load_scene("Foundry");

        assert_eq!(requests.pending(), vec!["Prologue", "Foundry"]);
        assert_eq!(requests.take_next().as_deref(), Some("Prologue"));
        assert_eq!(requests.take_next().as_deref(), Some("Foundry"));
        assert!(requests.is_empty());
    }

    #[test]
    fn test_time_scale() {
        let scale = TimeScale::new();
        let mut control = scale.clone();
        assert!(!scale.is_stopped());

        control.start_time_stop();
        assert!(scale.is_stopped());

        control.cancel_time_stop();
        assert_eq!(scale.scale(), 1.0);
    }
}
