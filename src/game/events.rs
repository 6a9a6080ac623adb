//! Death notification observers
//!
//! Listeners are scene-scoped: the session clears them on every scene
//! activation, so a death never reaches a listener from an earlier scene.

use std::fmt;

/// Handle returned by `DeathObservers::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A zero-argument death listener
pub type DeathListener = Box<dyn FnMut()>;

/// Ordered list of death listeners
#[derive(Default)]
pub struct DeathObservers {
    listeners: Vec<(ObserverId, DeathListener)>,
    next_id: u64,
}

impl DeathObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener, notified after those already subscribed
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Call every listener in subscription order, returning how many ran
    pub fn notify(&mut self) -> usize {
        for (_, listener) in self.listeners.iter_mut() {
            listener();
        }
        self.listeners.len()
    }

    /// Drop all listeners
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for DeathObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeathObservers")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
