//! Recording collaborators for session tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::data::{default_enemy_roster, SessionConfig};
use crate::host::{SceneRequests, TimeControl};
use crate::save::{GameOptions, MemoryStore, OptionsStore, SaveError};

use super::session::{Collaborators, SessionManager};
use super::time::Clock;

#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCall {
    Start,
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTime {
    calls: Rc<RefCell<Vec<TimeCall>>>,
}

impl RecordingTime {
    pub fn calls(&self) -> Vec<TimeCall> {
        self.calls.borrow().clone()
    }
}

impl TimeControl for RecordingTime {
    fn start_time_stop(&mut self) {
        self.calls.borrow_mut().push(TimeCall::Start);
    }

    fn cancel_time_stop(&mut self) {
        self.calls.borrow_mut().push(TimeCall::Cancel);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingOptions {
    saved: Rc<RefCell<Vec<GameOptions>>>,
}

impl RecordingOptions {
    pub fn saved(&self) -> Vec<GameOptions> {
        self.saved.borrow().clone()
    }
}

impl OptionsStore for RecordingOptions {
    fn load(&self) -> GameOptions {
        self.saved.borrow().last().cloned().unwrap_or_default()
    }

    fn save(&mut self, options: &GameOptions) -> Result<(), SaveError> {
        self.saved.borrow_mut().push(options.clone());
        Ok(())
    }
}

pub struct Fixture {
    pub session: SessionManager,
    pub store: MemoryStore,
    pub scenes: SceneRequests,
    pub time: RecordingTime,
    pub clock: ManualClock,
    pub options: RecordingOptions,
}

pub fn fixture(config: SessionConfig) -> Fixture {
    fixture_with_store(config, MemoryStore::new())
}

pub fn fixture_with_store(config: SessionConfig, store: MemoryStore) -> Fixture {
    let scenes = SceneRequests::new();
    let time = RecordingTime::default();
    let clock = ManualClock::default();
    let options = RecordingOptions::default();

    let session = SessionManager::new(
        config,
        default_enemy_roster(),
        Collaborators {
            store: Box::new(store.clone()),
            options: Box::new(options.clone()),
            scenes: Box::new(scenes.clone()),
            time: Box::new(time.clone()),
            clock: Box::new(clock.clone()),
        },
    );

    Fixture {
        session,
        store,
        scenes,
        time,
        clock,
        options,
    }
}
