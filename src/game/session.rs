//! Session manager
//!
//! Owns the live `SessionState`, drives state transitions, and orchestrates
//! saving and loading through the persistence store. The host loop calls the
//! lifecycle hooks (`on_init`, `on_scene_activated`, `on_shutdown`).

use thiserror::Error;

use crate::data::{EnemyRoster, SessionConfig};
use crate::host::{SceneLoader, TimeControl};
use crate::save::{GameOptions, OptionsStore, PersistenceStore, SaveError, SaveRecord, SaveSummary};
use crate::world::{DiscoveredMaps, EnemyDefeatRegistry, LearnedSkills, SeenTutorials};

use super::events::{DeathObservers, ObserverId};
use super::state::{GameState, SessionState, Vec2};
use super::time::{elapsed_whole_seconds, Clock};

/// External services the session talks to
pub struct Collaborators {
    pub store: Box<dyn PersistenceStore>,
    pub options: Box<dyn OptionsStore>,
    pub scenes: Box<dyn SceneLoader>,
    pub time: Box<dyn TimeControl>,
    pub clock: Box<dyn Clock>,
}

/// What `game_load` found in the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot was empty; the starting scene was requested
    NewGame,
    /// The slot's save was applied
    Restored,
}

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Save failed: {0}")]
    Save(#[from] SaveError),
    #[error("Failed to persist options: {0}")]
    Options(#[source] SaveError),
}

/// The current play session
pub struct SessionManager {
    config: SessionConfig,
    state: SessionState,
    options: GameOptions,
    defeats: EnemyDefeatRegistry,
    maps: DiscoveredMaps,
    skills: LearnedSkills,
    tutorials: SeenTutorials,
    death_observers: DeathObservers,
    store: Box<dyn PersistenceStore>,
    options_store: Box<dyn OptionsStore>,
    scenes: Box<dyn SceneLoader>,
    time: Box<dyn TimeControl>,
    clock: Box<dyn Clock>,
}

impl SessionManager {
    /// Create a session in the configured initial state
    pub fn new(config: SessionConfig, roster: EnemyRoster, collaborators: Collaborators) -> Self {
        let Collaborators { store, options, scenes, time, clock } = collaborators;
        Self {
            state: SessionState::with_game_state(config.initial_state),
            config,
            options: GameOptions::default(),
            defeats: EnemyDefeatRegistry::new(roster),
            maps: DiscoveredMaps::new(),
            skills: LearnedSkills::new(),
            tutorials: SeenTutorials::new(),
            death_observers: DeathObservers::new(),
            store,
            options_store: options,
            scenes,
            time,
            clock,
        }
    }

    /// Startup hook: load options, then auto-load the configured slot when
    /// starting straight into play
    pub fn on_init(&mut self) {
        self.options = self.options_store.load();
        log::info!(
            "Session initialized in {:?} ({} enemies in roster)",
            self.state.game_state,
            self.defeats.roster().entries.len()
        );

        if let Some(slot) = self.config.auto_load_slot_on_start {
            if self.state.game_state == GameState::Play {
                log::info!("Auto-loading slot {}", slot);
                self.game_load(slot, true);
            }
        }
    }

    /// Scene activation hook
    ///
    /// Activating any scene while on the title screen resets the session.
    /// Death listeners are always dropped.
    pub fn on_scene_activated(&mut self, scene_id: &str) {
        log::debug!("Scene activated: {} ({:?})", scene_id, self.state.game_state);
        if self.state.game_state == GameState::Title {
            self.state.reset();
        }
        self.death_observers.clear();
    }

    /// Shutdown hook: save unless on the title screen, then persist options
    ///
    /// Options are written even when the save fails; the save error is
    /// returned afterwards.
    pub fn on_shutdown(&mut self) -> Result<(), SessionError> {
        let saved = if self.state.game_state != GameState::Title {
            self.game_save().map_err(SessionError::from)
        } else {
            Ok(())
        };
        if let Err(e) = &saved {
            log::error!("Shutdown save failed: {}", e);
        }

        self.options_store
            .save(&self.options)
            .map_err(SessionError::Options)?;
        saved
    }

    pub fn game_state(&self) -> GameState {
        self.state.game_state
    }

    /// Switch game state, stopping world time while the menu is open
    pub fn set_game_state(&mut self, new_state: GameState) {
        match new_state {
            GameState::Play => self.time.cancel_time_stop(),
            GameState::MenuOpen => self.time.start_time_stop(),
            GameState::Title => {}
        }
        log::debug!("State transition: {:?} -> {:?}", self.state.game_state, new_state);
        self.state.game_state = new_state;
    }

    /// One-shot start latch
    ///
    /// The first call after a reset records the session start time and
    /// returns true; later calls return false until the next title reset.
    pub fn is_started(&mut self) -> bool {
        if !self.state.session_start_pending {
            return false;
        }
        self.state.session_start_pending = false;
        self.state.session_started_at = self.clock.now();
        log::debug!("Session started at {:.3}", self.state.session_started_at);
        true
    }

    /// Total playtime: the loaded save's playtime plus whole seconds since
    /// the session started
    pub fn current_playtime_seconds(&self) -> u64 {
        let elapsed = if self.state.session_start_pending {
            0
        } else {
            elapsed_whole_seconds(self.state.session_started_at, self.clock.now())
        };
        self.state.accumulated_playtime_secs + elapsed
    }

    /// Subscribe to player deaths until the next scene activation
    pub fn on_player_death(&mut self, listener: impl FnMut() + 'static) -> ObserverId {
        self.death_observers.subscribe(listener)
    }

    pub fn remove_death_listener(&mut self, id: ObserverId) -> bool {
        self.death_observers.unsubscribe(id)
    }

    pub fn death_listener_count(&self) -> usize {
        self.death_observers.len()
    }

    /// Send the player back to the resurrection point and notify listeners
    pub fn handle_player_death(&mut self) {
        self.state.player_start_position = self.state.resurrection_position;
        self.defeats.clear_transient();
        let notified = self.death_observers.notify();
        log::info!(
            "Player died, respawning in {} ({} listeners notified)",
            self.state.resurrection_scene,
            notified
        );
    }

    /// Snapshot the session into a save record
    pub fn build_save_record(&self) -> SaveRecord {
        let mut record = SaveRecord::new(
            self.state.resurrection_scene.clone(),
            self.state.resurrection_position,
        );
        record.play_time_seconds = self.current_playtime_seconds();
        record.learned_skills = self.skills.flags().clone();
        record.discovered_maps = self.maps.cells().clone();
        record.defeated_boss_ids = self.defeats.defeated_boss_ids().clone();
        record.seen_tutorial_ids = self.tutorials.ids().clone();
        record
    }

    /// Write the session to the active slot, replacing any existing save
    pub fn game_save(&mut self) -> Result<(), SaveError> {
        let record = self.build_save_record();
        self.store.write(self.state.active_slot, &record)?;
        log::info!(
            "Saved slot {} at {} ({}s played)",
            self.state.active_slot,
            record.scene_id,
            record.play_time_seconds
        );
        Ok(())
    }

    /// Load a slot and make it the active slot
    ///
    /// An empty slot starts a new game at the starting scene and leaves the
    /// rest of the session untouched. A slot that cannot be read is treated
    /// the same way. Registry updates are merged into what is already
    /// tracked.
    pub fn game_load(&mut self, slot: u32, do_scene_transition: bool) -> LoadOutcome {
        let record = match self.store.read(slot) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Failed to read slot {}: {}, starting new game", slot, e);
                None
            }
        };
        self.state.active_slot = slot;

        let Some(record) = record else {
            log::info!("Slot {} is empty, starting new game", slot);
            self.scenes.load_scene(&self.config.starting_scene);
            return LoadOutcome::NewGame;
        };

        self.state.accumulated_playtime_secs = record.play_time_seconds;
        self.state.resurrection_scene = record.scene_id.clone();
        self.state.resurrection_position = record.player_position;

        self.maps.extend(record.discovered_maps.iter().copied());
        self.skills.extend(record.learned_skills.iter().copied());
        self.defeats.add_defeated_bosses(record.defeated_boss_ids.iter().cloned());
        self.tutorials.extend(record.seen_tutorial_ids.iter().cloned());
        self.state.is_first_start = false;

        if do_scene_transition {
            self.state.player_start_position = record.player_position;
            self.scenes.load_scene(&record.scene_id);
        }

        log::info!("Loaded slot {} ({})", slot, record.scene_id);
        LoadOutcome::Restored
    }

    /// Summaries for every configured slot, `None` for empty or unreadable slots
    pub fn list_saves(&self) -> Vec<(u32, Option<SaveSummary>)> {
        (1..=self.config.slot_count)
            .map(|slot| {
                let summary = if self.store.exists(slot) {
                    self.store.read(slot).ok().flatten().map(|record| record.summary())
                } else {
                    None
                };
                (slot, summary)
            })
            .collect()
    }

    pub fn has_save(&self, slot: u32) -> bool {
        self.store.exists(slot)
    }

    pub fn delete_save(&mut self, slot: u32) -> Result<(), SaveError> {
        self.store.delete(slot)
    }

    /// Set the scene and position the player returns to after death
    pub fn set_resurrection_point(&mut self, scene_id: impl Into<String>, position: Vec2) {
        self.state.resurrection_scene = scene_id.into();
        self.state.resurrection_position = position;
    }

    /// Set where and facing which way the player spawns next
    pub fn set_player_start(&mut self, position: Vec2, facing: f32) {
        self.state.player_start_position = position;
        self.state.player_start_facing = facing;
    }

    pub fn set_player_health(&mut self, health: i32) {
        self.state.player_health = health;
    }

    pub fn set_player_driving_force(&mut self, driving_force: i32) {
        self.state.player_driving_force = driving_force;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut GameOptions {
        &mut self.options
    }

    pub fn defeats(&self) -> &EnemyDefeatRegistry {
        &self.defeats
    }

    pub fn defeats_mut(&mut self) -> &mut EnemyDefeatRegistry {
        &mut self.defeats
    }

    pub fn maps(&self) -> &DiscoveredMaps {
        &self.maps
    }

    pub fn maps_mut(&mut self) -> &mut DiscoveredMaps {
        &mut self.maps
    }

    pub fn skills(&self) -> &LearnedSkills {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut LearnedSkills {
        &mut self.skills
    }

    pub fn tutorials(&self) -> &SeenTutorials {
        &self.tutorials
    }

    pub fn tutorials_mut(&mut self) -> &mut SeenTutorials {
        &mut self.tutorials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::{fixture, fixture_with_store, TimeCall};
    use crate::save::MemoryStore;
    use crate::world::{Ability, MapCoord};
    use std::cell::Cell;
    use std::rc::Rc;

    fn play_config() -> SessionConfig {
        SessionConfig {
            initial_state: GameState::Play,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_menu_then_play_stops_then_resumes_time() {
        let mut f = fixture(SessionConfig::default());
        f.session.set_game_state(GameState::MenuOpen);
        f.session.set_game_state(GameState::Play);

        assert_eq!(f.time.calls(), vec![TimeCall::Start, TimeCall::Cancel]);
        assert_eq!(f.session.game_state(), GameState::Play);
    }

    #[test]
    fn test_title_transition_has_no_time_side_effect() {
        let mut f = fixture(play_config());
        f.session.set_game_state(GameState::Title);
        assert!(f.time.calls().is_empty());
        assert_eq!(f.session.game_state(), GameState::Title);
    }

    #[test]
    fn test_is_started_fires_once_per_reset() {
        let mut f = fixture(SessionConfig::default());
        f.clock.set(50.0);

        assert!(f.session.is_started());
        assert_eq!(f.session.state().session_started_at, 50.0);
        assert!(!f.session.is_started());

        // Non-title scene loads do not re-arm the latch
        f.session.set_game_state(GameState::Play);
        f.session.on_scene_activated("Foundry");
        assert!(!f.session.is_started());

        f.session.set_game_state(GameState::Title);
        f.session.on_scene_activated("Title");
        f.clock.set(80.0);
        assert!(f.session.is_started());
        assert_eq!(f.session.state().session_started_at, 80.0);
        assert!(!f.session.is_started());
    }

    #[test]
    fn test_load_empty_slot_starts_new_game() {
        let mut f = fixture(play_config());
        f.session.set_player_health(5);
        f.session.set_player_driving_force(2);

        let outcome = f.session.game_load(2, true);

        assert_eq!(outcome, LoadOutcome::NewGame);
        assert_eq!(f.scenes.pending(), vec!["Prologue"]);
        assert_eq!(f.session.state().active_slot, 2);
        assert_eq!(f.session.state().player_health, 5);
        assert_eq!(f.session.state().player_driving_force, 2);
        assert!(f.session.state().is_first_start);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut f = fixture(play_config());
        f.clock.set(100.0);
        assert!(f.session.is_started());

        f.session.set_resurrection_point("Foundry", Vec2::new(14.0, 2.5));
        f.session.skills_mut().learn(Ability::Dash);
        f.session.maps_mut().discover(MapCoord::new(3, 4));
        f.session.defeats_mut().record_defeat("cinder_warden");
        f.session.tutorials_mut().mark_seen("dash");

        f.clock.set(161.4);
        f.session.game_save().unwrap();
        assert_eq!(f.store.len(), 1);

        // Wander off and forget everything
        f.session.set_resurrection_point("Spire", Vec2::ZERO);
        f.session.skills_mut().clear();
        f.session.maps_mut().clear();
        f.session.defeats_mut().clear();
        f.session.tutorials_mut().clear();

        let outcome = f.session.game_load(1, true);

        let state = f.session.state();
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(state.accumulated_playtime_secs, 62);
        assert_eq!(state.resurrection_scene, "Foundry");
        assert_eq!(state.resurrection_position, Vec2::new(14.0, 2.5));
        assert_eq!(state.player_start_position, Vec2::new(14.0, 2.5));
        assert!(!state.is_first_start);
        assert!(f.session.skills().has(Ability::Dash));
        assert!(f.session.maps().is_discovered(MapCoord::new(3, 4)));
        assert!(f.session.defeats().is_defeated("cinder_warden"));
        assert!(f.session.tutorials().has_seen("dash"));
        assert_eq!(f.scenes.pending(), vec!["Foundry"]);
    }

    #[test]
    fn test_load_without_scene_transition() {
        let mut store = MemoryStore::new();
        store.write(3, &SaveRecord::new("Spire", Vec2::new(1.0, 1.0))).unwrap();
        let mut f = fixture_with_store(play_config(), store);
        f.session.set_player_start(Vec2::new(9.0, 9.0), -1.0);

        assert_eq!(f.session.game_load(3, false), LoadOutcome::Restored);

        assert!(f.scenes.is_empty());
        assert_eq!(f.session.state().player_start_position, Vec2::new(9.0, 9.0));
        assert_eq!(f.session.state().resurrection_scene, "Spire");
        assert_eq!(f.session.state().active_slot, 3);
    }

    #[test]
    fn test_repeated_loads_do_not_double_count() {
        let mut store = MemoryStore::new();
        let mut record = SaveRecord::new("Foundry", Vec2::ZERO);
        record.discovered_maps.insert(MapCoord::new(0, 0));
        record.discovered_maps.insert(MapCoord::new(1, 0));
        record.defeated_boss_ids.insert("hollow_engine".to_string());
        record.seen_tutorial_ids.insert("jump".to_string());
        store.write(1, &record).unwrap();
        let mut f = fixture_with_store(play_config(), store);

        f.session.game_load(1, false);
        f.session.game_load(1, false);

        assert_eq!(f.session.maps().len(), 2);
        assert_eq!(f.session.defeats().defeated_boss_ids().len(), 1);
        assert_eq!(f.session.tutorials().ids().len(), 1);
    }

    #[test]
    fn test_load_merges_into_existing_registries() {
        let mut store = MemoryStore::new();
        let mut record = SaveRecord::new("Foundry", Vec2::ZERO);
        record.discovered_maps.insert(MapCoord::new(5, 5));
        store.write(1, &record).unwrap();
        let mut f = fixture_with_store(play_config(), store);
        f.session.maps_mut().discover(MapCoord::new(0, 0));

        f.session.game_load(1, false);

        assert!(f.session.maps().is_discovered(MapCoord::new(0, 0)));
        assert!(f.session.maps().is_discovered(MapCoord::new(5, 5)));
    }

    #[test]
    fn test_unreadable_slot_starts_new_game() {
        struct BrokenStore;

        impl PersistenceStore for BrokenStore {
            fn write(&mut self, _slot: u32, _record: &SaveRecord) -> Result<(), SaveError> {
                Err(SaveError::IoError(std::io::Error::other("disk full")))
            }

            fn read(&self, _slot: u32) -> Result<Option<SaveRecord>, SaveError> {
                Err(SaveError::IoError(std::io::Error::other("unreadable")))
            }

            fn exists(&self, _slot: u32) -> bool {
                true
            }

            fn delete(&mut self, _slot: u32) -> Result<(), SaveError> {
                Ok(())
            }
        }

        let mut f = fixture(play_config());
        f.session.store = Box::new(BrokenStore);

        assert_eq!(f.session.game_load(1, true), LoadOutcome::NewGame);
        assert_eq!(f.scenes.pending(), vec!["Prologue"]);
        assert!(f.session.game_save().is_err());
        assert_eq!(f.session.list_saves()[0], (1, None));
    }

    #[test]
    fn test_save_to_slot_zero_is_rejected() {
        let mut f = fixture(play_config());
        f.session.game_load(0, false);
        assert!(matches!(f.session.game_save(), Err(SaveError::InvalidSlot(0))));
        assert!(f.store.is_empty());
    }

    #[test]
    fn test_playtime_before_start_counts_only_accumulated() {
        let mut store = MemoryStore::new();
        let mut record = SaveRecord::new("Foundry", Vec2::ZERO);
        record.play_time_seconds = 600;
        store.write(1, &record).unwrap();
        let mut f = fixture_with_store(play_config(), store);
        f.clock.set(1_000_000.0);

        f.session.game_load(1, false);
        assert_eq!(f.session.current_playtime_seconds(), 600);

        assert!(f.session.is_started());
        f.clock.set(1_000_010.0);
        assert_eq!(f.session.current_playtime_seconds(), 610);
    }

    #[test]
    fn test_player_death_respawns_and_notifies() {
        let mut f = fixture(play_config());
        let deaths = Rc::new(Cell::new(0));
        let counter = Rc::clone(&deaths);
        f.session.on_player_death(move || counter.set(counter.get() + 1));

        f.session.set_resurrection_point("Foundry", Vec2::new(3.0, 1.0));
        f.session.set_player_start(Vec2::new(40.0, 8.0), 1.0);
        f.session.defeats_mut().record_defeat("scrap_crawler");
        f.session.defeats_mut().record_defeat("cinder_warden");

        f.session.handle_player_death();

        assert_eq!(deaths.get(), 1);
        assert_eq!(f.session.state().player_start_position, Vec2::new(3.0, 1.0));
        assert!(!f.session.defeats().is_defeated("scrap_crawler"));
        assert!(f.session.defeats().is_defeated("cinder_warden"));
    }

    #[test]
    fn test_scene_activation_clears_death_listeners() {
        let mut f = fixture(play_config());
        let deaths = Rc::new(Cell::new(0));
        let counter = Rc::clone(&deaths);
        f.session.on_player_death(move || counter.set(counter.get() + 1));
        f.session.set_player_health(4);

        f.session.on_scene_activated("Foundry");
        assert_eq!(f.session.death_listener_count(), 0);
        f.session.handle_player_death();

        assert_eq!(deaths.get(), 0);
        // Not on the title screen, so nothing was reset
        assert_eq!(f.session.state().player_health, 4);
    }

    #[test]
    fn test_title_scene_activation_resets_session() {
        let mut f = fixture(play_config());
        f.session.game_load(2, false);
        f.session.set_player_health(4);
        f.session.set_player_driving_force(9);
        f.session.set_resurrection_point("Foundry", Vec2::new(1.0, 2.0));
        f.session.is_started();
        f.session.on_player_death(|| {});

        f.session.set_game_state(GameState::Title);
        f.session.on_scene_activated("Title");

        assert_eq!(*f.session.state(), SessionState::default());
        assert_eq!(f.session.death_listener_count(), 0);
    }

    #[test]
    fn test_shutdown_in_play_saves_and_persists_options() {
        let mut f = fixture(play_config());
        f.session.on_init();
        f.session.options_mut().screen_shake = false;

        f.session.on_shutdown().unwrap();

        assert!(f.store.exists(1));
        let saved = f.options.saved();
        assert_eq!(saved.len(), 1);
        assert!(!saved[0].screen_shake);
    }

    #[test]
    fn test_shutdown_on_title_only_persists_options() {
        let mut f = fixture(SessionConfig::default());
        f.session.on_shutdown().unwrap();
        assert!(f.store.is_empty());
        assert_eq!(f.options.saved().len(), 1);
    }

    #[test]
    fn test_shutdown_persists_options_even_if_save_fails() {
        let mut f = fixture(play_config());
        f.session.game_load(0, false);

        let result = f.session.on_shutdown();

        assert!(matches!(result, Err(SessionError::Save(SaveError::InvalidSlot(0)))));
        assert_eq!(f.options.saved().len(), 1);
    }

    #[test]
    fn test_init_auto_loads_slot_when_starting_in_play() {
        let mut store = MemoryStore::new();
        store.write(1, &SaveRecord::new("Foundry", Vec2::new(2.0, 0.0))).unwrap();
        let config = SessionConfig {
            auto_load_slot_on_start: Some(1),
            ..play_config()
        };
        let mut f = fixture_with_store(config, store);

        f.session.on_init();

        assert_eq!(f.scenes.pending(), vec!["Foundry"]);
        assert!(!f.session.state().is_first_start);
    }

    #[test]
    fn test_init_ignores_auto_load_on_title() {
        let config = SessionConfig {
            auto_load_slot_on_start: Some(1),
            ..SessionConfig::default()
        };
        let mut f = fixture(config);
        f.session.on_init();
        assert!(f.scenes.is_empty());
    }

    #[test]
    fn test_list_and_delete_saves() {
        let mut store = MemoryStore::new();
        let mut record = SaveRecord::new("Foundry", Vec2::ZERO);
        record.play_time_seconds = 3661;
        store.write(2, &record).unwrap();
        let mut f = fixture_with_store(SessionConfig::default(), store);

        let saves = f.session.list_saves();
        assert_eq!(saves.len(), 3);
        assert_eq!(saves[0], (1, None));
        assert_eq!(saves[1].1.as_ref().map(|s| s.play_time.as_str()), Some("1:01:01"));
        assert_eq!(saves[2], (3, None));

        assert!(f.session.has_save(2));
        f.session.delete_save(2).unwrap();
        assert!(!f.session.has_save(2));
    }
}
