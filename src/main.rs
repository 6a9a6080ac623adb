//! Emberdrift - Headless host
//!
//! Wires file-backed collaborators into a session and drives its lifecycle
//! hooks the way the game's engine loop does: start on the title screen,
//! load a slot, activate the requested scenes, play, then shut down.

use std::fs::OpenOptions;
use std::time::Duration;

use anyhow::{bail, Result};

use emberdrift::data::GameData;
use emberdrift::game::{format_playtime, Collaborators, GameState, SessionHost, SessionManager, SystemClock};
use emberdrift::host::{SceneRequests, TimeScale};
use emberdrift::save::{save_directory, JsonFileStore, JsonOptionsStore};

/// How long the headless session plays before quitting
const PLAY_DURATION: Duration = Duration::from_millis(1500);

fn main() -> Result<()> {
    // Initialize logging to file
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("emberdrift.log")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Emberdrift v{}", env!("CARGO_PKG_VERSION"));

    let slot: u32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 1,
    };
    if slot == 0 {
        bail!("save slots start at 1");
    }

    let data = GameData::load_from_assets();
    let dir = save_directory(data.config.save_dir.as_deref());
    let scenes = SceneRequests::new();
    let time = TimeScale::new();

    let session = SessionManager::new(
        data.config,
        data.enemies,
        Collaborators {
            store: Box::new(JsonFileStore::new(&dir)),
            options: Box::new(JsonOptionsStore::in_dir(&dir)),
            scenes: Box::new(scenes.clone()),
            time: Box::new(time.clone()),
            clock: Box::new(SystemClock),
        },
    );

    let mut host = SessionHost::new();
    host.install(session);

    let result = run_session(&mut host, &scenes, slot);

    if let Err(ref e) = result {
        log::error!("Session exited with error: {}", e);
    }
    host.shutdown()?;

    log::info!("Emberdrift shut down cleanly");
    result
}

fn run_session(host: &mut SessionHost, scenes: &SceneRequests, slot: u32) -> Result<()> {
    let Some(session) = host.session_mut() else {
        bail!("no session running");
    };

    for (slot, summary) in session.list_saves() {
        match summary {
            Some(summary) => println!("Slot {}: {} [{}]", slot, summary.scene_id, summary.play_time),
            None => println!("Slot {}: empty", slot),
        }
    }

    if session.game_state() == GameState::Title {
        session.on_scene_activated("Title");
        session.game_load(slot, true);
        session.set_game_state(GameState::Play);
    }

    // Activate requested scenes at the frame boundary
    while let Some(scene_id) = scenes.take_next() {
        session.on_scene_activated(&scene_id);
        if session.state().resurrection_scene.is_empty() {
            let spawn = session.state().player_start_position;
            session.set_resurrection_point(scene_id.clone(), spawn);
        }
        println!("Entered {}", scene_id);
    }

    session.is_started();
    std::thread::sleep(PLAY_DURATION);

    println!(
        "Played {} on slot {}",
        format_playtime(session.current_playtime_seconds()),
        session.state().active_slot
    );
    Ok(())
}
