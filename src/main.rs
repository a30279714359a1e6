//! Pacgrid entry point
//!
//! Loads settings, builds the simulation and drives it at a fixed tick rate
//! with the autopilot standing in for keyboard input.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use pacgrid::renderer::render_text;
use pacgrid::settings::DEFAULT_SETTINGS_PATH;
use pacgrid::{Autopilot, GameSimulation, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pacgrid starting...");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&path);
    if !path.exists() {
        // Leave an editable copy of the defaults next to the binary
        if let Err(e) = settings.save(&path) {
            log::warn!("Could not write {}: {}", path.display(), e);
        }
    }

    let mut game = match GameSimulation::from_settings(&settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Game initialized with seed: {}", game.seed());

    let interval = settings.tick_interval();
    let mut autopilot = Autopilot::default();
    let mut next_tick = Instant::now();

    for _ in 0..settings.max_ticks {
        let direction = autopilot.choose(game.state());
        let state = game.step(direction);

        if settings.render {
            println!("{}", render_text(state));
        }
        if state.is_game_over() {
            break;
        }

        // Fixed-rate pacing; a late tick runs immediately
        next_tick += interval;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            next_tick = now;
        }
    }

    log::info!(
        "Finished: score {}, level {}, {}",
        game.score(),
        game.level(),
        if game.has_won() {
            "won"
        } else if game.is_game_over() {
            "game over"
        } else {
            "tick limit reached"
        }
    );
    match game.state().to_json() {
        Ok(json) => log::debug!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
    ExitCode::SUCCESS
}
