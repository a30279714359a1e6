//! Pacgrid - A grid-based dot-chasing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `level`: Level description parsing and the built-in level set
//! - `renderer`: Text presentation of a game snapshot
//! - `autopilot`: Snapshot-driven input source for demo runs
//! - `settings`: Runtime configuration

pub mod autopilot;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use level::{LevelError, LevelSet};
pub use settings::Settings;
pub use sim::{Direction, GameSimulation, GameState};

/// Game configuration constants
pub mod consts {
    /// Default tick rate (ticks per second)
    pub const DEFAULT_TICK_RATE_HZ: f64 = 5.0;

    /// Points for eating a small dot
    pub const SMALL_DOT_POINTS: u64 = 10;
    /// Points for eating a big dot
    pub const BIG_DOT_POINTS: u64 = 50;
    /// Points for catching a pursuer in power mode
    pub const PURSUER_CATCH_POINTS: u64 = 100;

    /// Power mode duration after eating a big dot (ticks)
    pub const POWER_MODE_TICKS: u32 = 25;

    /// Random direction picks before a wall-blocked pursuer gives up for the tick
    pub const MAX_PURSUER_REROLLS: u32 = 64;
}
