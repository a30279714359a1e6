//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick, paced externally
//! - Seeded RNG only
//! - Stable iteration order (player, then pursuer 1, then pursuer 2)
//! - No rendering or platform dependencies

pub mod game;
pub mod grid;
pub mod movement;
pub mod state;
pub mod tick;

pub use game::GameSimulation;
pub use grid::{Cell, Grid};
pub use movement::{PlayerMove, pursuer_heading, resolve_player_move, resolve_pursuer_move};
pub use state::{Direction, Entity, GameEvent, GamePhase, GameState, Role};
pub use tick::tick;
