//! Fixed-rate simulation tick
//!
//! Core game loop that advances the state by one discrete frame. The order
//! of the phases below is part of the game's behavior.

use glam::IVec2;
use rand::Rng;

use super::grid::Cell;
use super::movement::{resolve_player_move, resolve_pursuer_move};
use super::state::{Direction, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::level::LevelSet;

/// Advance the game state by one tick.
///
/// `levels` supplies the next layout when the current one runs out of dots;
/// `rng` drives pursuer re-rolls off walls. Terminal states are left
/// untouched.
pub fn tick<R: Rng>(state: &mut GameState, levels: &LevelSet, input: Direction, rng: &mut R) {
    state.events.clear();
    if state.phase.is_terminal() {
        return;
    }
    state.time_ticks += 1;

    // 1. Player movement
    state.pending_direction = input;
    let step = resolve_player_move(&state.grid, state.player.pos, state.last_direction, input);
    state.player.pos = step.pos;
    state.player.vel = step.vel;
    state.last_direction = step.committed;

    // 2. Dots
    eat_dot(state);

    // 3. Collisions before the pursuers move
    resolve_collisions(state);

    // 4. Pursuer movement
    move_pursuers(state, rng);

    // 5. Collisions again; the two entities can swap cells in one tick
    resolve_collisions(state);

    // 6. Level progression
    if state.remaining_dots == 0 && state.phase == GamePhase::Playing {
        state.player.vel = IVec2::ZERO;
        advance_level(state, levels);
        return;
    }

    // 7. Power mode countdown
    if state.power_mode {
        state.power_ticks_remaining = state.power_ticks_remaining.saturating_sub(1);
        if state.power_ticks_remaining == 0 {
            state.power_mode = false;
            state.events.push(GameEvent::PowerModeEnded);
            log::debug!("Power mode ended at tick {}", state.time_ticks);
        }
    }
}

/// Eat whatever dot is under the player. A big dot starts power mode or
/// resets its counter; the countdown later in the same tick still applies.
fn eat_dot(state: &mut GameState) {
    let pos = state.player.pos;
    let big = match state.grid.get(pos) {
        Some(Cell::SmallDot) => false,
        Some(Cell::BigDot) => true,
        _ => return,
    };

    state.grid.set(pos, Cell::Empty);
    state.remaining_dots = state.remaining_dots.saturating_sub(1);
    state.events.push(GameEvent::DotEaten { big });

    if !big {
        state.score += SMALL_DOT_POINTS;
        return;
    }

    state.score += BIG_DOT_POINTS;
    if !state.power_mode {
        log::debug!("Power mode started at tick {}", state.time_ticks);
    }
    state.power_mode = true;
    state.power_ticks_remaining = POWER_MODE_TICKS;
    state.events.push(GameEvent::PowerModeStarted);
}

/// Check each pursuer against the player's cell
fn resolve_collisions(state: &mut GameState) {
    let player = state.player.pos;
    for i in 0..state.pursuers.len() {
        if state.pursuers[i].pos != player {
            continue;
        }
        let role = state.pursuers[i].role;
        if state.power_mode {
            state.pursuers[i].send_home();
            state.score += PURSUER_CATCH_POINTS;
            state.events.push(GameEvent::PursuerCaught { role });
            log::debug!("{:?} caught and sent home", role);
        } else {
            state.player.vel = IVec2::ZERO;
            state.events.push(GameEvent::PlayerCaught { role });
            if state.phase != GamePhase::GameOver {
                state.phase = GamePhase::GameOver;
                log::info!("Game over: caught by {:?} (score {}, level {})", role, state.score, state.level);
            }
        }
    }
}

fn move_pursuers<R: Rng>(state: &mut GameState, rng: &mut R) {
    let player = state.player.pos;
    for pursuer in state.pursuers.iter_mut() {
        match resolve_pursuer_move(&state.grid, pursuer.pos, pursuer.vel, player, state.power_mode, rng) {
            Some((pos, vel)) => {
                pursuer.pos = pos;
                pursuer.vel = vel;
            }
            None => {
                // Velocity is kept so the next tick tries the same heading first
                log::warn!(
                    "{:?} boxed in at ({}, {}), holding position",
                    pursuer.role,
                    pursuer.row(),
                    pursuer.column()
                );
            }
        }
    }
}

/// Load the next level, or finish the game if this was the last one
fn advance_level(state: &mut GameState, levels: &LevelSet) {
    let cleared = state.level;
    state.events.push(GameEvent::LevelCleared { level: cleared });

    match levels.get(cleared as usize) {
        Some(grid) => {
            log::info!("Level {} cleared (score {})", cleared, state.score);
            state.load_level(grid.clone(), cleared + 1);
        }
        None => {
            log::info!("All {} levels cleared, final score {}", levels.len(), state.score);
            state.power_mode = false;
            state.power_ticks_remaining = 0;
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::Won);
        }
    }
}
