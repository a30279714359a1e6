//! Movement rules for the player and the pursuers
//!
//! Both roles share the `Entity` shape; only the rule that picks the next
//! cell differs. Everything here is pure: the tick applies the results.

use glam::IVec2;
use rand::Rng;

use super::grid::Grid;
use super::state::Direction;
use crate::consts::MAX_PURSUER_REROLLS;

/// Outcome of resolving the player's move for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMove {
    pub pos: IVec2,
    pub vel: IVec2,
    /// Direction to remember as committed for the next tick
    pub committed: Direction,
}

impl PlayerMove {
    fn stopped(pos: IVec2) -> Self {
        Self {
            pos,
            vel: IVec2::ZERO,
            committed: Direction::None,
        }
    }
}

/// Resolve the player's move.
///
/// Holding the committed direction moves until a wall, then stops. A turn
/// only succeeds if the next cell in the new direction is open; otherwise
/// the player keeps going the old way, or stops if that is blocked too.
pub fn resolve_player_move(
    grid: &Grid,
    pos: IVec2,
    committed: Direction,
    requested: Direction,
) -> PlayerMove {
    let candidate = grid.wrap(pos + requested.velocity());

    if requested == committed {
        if grid.is_blocked(candidate) {
            return PlayerMove::stopped(pos);
        }
        return PlayerMove {
            pos: candidate,
            vel: requested.velocity(),
            committed,
        };
    }

    if !grid.is_blocked(candidate) {
        return PlayerMove {
            pos: candidate,
            vel: requested.velocity(),
            committed: requested,
        };
    }

    // Turn blocked: keep momentum if the old heading is open
    let fallback = grid.wrap(pos + committed.velocity());
    if grid.is_blocked(fallback) {
        PlayerMove::stopped(pos)
    } else {
        PlayerMove {
            pos: fallback,
            vel: committed.velocity(),
            committed,
        }
    }
}

/// Velocity a pursuer wants this tick.
///
/// Sharing a column or row with the player means heading straight at them
/// (or straight away in power mode). Otherwise the current velocity holds.
pub fn pursuer_heading(pos: IVec2, vel: IVec2, player: IVec2, power_mode: bool) -> IVec2 {
    let toward = if pos.x == player.x {
        if pos.y > player.y {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if pos.y == player.y {
        if pos.x > player.x {
            Direction::Left
        } else {
            Direction::Right
        }
    } else {
        return vel;
    };

    if power_mode {
        toward.opposite().velocity()
    } else {
        toward.velocity()
    }
}

/// Resolve a pursuer's move, returning the new `(pos, vel)`.
///
/// Blocked headings are replaced by uniformly random directions until an
/// open cell is found. Returns `None` if `MAX_PURSUER_REROLLS` picks all
/// hit walls; the pursuer should then stay where it is.
pub fn resolve_pursuer_move<R: Rng>(
    grid: &Grid,
    pos: IVec2,
    vel: IVec2,
    player: IVec2,
    power_mode: bool,
    rng: &mut R,
) -> Option<(IVec2, IVec2)> {
    let mut vel = pursuer_heading(pos, vel, player, power_mode);
    let mut candidate = grid.wrap(pos + vel);
    let mut rerolls = 0;

    while grid.is_blocked(candidate) {
        if rerolls == MAX_PURSUER_REROLLS {
            return None;
        }
        rerolls += 1;
        vel = Direction::from_index(rng.random_range(0..4)).velocity();
        candidate = grid.wrap(pos + vel);
    }

    Some((candidate, vel))
}
