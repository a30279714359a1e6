//! Idle/demo input source
//!
//! Plays the game from a snapshot: head for the nearest dot, but step away
//! from a pursuer that shares the player's row or column and is close. In
//! power mode it chases pursuers instead.

use std::collections::VecDeque;

use glam::IVec2;

use crate::sim::{Direction, GameState, Grid};

/// Pursuers closer than this on a shared line are treated as a threat
pub const DANGER_DISTANCE: i32 = 3;

/// Direction picker for demo runs
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Direction returned last time (kept when nothing better is found)
    last: Direction,
}

impl Autopilot {
    /// Pick the direction to feed into the next tick
    pub fn choose(&mut self, state: &GameState) -> Direction {
        let player = state.player.pos;
        let grid = &state.grid;

        let choice = if state.power_mode {
            let targets: Vec<IVec2> = state.pursuers.iter().map(|p| p.pos).collect();
            first_step_toward(grid, player, |pos| targets.contains(&pos))
        } else if let Some(threat) = nearest_threat(state) {
            flee_direction(grid, player, threat)
        } else {
            None
        };

        let choice = choice
            .or_else(|| first_step_toward(grid, player, |pos| grid.get(pos).is_some_and(|c| c.is_dot())))
            .unwrap_or(self.last);
        self.last = choice;
        choice
    }
}

/// Closest pursuer on the player's row or column within `DANGER_DISTANCE`
fn nearest_threat(state: &GameState) -> Option<IVec2> {
    let player = state.player.pos;
    state
        .pursuers
        .iter()
        .map(|p| p.pos)
        .filter(|pos| pos.x == player.x || pos.y == player.y)
        .filter(|pos| (*pos - player).abs().element_sum() <= DANGER_DISTANCE)
        .min_by_key(|pos| (*pos - player).abs().element_sum())
}

/// An open direction that does not lead toward `threat`
fn flee_direction(grid: &Grid, player: IVec2, threat: IVec2) -> Option<Direction> {
    let toward = (threat - player).signum();
    Direction::MOVING
        .iter()
        .copied()
        .filter(|dir| dir.velocity() != toward)
        .filter(|dir| !grid.is_blocked(grid.wrap(player + dir.velocity())))
        .max_by_key(|dir| {
            let next = grid.wrap(player + dir.velocity());
            (next - threat).abs().element_sum()
        })
}

/// First move of a shortest path to any cell matching `is_goal`
fn first_step_toward<F>(grid: &Grid, start: IVec2, is_goal: F) -> Option<Direction>
where
    F: Fn(IVec2) -> bool,
{
    let mut visited = vec![false; grid.rows() * grid.columns()];
    let index = |pos: IVec2| pos.y as usize * grid.columns() + pos.x as usize;
    let mut queue = VecDeque::new();

    visited[index(start)] = true;
    for dir in Direction::MOVING {
        let next = grid.wrap(start + dir.velocity());
        if !grid.is_blocked(next) && !visited[index(next)] {
            visited[index(next)] = true;
            queue.push_back((next, dir));
        }
    }

    while let Some((pos, first)) = queue.pop_front() {
        if is_goal(pos) {
            return Some(first);
        }
        for dir in Direction::MOVING {
            let next = grid.wrap(pos + dir.velocity());
            if !grid.is_blocked(next) && !visited[index(next)] {
                visited[index(next)] = true;
                queue.push_back((next, first));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parse_level;

    #[test]
    fn test_heads_for_nearest_dot() {
        let state = GameState::new(
            parse_level("W W W W W\nE E P E S\nW W W W W\n1 W E W 2\n").expect("valid"),
        );
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.choose(&state), Direction::Right);
    }

    #[test]
    fn test_dot_across_wraparound() {
        let state = GameState::new(
            parse_level("W W W W W W\nE P E E E S\nW W W W W W\n1 W E E W 2\n").expect("valid"),
        );
        let mut pilot = Autopilot::default();
        // Two steps left through the edge beats four steps right
        assert_eq!(pilot.choose(&state), Direction::Left);
    }

    #[test]
    fn test_flees_close_pursuer() {
        let mut state = GameState::new(
            parse_level("W W W W W W\nS E P E E S\nW W W W W W\n1 W E E W 2\n").expect("valid"),
        );
        state.pursuers[0].pos = IVec2::new(3, 1);
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.choose(&state), Direction::Left);
    }

    #[test]
    fn test_chases_in_power_mode() {
        let mut state = GameState::new(
            parse_level("W W W W W W\nS E P E E S\nW W W W W W\n1 W E E W 2\n").expect("valid"),
        );
        state.pursuers[0].pos = IVec2::new(4, 1);
        state.power_mode = true;
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.choose(&state), Direction::Right);
    }
}
