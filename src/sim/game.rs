//! Collaborator-facing game API
//!
//! `GameSimulation` owns the state, the level list and the seeded RNG. A
//! scheduler calls `step` once per tick; presentation reads through the
//! accessors between ticks.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::Cell;
use super::state::{Direction, GameState};
use super::tick::tick;
use crate::level::{LevelError, LevelSet};
use crate::settings::Settings;

/// A single-player game session
#[derive(Debug, Clone)]
pub struct GameSimulation {
    state: GameState,
    levels: LevelSet,
    seed: u64,
    rng: Pcg32,
}

impl GameSimulation {
    /// Start a new game on the first of `levels`
    pub fn new(levels: LevelSet, seed: u64) -> Self {
        let state = GameState::new(levels.first().clone());
        log::info!(
            "New game: {} level(s), seed {}, first grid {}x{}",
            levels.len(),
            seed,
            state.grid.rows(),
            state.grid.columns()
        );
        Self {
            state,
            levels,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build a session from runtime settings (level files or built-ins)
    pub fn from_settings(settings: &Settings) -> Result<Self, LevelError> {
        let levels = if settings.level_files.is_empty() {
            LevelSet::builtin()?
        } else {
            LevelSet::load(&settings.level_files)?
        };
        Ok(Self::new(levels, settings.resolve_seed()))
    }

    /// Replace the state with a fresh game at level 1
    pub fn new_game(&mut self) {
        self.state = GameState::new(self.levels.first().clone());
    }

    /// Same as `new_game`; valid at any point, including after game over
    pub fn restart(&mut self) {
        log::info!("Restarting (score was {}, level {})", self.state.score, self.state.level);
        self.new_game();
    }

    /// Reset the pursuer RNG to a known seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Advance one tick and return the updated state
    pub fn step(&mut self, direction: Direction) -> &GameState {
        tick(&mut self.state, &self.levels, direction, &mut self.rng);
        &self.state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.state.cell(row, column)
    }

    pub fn row_count(&self) -> usize {
        self.state.grid.rows()
    }

    pub fn column_count(&self) -> usize {
        self.state.grid.columns()
    }

    pub fn player_position(&self) -> IVec2 {
        self.state.player.pos
    }

    pub fn pursuer_positions(&self) -> [IVec2; 2] {
        self.state.pursuers.map(|p| p.pos)
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn dot_count(&self) -> u32 {
        self.state.remaining_dots
    }

    pub fn power_mode(&self) -> bool {
        self.state.power_mode
    }

    pub fn power_ticks_remaining(&self) -> u32 {
        self.state.power_ticks_remaining
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn has_won(&self) -> bool {
        self.state.has_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parse_level;
    use crate::sim::GamePhase;

    const LEVEL: &str = "\
W W W W W W W
W P S S S B W
W S W W W S W
E S S 1 S S E
W S W W W S W
W S S 2 S S W
W W W W W W W
";

    fn sim(seed: u64) -> GameSimulation {
        let levels = LevelSet::new(vec![parse_level(LEVEL).expect("valid")]).expect("non-empty");
        GameSimulation::new(levels, seed)
    }

    #[test]
    fn test_new_game_accessors() {
        let game = sim(1);
        assert_eq!(game.level(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.player_position(), IVec2::new(1, 1));
        assert_eq!(game.pursuer_positions(), [IVec2::new(3, 3), IVec2::new(3, 5)]);
        assert_eq!(game.dot_count(), 16);
        assert_eq!(game.cell(0, 0), Some(Cell::Wall));
        assert_eq!(game.row_count(), 7);
        assert_eq!(game.column_count(), 7);
        assert!(!game.power_mode());
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_restart_after_progress() {
        let mut game = sim(1);
        game.step(Direction::Right);
        assert_eq!(game.score(), 10);

        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.dot_count(), 16);
        assert_eq!(game.player_position(), IVec2::new(1, 1));
        assert_eq!(game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_seed_same_game() {
        let inputs = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];
        let mut a = sim(99);
        let mut b = sim(99);
        for &input in inputs.iter().cycle().take(60) {
            a.step(input);
            b.step(input);
        }
        assert_eq!(a.state().player, b.state().player);
        assert_eq!(a.state().pursuers, b.state().pursuers);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.state().phase, b.state().phase);
    }

    #[test]
    fn test_builtin_levels_start() {
        let game = GameSimulation::from_settings(&Settings::default()).expect("built-in levels");
        assert_eq!(game.levels().len(), 3);
        assert!(game.dot_count() > 0);
    }
}
