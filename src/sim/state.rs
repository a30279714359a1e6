//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`. Presentation code
//! only ever sees it through a shared reference between ticks.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Logical movement intent / committed heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four moving directions, in random-pick order
    pub const MOVING: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit velocity (x = column, y = row; up is toward row 0)
    pub fn velocity(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
            Direction::None => IVec2::ZERO,
        }
    }

    /// Direction for a unit velocity; anything else maps to `None`
    pub fn from_velocity(vel: IVec2) -> Self {
        match (vel.x, vel.y) {
            (0, -1) => Direction::Up,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            _ => Direction::None,
        }
    }

    /// Map an index in 0..4 to a moving direction (wraps out-of-range values)
    pub fn from_index(index: u32) -> Self {
        Self::MOVING[(index % 4) as usize]
    }

    /// Lenient key/token parsing; unrecognized input means `None`
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "up" | "w" | "k" => Direction::Up,
            "down" | "s" | "j" => Direction::Down,
            "left" | "a" | "h" => Direction::Left,
            "right" | "d" | "l" => Direction::Right,
            _ => Direction::None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// Which entity a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Pursuer1,
    Pursuer2,
}

impl Role {
    /// Home marker cell for this role
    pub fn home_cell(self) -> Cell {
        match self {
            Role::Player => Cell::PlayerHome,
            Role::Pursuer1 => Cell::Pursuer1Home,
            Role::Pursuer2 => Cell::Pursuer2Home,
        }
    }

    /// Velocity an entity of this role has when placed at home
    pub fn home_velocity(self) -> IVec2 {
        match self {
            Role::Player => IVec2::ZERO,
            Role::Pursuer1 | Role::Pursuer2 => Direction::Up.velocity(),
        }
    }
}

/// A grid-bound entity (player or pursuer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub role: Role,
    pub pos: IVec2,
    pub vel: IVec2,
    pub home: IVec2,
}

impl Entity {
    /// Entity placed at its home cell with its default velocity
    pub fn at_home(role: Role, home: IVec2) -> Self {
        Self {
            role,
            pos: home,
            vel: role.home_velocity(),
            home,
        }
    }

    /// Return to the home cell (used when a pursuer is caught)
    pub fn send_home(&mut self) {
        *self = Self::at_home(self.role, self.home);
    }

    pub fn row(&self) -> i32 {
        self.pos.y
    }

    pub fn column(&self) -> i32 {
        self.pos.x
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Player was caught outside power mode
    GameOver,
    /// Final level cleared
    Won,
}

impl GamePhase {
    /// No further ticks change the state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DotEaten { big: bool },
    PowerModeStarted,
    PowerModeEnded,
    PursuerCaught { role: Role },
    PlayerCaught { role: Role },
    LevelCleared { level: u32 },
    Won,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level grid (dots are cleared in place)
    pub grid: Grid,
    pub player: Entity,
    pub pursuers: [Entity; 2],
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Small + big dots left in `grid`
    pub remaining_dots: u32,
    pub power_mode: bool,
    pub power_ticks_remaining: u32,
    pub phase: GamePhase,
    /// Direction actually applied last tick
    pub last_direction: Direction,
    /// Most recent requested direction
    pub pending_direction: Direction,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state for the first level
    pub fn new(grid: Grid) -> Self {
        Self::for_level(grid, 1, 0)
    }

    /// Fresh state for `level`, carrying `score` over from earlier levels.
    ///
    /// Missing home markers fall back to the origin; the level parser
    /// rejects such grids before they get here.
    pub fn for_level(grid: Grid, level: u32, score: u64) -> Self {
        let home = |role: Role| grid.find(role.home_cell()).unwrap_or(IVec2::ZERO);
        let player = Entity::at_home(Role::Player, home(Role::Player));
        let pursuers = [
            Entity::at_home(Role::Pursuer1, home(Role::Pursuer1)),
            Entity::at_home(Role::Pursuer2, home(Role::Pursuer2)),
        ];
        let remaining_dots = grid.dot_count();

        Self {
            grid,
            player,
            pursuers,
            score,
            level,
            remaining_dots,
            power_mode: false,
            power_ticks_remaining: 0,
            phase: GamePhase::Playing,
            last_direction: Direction::None,
            pending_direction: Direction::None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Replace the grid and entities with the next level's layout
    pub fn load_level(&mut self, grid: Grid, level: u32) {
        let time_ticks = self.time_ticks;
        let events = std::mem::take(&mut self.events);
        *self = Self::for_level(grid, level, self.score);
        self.time_ticks = time_ticks;
        self.events = events;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn has_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Cell at (row, column)
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.grid.cell(row, column)
    }

    /// Snapshot as JSON for replay/presentation collaborators
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        use Cell::*;
        Grid::from_rows(vec![
            vec![Pursuer1Home, SmallDot, Pursuer2Home],
            vec![Empty, PlayerHome, BigDot],
        ])
    }

    #[test]
    fn test_new_state_places_entities_at_home() {
        let state = GameState::new(grid());
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_dots, 2);
        assert_eq!(state.player.pos, IVec2::new(1, 1));
        assert_eq!(state.player.vel, IVec2::ZERO);
        assert_eq!(state.pursuers[0].pos, IVec2::new(0, 0));
        assert_eq!(state.pursuers[1].pos, IVec2::new(2, 0));
        assert_eq!(state.pursuers[0].vel, Direction::Up.velocity());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_load_level_keeps_score() {
        let mut state = GameState::new(grid());
        state.score = 420;
        state.power_mode = true;
        state.power_ticks_remaining = 7;
        state.load_level(grid(), 2);
        assert_eq!(state.score, 420);
        assert_eq!(state.level, 2);
        assert!(!state.power_mode);
        assert_eq!(state.power_ticks_remaining, 0);
    }

    #[test]
    fn test_direction_mapping() {
        for dir in Direction::MOVING {
            assert_eq!(Direction::from_velocity(dir.velocity()), dir);
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::from_key("UP"), Direction::Up);
        assert_eq!(Direction::from_key("banana"), Direction::None);
        assert_eq!(Direction::from_index(7), Direction::Down);
    }

    #[test]
    fn test_send_home_resets_velocity() {
        let mut pursuer = Entity::at_home(Role::Pursuer1, IVec2::new(3, 4));
        pursuer.pos = IVec2::new(1, 1);
        pursuer.vel = IVec2::X;
        pursuer.send_home();
        assert_eq!(pursuer.pos, IVec2::new(3, 4));
        assert_eq!(pursuer.vel, IVec2::NEG_Y);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(grid());
        let json = state.to_json().expect("serialize");
        assert!(json.contains("\"level\":1"));
    }
}
