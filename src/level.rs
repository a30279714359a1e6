//! Level description parsing
//!
//! A level is a rectangular grid of whitespace-separated single-character
//! tokens, one row per line:
//!
//! | token | cell           |
//! |-------|----------------|
//! | `W`   | wall           |
//! | `E`   | empty          |
//! | `S`   | small dot      |
//! | `B`   | big dot        |
//! | `1`   | pursuer 1 home |
//! | `2`   | pursuer 2 home |
//! | `P`   | player home    |
//!
//! Blank lines are skipped. A malformed level is a fatal configuration
//! error; nothing here tries to repair one.

use std::path::{Path, PathBuf};

use glam::IVec2;
use thiserror::Error;

use crate::sim::{Cell, Direction, Grid};

/// Levels shipped with the game, in play order
const BUILTIN_LEVELS: [&str; 3] = [
    include_str!("../levels/level1.txt"),
    include_str!("../levels/level2.txt"),
    include_str!("../levels/level3.txt"),
];

/// Why a level could not be loaded
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level has no cells")]
    Empty,
    #[error("no levels configured")]
    NoLevels,
    #[error("unknown token {token:?} at row {row}, column {column}")]
    UnknownToken {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("level is missing its {0:?} cell")]
    MissingHome(Cell),
    #[error("level has more than one {0:?} cell")]
    DuplicateHome(Cell),
    #[error("{0:?} has no open neighbouring cell")]
    TrappedPursuer(Cell),
}

fn parse_token(token: &str) -> Option<Cell> {
    match token {
        "W" => Some(Cell::Wall),
        "E" => Some(Cell::Empty),
        "S" => Some(Cell::SmallDot),
        "B" => Some(Cell::BigDot),
        "1" => Some(Cell::Pursuer1Home),
        "2" => Some(Cell::Pursuer2Home),
        "P" => Some(Cell::PlayerHome),
        _ => None,
    }
}

/// Parse and validate a level description
pub fn parse_level(text: &str) -> Result<Grid, LevelError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let row = rows.len();
        let cells = line
            .split_whitespace()
            .enumerate()
            .map(|(column, token)| {
                parse_token(token).ok_or_else(|| LevelError::UnknownToken {
                    row,
                    column,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expected = rows.first().map_or(cells.len(), Vec::len);
        if cells.len() != expected {
            return Err(LevelError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        return Err(LevelError::Empty);
    }

    let grid = Grid::from_rows(rows);
    validate(&grid)?;
    Ok(grid)
}

/// Exactly one of each home, and pursuers must be able to leave theirs
fn validate(grid: &Grid) -> Result<(), LevelError> {
    for home in [Cell::PlayerHome, Cell::Pursuer1Home, Cell::Pursuer2Home] {
        match grid.count(home) {
            0 => return Err(LevelError::MissingHome(home)),
            1 => {}
            _ => return Err(LevelError::DuplicateHome(home)),
        }
    }

    for home in [Cell::Pursuer1Home, Cell::Pursuer2Home] {
        let pos = grid.find(home).ok_or(LevelError::MissingHome(home))?;
        if !has_open_neighbour(grid, pos) {
            return Err(LevelError::TrappedPursuer(home));
        }
    }
    Ok(())
}

fn has_open_neighbour(grid: &Grid, pos: IVec2) -> bool {
    Direction::MOVING
        .iter()
        .any(|dir| !grid.is_blocked(grid.wrap(pos + dir.velocity())))
}

/// Read and parse a level file
pub fn load_level(path: &Path) -> Result<Grid, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_level(&text)?;
    log::debug!(
        "Loaded level {} ({}x{}, {} dots)",
        path.display(),
        grid.rows(),
        grid.columns(),
        grid.dot_count()
    );
    Ok(grid)
}

/// Ordered, non-empty list of level layouts
#[derive(Debug, Clone)]
pub struct LevelSet {
    grids: Vec<Grid>,
}

impl LevelSet {
    pub fn new(grids: Vec<Grid>) -> Result<Self, LevelError> {
        if grids.is_empty() {
            return Err(LevelError::NoLevels);
        }
        Ok(Self { grids })
    }

    /// The levels compiled into the binary
    pub fn builtin() -> Result<Self, LevelError> {
        let grids = BUILTIN_LEVELS
            .iter()
            .map(|text| parse_level(text))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(grids)
    }

    /// Load levels from files, in the given order
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, LevelError> {
        let grids = paths
            .iter()
            .map(|p| load_level(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} level file(s)", grids.len());
        Self::new(grids)
    }

    /// Layout for level `index` (0-based)
    pub fn get(&self, index: usize) -> Option<&Grid> {
        self.grids.get(index)
    }

    pub fn first(&self) -> &Grid {
        &self.grids[0]
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_level() {
        let grid = parse_level("P S B\nW E 1\n2 E E\n").expect("valid");
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.cell(0, 2), Some(Cell::BigDot));
        assert_eq!(grid.cell(1, 0), Some(Cell::Wall));
        assert_eq!(grid.dot_count(), 2);
    }

    #[test]
    fn test_blank_lines_and_extra_spaces() {
        let grid = parse_level("\n  P   S  1\n\n2 E E \n").expect("valid");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_level("P S 1\n2 E\n").unwrap_err();
        assert!(matches!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = parse_level("P X 1 2\n").unwrap_err();
        assert!(matches!(err, LevelError::UnknownToken { row: 0, column: 1, .. }));
    }

    #[test]
    fn test_home_counts_checked() {
        assert!(matches!(
            parse_level("S S 1 2\n").unwrap_err(),
            LevelError::MissingHome(Cell::PlayerHome)
        ));
        assert!(matches!(
            parse_level("P P 1 2\n").unwrap_err(),
            LevelError::DuplicateHome(Cell::PlayerHome)
        ));
        assert!(matches!(parse_level("\n\n").unwrap_err(), LevelError::Empty));
    }

    #[test]
    fn test_walled_in_pursuer_rejected() {
        let err = parse_level("W W W\nW 1 W\nW W W\nP E 2\n").unwrap_err();
        assert!(matches!(err, LevelError::TrappedPursuer(Cell::Pursuer1Home)));
    }

    #[test]
    fn test_builtin_levels_are_valid() {
        let levels = LevelSet::builtin().expect("built-in levels parse");
        assert_eq!(levels.len(), 3);
        for i in 0..levels.len() {
            let grid = levels.get(i).expect("level present");
            assert!(grid.dot_count() > 0);
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LevelSet::load(&["definitely/not/here.txt"]).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn test_empty_level_set_rejected() {
        assert!(matches!(LevelSet::new(Vec::new()).unwrap_err(), LevelError::NoLevels));
    }
}
