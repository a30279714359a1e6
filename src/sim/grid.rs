//! Level grid and cell kinds
//!
//! Positions are `IVec2` with `x` = column and `y` = row. Columns wrap
//! around the left/right edges; rows never wrap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    SmallDot,
    BigDot,
    Wall,
    Pursuer1Home,
    Pursuer2Home,
    PlayerHome,
}

impl Cell {
    /// True for cells the player can eat
    pub fn is_dot(&self) -> bool {
        matches!(self, Cell::SmallDot | Cell::BigDot)
    }
}

/// Rectangular cell grid, fixed in size for the lifetime of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows of cells.
    ///
    /// Callers are expected to have checked that every row has the same
    /// length; the level parser does this and reports ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let row_count = rows.len();
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        debug_assert!(rows.iter().all(|r| r.len() == columns));
        Self {
            rows: row_count,
            columns,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// True if `pos` lies inside the grid
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns && (pos.y as usize) < self.rows
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.columns + pos.x as usize)
    }

    /// Cell at `pos`, or `None` outside the grid
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Cell at (row, column), or `None` outside the grid
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.rows && column < self.columns {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    /// Overwrite the cell at `pos`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: IVec2, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Walls and anything off the top/bottom edge block movement
    pub fn is_blocked(&self, pos: IVec2) -> bool {
        !matches!(self.get(pos), Some(cell) if cell != Cell::Wall)
    }

    /// Apply column wraparound (rows are left untouched)
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        let columns = self.columns as i32;
        let x = if pos.x < 0 {
            columns - 1
        } else if pos.x >= columns {
            0
        } else {
            pos.x
        };
        IVec2::new(x, pos.y)
    }

    /// Number of small and big dots left
    pub fn dot_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_dot()).count() as u32
    }

    /// First position holding `cell`, scanning row by row
    pub fn find(&self, cell: Cell) -> Option<IVec2> {
        self.cells.iter().position(|&c| c == cell).map(|i| {
            IVec2::new((i % self.columns) as i32, (i / self.columns) as i32)
        })
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        use Cell::*;
        Grid::from_rows(vec![
            vec![PlayerHome, SmallDot, Wall],
            vec![Empty, BigDot, Pursuer1Home],
            vec![Pursuer2Home, Empty, SmallDot],
        ])
    }

    #[test]
    fn test_dimensions_and_lookup() {
        let grid = sample();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.cell(0, 2), Some(Cell::Wall));
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(Cell::BigDot));
        assert_eq!(grid.cell(3, 0), None);
        assert_eq!(grid.get(IVec2::new(-1, 0)), None);
    }

    #[test]
    fn test_column_wraparound() {
        let grid = sample();
        assert_eq!(grid.wrap(IVec2::new(-1, 1)), IVec2::new(2, 1));
        assert_eq!(grid.wrap(IVec2::new(3, 2)), IVec2::new(0, 2));
        // Rows are never wrapped
        assert_eq!(grid.wrap(IVec2::new(1, -1)), IVec2::new(1, -1));
    }

    #[test]
    fn test_off_grid_rows_are_blocked() {
        let grid = sample();
        assert!(grid.is_blocked(IVec2::new(0, -1)));
        assert!(grid.is_blocked(IVec2::new(0, 3)));
        assert!(grid.is_blocked(IVec2::new(2, 0)));
        assert!(!grid.is_blocked(IVec2::new(0, 0)));
    }

    #[test]
    fn test_dot_count_and_find() {
        let mut grid = sample();
        assert_eq!(grid.dot_count(), 3);
        assert_eq!(grid.find(Cell::Pursuer1Home), Some(IVec2::new(2, 1)));

        grid.set(IVec2::new(1, 1), Cell::Empty);
        assert_eq!(grid.dot_count(), 2);
    }
}
