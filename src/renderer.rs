//! Text renderer
//!
//! Maps a `GameState` snapshot to a block of text: one glyph per cell plus a
//! HUD line. Purely a reader; it never touches the simulation.

use std::fmt::Write;

use glam::IVec2;

use crate::consts::POWER_MODE_TICKS;
use crate::sim::{Cell, GamePhase, GameState, Role};

/// Power ticks left at which frightened pursuers start blinking
pub const BLINK_THRESHOLD: u32 = POWER_MODE_TICKS / 4;

fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Wall => '#',
        Cell::SmallDot => '.',
        Cell::BigDot => 'o',
        Cell::Empty | Cell::PlayerHome | Cell::Pursuer1Home | Cell::Pursuer2Home => ' ',
    }
}

fn pursuer_glyph(role: Role, state: &GameState) -> char {
    let normal = match role {
        Role::Pursuer2 => 'B',
        _ => 'A',
    };
    if !state.power_mode {
        return normal;
    }
    // Blink back to normal on alternate ticks near the end of power mode
    let ticks = state.power_ticks_remaining;
    if ticks <= BLINK_THRESHOLD && ticks % 2 == 0 {
        normal
    } else {
        'm'
    }
}

fn player_glyph(state: &GameState) -> char {
    match state.phase {
        GamePhase::GameOver => 'X',
        _ => 'C',
    }
}

/// Render the board and HUD
pub fn render_text(state: &GameState) -> String {
    let grid = &state.grid;
    let mut out = String::with_capacity((grid.columns() + 1) * (grid.rows() + 3));

    for (row, cells) in grid.iter_rows().enumerate() {
        for (column, &cell) in cells.iter().enumerate() {
            let pos = IVec2::new(column as i32, row as i32);
            let glyph = if state.player.pos == pos {
                player_glyph(state)
            } else if let Some(p) = state.pursuers.iter().find(|p| p.pos == pos) {
                pursuer_glyph(p.role, state)
            } else {
                cell_glyph(cell)
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out.push_str(&hud_line(state));
    out.push('\n');
    if let Some(banner) = banner(state) {
        out.push_str(banner);
        out.push('\n');
    }
    out
}

/// Score / level / power line
pub fn hud_line(state: &GameState) -> String {
    let mut line = format!("Score: {}  Level: {}", state.score, state.level);
    if state.power_mode {
        let _ = write!(line, "  Power: {}", state.power_ticks_remaining);
    }
    line
}

/// End-of-game message, if any
pub fn banner(state: &GameState) -> Option<&'static str> {
    match state.phase {
        GamePhase::Playing => None,
        GamePhase::GameOver => Some("GAME OVER"),
        GamePhase::Won => Some("YOU WON!"),
    }
}
