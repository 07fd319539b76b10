//! Text rendering of the board
//!
//! Columns run west to east (`x` ascending). Inside a column north is up, and
//! neighbouring columns are offset by half a cell so the grid reads as hexes.

use std::io::{self, Write};

use hex2048_core::{Cube, Grid, Outcome};

const CELL_WIDTH: usize = 6;
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

/// Screen row of a cell: `z - y` grows southward, shifted to start at 0
fn screen_row(cell: Cube, radius: u32) -> usize {
    (cell.z - cell.y + 2 * radius as i32) as usize
}

fn screen_col(cell: Cube, radius: u32) -> usize {
    (cell.x + radius as i32) as usize * CELL_WIDTH
}

fn cell_label(value: Option<u32>, colour: bool) -> String {
    match value {
        None => format!("{:^width$}", ".", width = CELL_WIDTH),
        Some(v) if colour => {
            let exponent = v.trailing_zeros() as usize;
            let code = COLOUR_TABLE[exponent.saturating_sub(1) % COLOUR_TABLE.len()];
            format!("\x1b[{code}m{v:^width$}\x1b[m", width = CELL_WIDTH)
        }
        Some(v) => format!("{v:^width$}", width = CELL_WIDTH),
    }
}

/// One-line game status
pub fn status_line(grid: &Grid) -> String {
    let status = match grid.outcome() {
        Outcome::Playing => "playing",
        Outcome::Won => "game over (won)",
        Outcome::Lost => "game over (lost)",
    };
    format!(
        "{status} | score {} | moves {} | best {}",
        grid.score(),
        grid.moves(),
        grid.max_value()
    )
}

/// Draw the board followed by the status line
pub fn draw_grid(out: &mut impl Write, grid: &Grid, colour: bool) -> io::Result<()> {
    let radius = grid.radius();
    let mut rows = vec![String::new(); 4 * radius as usize + 1];
    let mut widths = vec![0usize; rows.len()];

    // Columns are visited west to east, so each row only ever grows rightward.
    for x in -(radius as i32)..=radius as i32 {
        for cell in grid.get_column(x) {
            let row = screen_row(cell, radius);
            let col = screen_col(cell, radius);
            let value = grid.get_tile(cell).map(|t| t.value);

            rows[row].push_str(&" ".repeat(col - widths[row]));
            rows[row].push_str(&cell_label(value, colour));
            widths[row] = col + CELL_WIDTH;
        }
    }

    for row in rows {
        writeln!(out, "{}", row.trim_end())?;
    }
    writeln!(out, "{}", status_line(grid))
}
