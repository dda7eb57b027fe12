//! Goal grids for free play and timed challenges.
//!
//! MATRIX and PIXEL goals come with the program text that paints them, and
//! that text replays to exactly the generated grid. TABLE/GRID goals only
//! need to be achievable: every strip fits inside the grid.

use crate::grid::{Cell, Color, Grid};
use crate::interpreter::constants::{CANVAS_SIZE, MATRIX_ON_COLOR, MATRIX_SIZE, MAX_GRID_SIDE};
use crate::parser::command::{Mode, ToggleOp};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Lit cells every MATRIX goal has
pub const MATRIX_LIT_CELLS: usize = 40;

/// Minimum non-empty rows of a TABLE/GRID challenge goal
pub const CHALLENGE_MIN_ROWS: usize = 10;

/// Seconds granted per non-empty row of a TABLE/GRID challenge
pub const SECONDS_PER_ROW: u32 = 60;

pub const MAZE_CHALLENGE_SECONDS: u32 = 600;
pub const MATRIX_CHALLENGE_SECONDS: u32 = 600;
pub const PIXEL_CHALLENGE_SECONDS: u32 = 900;

/// A generated goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub grid: Grid,
    /// Program text that reproduces `grid` (MATRIX/PIXEL)
    pub solution: Option<String>,
    /// Challenge time budget in seconds
    pub time_budget: Option<u32>,
}

/// Free-play goal for `mode`; `None` for MAZE, whose goal is the maze itself.
pub fn free_goal<R: Rng>(mode: Mode, rng: &mut R) -> Option<Goal> {
    match mode {
        Mode::Table | Mode::Grid => Some(strip_goal(rng)),
        Mode::Matrix => Some(matrix_goal(rng)),
        Mode::Pixel => Some(pixel_goal(rng)),
        Mode::Maze => None,
    }
}

/// Challenge goal for `mode`, with its time budget.
pub fn challenge_goal<R: Rng>(mode: Mode, rng: &mut R) -> Option<Goal> {
    let mut goal = match mode {
        Mode::Table | Mode::Grid => return Some(strip_challenge(rng)),
        Mode::Matrix => matrix_goal(rng),
        Mode::Pixel => pixel_goal(rng),
        Mode::Maze => return None,
    };
    goal.time_budget = Some(challenge_seconds(mode, &goal.grid));
    Some(goal)
}

/// Time budget of a challenge in `mode` with goal `grid`.
pub fn challenge_seconds(mode: Mode, grid: &Grid) -> u32 {
    match mode {
        Mode::Table | Mode::Grid => SECONDS_PER_ROW * grid.non_empty_rows() as u32,
        Mode::Maze => MAZE_CHALLENGE_SECONDS,
        Mode::Matrix => MATRIX_CHALLENGE_SECONDS,
        Mode::Pixel => PIXEL_CHALLENGE_SECONDS,
    }
}

/// Random dimensions and a handful of strips.
pub fn strip_goal<R: Rng>(rng: &mut R) -> Goal {
    let rows = rng.gen_range(4..=10);
    let cols = rng.gen_range(4..=10);
    let mut grid = Grid::new(rows, cols);

    for _ in 0..rng.gen_range(3..=6) {
        let row = rng.gen_range(0..rows);
        random_strip(&mut grid, row, rng);
    }

    Goal {
        grid,
        solution: None,
        time_budget: None,
    }
}

/// At least [`CHALLENGE_MIN_ROWS`] non-empty rows, 60 s per non-empty row.
pub fn strip_challenge<R: Rng>(rng: &mut R) -> Goal {
    let rows = rng.gen_range(CHALLENGE_MIN_ROWS..=MAX_GRID_SIDE);
    let cols = rng.gen_range(5..=MAX_GRID_SIDE);
    let mut grid = Grid::new(rows, cols);

    let mut row_order: Vec<usize> = (0..rows).collect();
    row_order.shuffle(rng);
    let painted = rng.gen_range(CHALLENGE_MIN_ROWS..=rows);
    for &row in &row_order[..painted] {
        for _ in 0..rng.gen_range(1..=2) {
            random_strip(&mut grid, row, rng);
        }
    }

    let time_budget = challenge_seconds(Mode::Table, &grid);
    debug!(rows, cols, painted, time_budget, "strip challenge generated");
    Goal {
        grid,
        solution: None,
        time_budget: Some(time_budget),
    }
}

fn random_strip<R: Rng>(grid: &mut Grid, row: usize, rng: &mut R) {
    let cols = grid.cols();
    let col = rng.gen_range(0..cols);
    let count = rng.gen_range(1..=cols - col);
    let color = Color::PRIMARIES[rng.gen_range(0..Color::PRIMARIES.len())];
    for c in col..col + count {
        grid.set(row, c, Some(color));
    }
}

/// Rejection-sample 30–60 random toggles until exactly
/// [`MATRIX_LIT_CELLS`] cells are lit.
pub fn matrix_goal<R: Rng>(rng: &mut R) -> Goal {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let mut grid = Grid::new(MATRIX_SIZE, MATRIX_SIZE);
        let mut lines = Vec::new();

        for _ in 0..rng.gen_range(30..=60) {
            let op = if rng.gen_bool(0.5) {
                ToggleOp::On
            } else {
                ToggleOp::Off
            };
            let is_row = rng.gen_bool(0.5);
            let index = rng.gen_range(0..MATRIX_SIZE);

            let cell = match op {
                ToggleOp::On => Some(MATRIX_ON_COLOR),
                ToggleOp::Off => None,
            };
            let label = if is_row {
                grid.fill_row(index, cell);
                char::from(b'1' + index as u8)
            } else {
                grid.fill_col(index, cell);
                char::from(b'A' + index as u8)
            };
            lines.push(format!("{} {}", op.symbol(), label));
        }

        if grid.lit_count() == MATRIX_LIT_CELLS {
            debug!(attempts, toggles = lines.len(), "matrix goal accepted");
            return Goal {
                grid,
                solution: Some(lines.join("\n")),
                time_budget: None,
            };
        }
    }
}

/// Row templates of a PIXEL goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowTemplate {
    /// One color across the row
    Full,
    /// a b a b ...
    Alternating,
    /// four cells a, four cells b, twice
    Chunks,
    /// eight cells a, eight cells b
    Split,
}

const ROW_TEMPLATES: [RowTemplate; 4] = [
    RowTemplate::Full,
    RowTemplate::Alternating,
    RowTemplate::Chunks,
    RowTemplate::Split,
];

/// One row per template, emitting both the cells and the PIXEL line.
pub fn pixel_goal<R: Rng>(rng: &mut R) -> Goal {
    let mut grid = Grid::new(CANVAS_SIZE, CANVAS_SIZE);
    let mut lines = Vec::with_capacity(CANVAS_SIZE);

    for row in 0..CANVAS_SIZE {
        let template = ROW_TEMPLATES[rng.gen_range(0..ROW_TEMPLATES.len())];
        let (cells, line) = pixel_row(template, rng);
        for (col, cell) in cells.into_iter().enumerate() {
            grid.set(row, col, cell);
        }
        lines.push(line);
    }

    Goal {
        grid,
        solution: Some(lines.join("\n")),
        time_budget: None,
    }
}

fn pixel_row<R: Rng>(template: RowTemplate, rng: &mut R) -> (Vec<Cell>, String) {
    match template {
        RowTemplate::Full => {
            let color = Color::ALL[rng.gen_range(0..Color::ALL.len())];
            (
                vec![Some(color); CANVAS_SIZE],
                format!("16 * ( {} )", color.pixel_letters()),
            )
        }
        RowTemplate::Alternating => {
            let (a, b) = two_cells(rng);
            let cells: Vec<Cell> = (0..CANVAS_SIZE)
                .map(|c| if c % 2 == 0 { a } else { b })
                .collect();
            (cells, format!("8 * ( {} + {} )", pixel_word(a), pixel_word(b)))
        }
        RowTemplate::Chunks => {
            let (a, b) = two_cells(rng);
            let cells: Vec<Cell> = (0..CANVAS_SIZE)
                .map(|c| if (c / 4) % 2 == 0 { a } else { b })
                .collect();
            (
                cells,
                format!(
                    "2 * ( 4 * ( {} ) + 4 * ( {} ) )",
                    pixel_word(a),
                    pixel_word(b)
                ),
            )
        }
        RowTemplate::Split => {
            let (a, b) = two_cells(rng);
            let cells: Vec<Cell> = (0..CANVAS_SIZE)
                .map(|c| if c < 8 { a } else { b })
                .collect();
            (
                cells,
                format!("8 * ( {} ) + 8 * ( {} )", pixel_word(a), pixel_word(b)),
            )
        }
    }
}

/// Two different cells, each a color or unlit.
fn two_cells<R: Rng>(rng: &mut R) -> (Cell, Cell) {
    let mut choices: Vec<Cell> = Color::ALL.iter().copied().map(Some).collect();
    choices.push(None);
    choices.shuffle(rng);
    (choices[0], choices[1])
}

fn pixel_word(cell: Cell) -> &'static str {
    cell.map_or("OFF", Color::pixel_letters)
}
