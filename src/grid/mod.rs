//! Grid model shared by every mode
//!
//! This module provides the value types the interpreter paints into:
//! - [`Color`]: the closed color alphabet (`R`, `G`, `B` plus the mixed
//!   colors `W`, `Y`, `C`, `M` used by PIXEL and MATRIX)
//! - [`Grid`]: a rectangular matrix of [`Cell`]s stored as a flat vector
//! - [`maze`]: wall grid, items and turtle for MAZE mode
//!
//! # Layout
//!
//! Cells are stored row-major in a single `Vec`; the cell at `(row, col)`
//! lives at `row * cols + col`. Rows grow downward, columns grow rightward.

pub mod maze;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A paint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    White,
    Yellow,
    Cyan,
    Magenta,
}

impl Color {
    /// The three primaries usable in TABLE and GRID programs.
    pub const PRIMARIES: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    /// Every color, primaries first.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
        Color::Yellow,
        Color::Cyan,
        Color::Magenta,
    ];

    /// Parse a single primary letter (`R`, `G`, `B`), case-insensitive.
    pub fn from_primary(letter: char) -> Option<Color> {
        match letter.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }

    /// Additive mix of the primaries present.
    ///
    /// Returns `None` when no primary is present.
    pub fn mix(red: bool, green: bool, blue: bool) -> Option<Color> {
        match (red, green, blue) {
            (true, true, true) => Some(Color::White),
            (true, true, false) => Some(Color::Yellow),
            (false, true, true) => Some(Color::Cyan),
            (true, false, true) => Some(Color::Magenta),
            (true, false, false) => Some(Color::Red),
            (false, true, false) => Some(Color::Green),
            (false, false, true) => Some(Color::Blue),
            (false, false, false) => None,
        }
    }

    /// Single-letter tag (`R`, `G`, `B`, `W`, `Y`, `C`, `M`).
    pub fn tag(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Cyan => 'C',
            Color::Magenta => 'M',
        }
    }

    /// The primary letters that mix into this color, as written in PIXEL code.
    pub fn pixel_letters(self) -> &'static str {
        match self {
            Color::Red => "R",
            Color::Green => "G",
            Color::Blue => "B",
            Color::White => "RGB",
            Color::Yellow => "RG",
            Color::Cyan => "GB",
            Color::Magenta => "RB",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One grid cell; `None` is unlit.
pub type Cell = Option<Color>;

/// A `(row, col)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Rectangular cell matrix with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-unlit grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// The 0×0 grid of a TABLE/GRID program that has not declared its size.
    pub fn empty() -> Self {
        Grid::new(0, 0)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        if self.contains(row, col) {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    /// Write a cell. Writes outside the grid are dropped and reported as `false`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        self.cells[row * self.cols + col] = cell;
        true
    }

    /// Borrow one row. Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate over rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on zero, and a 0-column grid has no rows to yield anyway
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    pub fn fill_row(&mut self, row: usize, cell: Cell) {
        for col in 0..self.cols {
            self.set(row, col, cell);
        }
    }

    pub fn fill_col(&mut self, col: usize, cell: Cell) {
        for row in 0..self.rows {
            self.set(row, col, cell);
        }
    }

    /// Number of lit cells.
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of rows holding at least one lit cell.
    pub fn non_empty_rows(&self) -> usize {
        self.iter_rows()
            .filter(|row| row.iter().any(Option::is_some))
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                match cell {
                    Some(color) => write!(f, "{}", color.tag())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
