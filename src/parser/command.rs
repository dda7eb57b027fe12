// Command model produced by the line parser

use crate::grid::Color;
use std::fmt;
use std::str::FromStr;

/// Which language a program is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Table,
    Grid,
    Maze,
    Matrix,
    Pixel,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Table, Mode::Grid, Mode::Maze, Mode::Matrix, Mode::Pixel];

    /// Conventional file extension for saved programs.
    pub fn extension(self) -> &'static str {
        match self {
            Mode::Table => "table",
            Mode::Grid => "grid",
            Mode::Maze => "maze",
            Mode::Matrix => "matrix",
            Mode::Pixel => "pixel",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Table => "TABLE",
            Mode::Grid => "GRID",
            Mode::Maze => "MAZE",
            Mode::Matrix => "MATRIX",
            Mode::Pixel => "PIXEL",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Mode::Table),
            "grid" => Ok(Mode::Grid),
            "maze" => Ok(Mode::Maze),
            "matrix" => Ok(Mode::Matrix),
            "pixel" => Ok(Mode::Pixel),
            other => Err(format!(
                "unknown mode '{}' (expected table, grid, maze, matrix or pixel)",
                other
            )),
        }
    }
}

/// MATRIX switch direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOp {
    On,
    Off,
}

impl ToggleOp {
    pub fn symbol(self) -> char {
        match self {
            ToggleOp::On => '+',
            ToggleOp::Off => '-',
        }
    }
}

/// One PIXEL operation. `Loop` only exists between parsing and loading;
/// the loader flattens it before anything is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelOp {
    Paint(Color),
    Skip,
    Loop(u32, Vec<PixelOp>),
}

/// The mode primitive a command carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `rows#cols` (TABLE/GRID)
    Start { rows: usize, cols: usize },
    /// `count color row col` (TABLE)
    Color {
        count: usize,
        color: Color,
        row: usize,
        col: usize,
    },
    /// `count color dx dy` (GRID), relative to the last painted cell
    GridColor {
        count: usize,
        color: Color,
        dx: i64,
        dy: i64,
    },
    /// `ruota n` (MAZE)
    Rotate { degrees: u16 },
    /// `muovi n` (MAZE)
    Move { steps: u32 },
    /// `+ 3` / `- C` (MATRIX)
    MatrixToggle {
        op: ToggleOp,
        is_row: bool,
        index: usize,
    },
    /// PIXEL operation
    Pixel(PixelOp),
}

/// A parsed command with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// 0-based source line index
    pub line: usize,
    /// The original line text
    pub text: String,
}

impl Command {
    pub fn new(kind: CommandKind, line: usize, text: &str) -> Self {
        Command {
            kind,
            line,
            text: text.to_string(),
        }
    }

    /// Whether this command writes cells of a TABLE/GRID program.
    pub fn is_paint(&self) -> bool {
        matches!(
            self.kind,
            CommandKind::Color { .. } | CommandKind::GridColor { .. }
        )
    }
}
