//! Load-time and runtime error types
//!
//! [`LoadError`] covers everything that stops a program from loading (syntax
//! and cross-line rules); [`RuntimeError`] covers everything that halts a run.
//! The engine never returns either across its API: it stores the `Display`
//! text in [`ProgramState::error`](super::engine::ProgramState::error).
//!
//! Line numbers in messages are 1-based.

use crate::grid::maze::Heading;
use crate::parser::parser::ParseError;
use thiserror::Error;

/// Errors that abort a load attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// A second `rows#cols` line
    #[error("Line {line}: dimensions already declared on line {first}")]
    DuplicateStart { line: usize, first: usize },

    #[error("Line {line}: a {rows}#{cols} grid is larger than {max}#{max}")]
    GridTooLarge {
        line: usize,
        rows: usize,
        cols: usize,
        max: usize,
    },

    /// Paint command before the `rows#cols` line
    #[error("Line {line}: declare the grid size (rows#cols) before painting")]
    PaintBeforeStart { line: usize },
}

/// Errors that halt a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Starting cell outside the grid
    #[error("Line {line}: cell ({row}, {col}) is outside the {rows}#{cols} grid")]
    OutOfBounds {
        line: usize,
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    /// Strip runs past the right edge
    #[error("Line {line}: {count} cells from column {col} run past the last column ({cols} columns)")]
    StripOverflow {
        line: usize,
        col: usize,
        count: usize,
        cols: usize,
    },

    /// Turtle hit a wall
    #[error("Line {line}: the turtle hit a wall moving {heading} from ({row}, {col})")]
    WallCollision {
        line: usize,
        row: usize,
        col: usize,
        heading: Heading,
    },
}

impl RuntimeError {
    /// 1-based line the error refers to
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::OutOfBounds { line, .. }
            | RuntimeError::StripOverflow { line, .. }
            | RuntimeError::WallCollision { line, .. } => *line,
        }
    }
}
