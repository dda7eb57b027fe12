// Read-only state copies and the maze save document

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::maze::{MazeError, MazeState};
use crate::grid::{Grid, Position};
use crate::interpreter::engine::{Completion, Phase, ProgramState};
use crate::parser::command::Mode;

/// Deep copy of everything a renderer reads from the engine.
///
/// Mutating a snapshot never reaches the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub grid: Grid,
    pub target: Option<Grid>,
    pub maze: Option<MazeState>,
    /// 0-based source line the next `step` will run
    pub current_line: Option<usize>,
    pub pc: usize,
    pub command_count: usize,
    pub score: f64,
    pub error: Option<String>,
    pub completion: Completion,
    pub running: bool,
    pub last_position: Position,
    pub total_movements: u64,
    pub maze_score: u32,
    pub cursor: Position,
}

impl Snapshot {
    pub fn capture(state: &ProgramState, score: f64) -> Self {
        Snapshot {
            mode: state.mode,
            phase: state.phase(),
            grid: state.grid.clone(),
            target: state.target.clone(),
            maze: state.maze.clone(),
            current_line: state.current_line(),
            pc: state.pc,
            command_count: state.commands.len(),
            score,
            error: state.error.clone(),
            completion: state.completion,
            running: state.running,
            last_position: state.last_position,
            total_movements: state.total_movements,
            maze_score: state.maze_score,
            cursor: state.cursor,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Maze save is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Maze save could not be accessed: {0}")]
    Io(#[from] io::Error),
    #[error("Maze save is inconsistent: {0}")]
    Maze(#[from] MazeError),
}

/// A MAZE session on disk: the program text and the maze it ran in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSave {
    pub code: String,
    pub maze: MazeState,
}

impl MazeSave {
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a save document.
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let save: MazeSave = serde_json::from_str(json)?;
        save.maze.validate()?;
        Ok(save)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SaveError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, SaveError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
