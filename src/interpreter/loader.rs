//! Program loading: whole-program parse and cross-line rules.
//!
//! [`load_program`] runs the line parser over every non-blank line, then
//! enforces the rules a single line cannot see:
//!
//! - TABLE/GRID declare their size exactly once, before any paint command,
//!   and no larger than [`MAX_GRID_SIDE`] per side;
//! - PIXEL loops are flattened so the engine only ever sees `Paint`/`Skip`.
//!
//! [`silent_replay`] executes a loaded program against a scratch state,
//! skipping any command that fails, to derive a goal grid from source text.

use crate::grid::Grid;
use crate::interpreter::constants::{MAX_GRID_SIDE, PIXEL_OPS_PER_LINE};
use crate::interpreter::engine::{Flow, ProgramState};
use crate::interpreter::errors::LoadError;
use crate::parser::command::{Command, CommandKind, Mode, PixelOp};
use crate::parser::parser::parse_line;
use crate::parser::pixel::flatten;
use tracing::debug;

/// A parsed and validated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub mode: Mode,
    /// Executable commands in source order. `Start` is consumed by the loader.
    pub commands: Vec<Command>,
    /// Declared `rows#cols` (TABLE/GRID only)
    pub dimensions: Option<(usize, usize)>,
}

/// Parse and validate a whole program.
pub fn load_program(source: &str, mode: Mode) -> Result<Program, LoadError> {
    let mut commands = Vec::new();
    let mut dimensions = None;
    let mut start_line: Option<usize> = None;

    for (index, raw) in source.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        for command in parse_line(text, index, mode)? {
            let line = command.line + 1;
            match command.kind {
                CommandKind::Start { rows, cols } => {
                    if let Some(first) = start_line {
                        return Err(LoadError::DuplicateStart { line, first });
                    }
                    if rows > MAX_GRID_SIDE || cols > MAX_GRID_SIDE {
                        return Err(LoadError::GridTooLarge {
                            line,
                            rows,
                            cols,
                            max: MAX_GRID_SIDE,
                        });
                    }
                    start_line = Some(line);
                    dimensions = Some((rows, cols));
                }
                _ if command.is_paint() && start_line.is_none() => {
                    return Err(LoadError::PaintBeforeStart { line });
                }
                CommandKind::Pixel(ref op @ PixelOp::Loop(..)) => {
                    for flat in flatten(std::slice::from_ref(op), PIXEL_OPS_PER_LINE) {
                        commands.push(Command::new(
                            CommandKind::Pixel(flat),
                            command.line,
                            &command.text,
                        ));
                    }
                }
                _ => commands.push(command),
            }
        }
    }

    if mode == Mode::Pixel {
        cap_pixel_lines(&mut commands);
    }

    debug!(%mode, commands = commands.len(), "program loaded");
    Ok(Program {
        mode,
        commands,
        dimensions,
    })
}

/// Keep at most [`PIXEL_OPS_PER_LINE`] operations per source line.
fn cap_pixel_lines(commands: &mut Vec<Command>) {
    let mut current_line = None;
    let mut kept_on_line = 0;
    commands.retain(|command| {
        if current_line != Some(command.line) {
            current_line = Some(command.line);
            kept_on_line = 0;
        }
        kept_on_line += 1;
        kept_on_line <= PIXEL_OPS_PER_LINE
    });
}

/// Best-effort execution used to derive a grid from code.
///
/// Runtime failures skip the offending command instead of halting; a MAZE
/// exit ends the replay.
pub fn silent_replay(program: &Program, state: &mut ProgramState) {
    let mut current_line = None;
    for command in &program.commands {
        if current_line != Some(command.line) {
            current_line = Some(command.line);
            state.begin_line(command.line);
        }
        match state.execute(command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exited) => break,
            Err(e) => debug!(error = %e, "silent replay skipped command"),
        }
    }
}

/// Derive the grid `source` paints, ignoring runtime failures.
pub fn derive_grid(source: &str, mode: Mode) -> Result<Grid, LoadError> {
    let program = load_program(source, mode)?;
    let mut scratch = ProgramState::new(mode);
    scratch.install(&program);
    silent_replay(&program, &mut scratch);
    Ok(scratch.grid)
}
