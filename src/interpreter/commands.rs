//! Per-mode command execution.
//!
//! Adds `impl ProgramState` methods for every [`CommandKind`]. Bounds are
//! checked before anything is written, so a failing TABLE/GRID paint leaves
//! the grid exactly as it was.

use crate::grid::maze::Heading;
use crate::grid::{Color, Position};
use crate::interpreter::constants::MATRIX_ON_COLOR;
use crate::interpreter::engine::{Flow, ProgramState};
use crate::interpreter::errors::RuntimeError;
use crate::parser::command::{Command, CommandKind, PixelOp, ToggleOp};

impl ProgramState {
    pub(crate) fn execute_command(&mut self, command: &Command) -> Result<Flow, RuntimeError> {
        let line = command.line + 1;
        match command.kind {
            // consumed by the loader; nothing to do at run time
            CommandKind::Start { .. } => Ok(Flow::Continue),

            CommandKind::Color {
                count,
                color,
                row,
                col,
            } => {
                self.paint_strip(signed(row), signed(col), count, color, line)?;
                Ok(Flow::Continue)
            }

            CommandKind::GridColor {
                count,
                color,
                dx,
                dy,
            } => {
                // saturated targets are always out of bounds
                let row = signed(self.last_position.row).saturating_add(dy);
                let col = signed(self.last_position.col).saturating_add(dx);
                self.paint_strip(row, col, count, color, line)?;
                self.total_movements +=
                    dx.unsigned_abs() + dy.unsigned_abs() + count.saturating_sub(1) as u64;
                Ok(Flow::Continue)
            }

            CommandKind::Rotate { degrees } => {
                if let Some(maze) = self.maze.as_mut() {
                    maze.turtle.heading = maze.turtle.heading.rotated(degrees);
                }
                Ok(Flow::Continue)
            }

            CommandKind::Move { steps } => self.move_turtle(steps, line),

            CommandKind::MatrixToggle { op, is_row, index } => {
                let cell = match op {
                    ToggleOp::On => Some(MATRIX_ON_COLOR),
                    ToggleOp::Off => None,
                };
                if is_row {
                    self.grid.fill_row(index, cell);
                } else {
                    self.grid.fill_col(index, cell);
                }
                Ok(Flow::Continue)
            }

            CommandKind::Pixel(ref op) => {
                self.pixel(op);
                Ok(Flow::Continue)
            }
        }
    }

    /// Paint `count` cells rightward from `(row, col)`.
    fn paint_strip(
        &mut self,
        row: i64,
        col: i64,
        count: usize,
        color: Color,
        line: usize,
    ) -> Result<(), RuntimeError> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        if row < 0 || col < 0 || row as usize >= rows || col as usize >= cols {
            return Err(RuntimeError::OutOfBounds {
                line,
                row,
                col,
                rows,
                cols,
            });
        }

        let (row, col) = (row as usize, col as usize);
        if count > cols - col {
            return Err(RuntimeError::StripOverflow {
                line,
                col,
                count,
                cols,
            });
        }

        for c in col..col + count {
            self.grid.set(row, c, Some(color));
        }
        self.last_position = Position::new(row, col + count.saturating_sub(1));
        Ok(())
    }

    /// Walk the turtle one cell at a time.
    ///
    /// The wall on the edge being crossed is checked from the current cell
    /// before every single-cell advance. An open edge with no cell behind it
    /// is the exit.
    fn move_turtle(&mut self, steps: u32, line: usize) -> Result<Flow, RuntimeError> {
        let Some(maze) = self.maze.as_mut() else {
            return Ok(Flow::Continue);
        };

        for _ in 0..steps {
            let position = maze.turtle.position;
            let heading: Heading = maze.turtle.heading;

            if maze.has_wall(position, heading) {
                return Err(RuntimeError::WallCollision {
                    line,
                    row: position.row,
                    col: position.col,
                    heading,
                });
            }

            let Some(next) = maze.neighbor(position, heading) else {
                return Ok(Flow::Exited);
            };

            maze.turtle.position = next;
            maze.visited.insert(next);
            if let Some(value) = maze.collect_at(next) {
                self.maze_score += value;
            }
        }

        Ok(Flow::Continue)
    }

    /// One PIXEL primitive at the cursor. Writes past the canvas are dropped.
    fn pixel(&mut self, op: &PixelOp) {
        let Position { row, col } = self.cursor;
        match op {
            PixelOp::Paint(color) => {
                self.grid.set(row, col, Some(*color));
            }
            PixelOp::Skip => {
                self.grid.set(row, col, None);
            }
            // flattened by the loader
            PixelOp::Loop(..) => return,
        }
        self.cursor.col += 1;
    }
}

fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::maze::MazeState;
    use crate::grid::Grid;
    use crate::parser::command::Mode;

    fn command(kind: CommandKind) -> Command {
        Command::new(kind, 0, "")
    }

    #[test]
    fn test_strip_overflow_leaves_grid_untouched() {
        let mut state = ProgramState::new(Mode::Table);
        state.grid = Grid::new(3, 3);
        let result = state.execute(&command(CommandKind::Color {
            count: 4,
            color: Color::Red,
            row: 0,
            col: 0,
        }));
        assert!(matches!(result, Err(RuntimeError::StripOverflow { .. })));
        assert_eq!(state.grid.lit_count(), 0);
    }

    #[test]
    fn test_strip_may_end_on_last_column() {
        let mut state = ProgramState::new(Mode::Table);
        state.grid = Grid::new(3, 3);
        state
            .execute(&command(CommandKind::Color {
                count: 2,
                color: Color::Blue,
                row: 2,
                col: 1,
            }))
            .unwrap();
        assert_eq!(state.last_position, Position::new(2, 2));
    }

    #[test]
    fn test_grid_negative_target_is_out_of_bounds() {
        let mut state = ProgramState::new(Mode::Grid);
        state.grid = Grid::new(4, 4);
        let result = state.execute(&command(CommandKind::GridColor {
            count: 1,
            color: Color::Green,
            dx: -1,
            dy: 0,
        }));
        assert!(matches!(result, Err(RuntimeError::OutOfBounds { col: -1, .. })));
        assert_eq!(state.total_movements, 0);
    }

    #[test]
    fn test_huge_strip_count_overflows_instead_of_wrapping() {
        let mut state = ProgramState::new(Mode::Table);
        state.grid = Grid::new(3, 3);
        let result = state.execute(&command(CommandKind::Color {
            count: usize::MAX,
            color: Color::Red,
            row: 0,
            col: 1,
        }));
        assert!(matches!(
            result,
            Err(RuntimeError::StripOverflow { count: usize::MAX, col: 1, .. })
        ));
        assert_eq!(state.grid.lit_count(), 0);
    }

    #[test]
    fn test_huge_row_is_out_of_bounds() {
        let mut state = ProgramState::new(Mode::Table);
        state.grid = Grid::new(3, 3);
        let result = state.execute(&command(CommandKind::Color {
            count: 1,
            color: Color::Red,
            row: usize::MAX,
            col: 0,
        }));
        assert!(matches!(
            result,
            Err(RuntimeError::OutOfBounds { row: i64::MAX, .. })
        ));
    }

    #[test]
    fn test_grid_extreme_offsets_are_out_of_bounds() {
        let mut state = ProgramState::new(Mode::Grid);
        state.grid = Grid::new(3, 3);
        state.last_position = Position::new(1, 1);
        for (dx, dy) in [(i64::MAX, 0), (0, i64::MAX), (i64::MIN, 0), (0, i64::MIN)] {
            let result = state.execute(&command(CommandKind::GridColor {
                count: 1,
                color: Color::Red,
                dx,
                dy,
            }));
            assert!(matches!(result, Err(RuntimeError::OutOfBounds { .. })));
        }
        assert_eq!(state.last_position, Position::new(1, 1));
        assert_eq!(state.total_movements, 0);
        assert_eq!(state.grid.lit_count(), 0);
    }

    #[test]
    fn test_move_collects_items_and_exits() {
        let mut state = ProgramState::new(Mode::Maze);
        let mut maze = MazeState::closed(1, 3);
        // corridor: (0,1) -> (0,2) -> out through the east edge
        maze.open_between(Position::new(0, 1), Heading::East);
        maze.open_between(Position::new(0, 2), Heading::East);
        maze.items.push(crate::grid::maze::Item {
            position: Position::new(0, 2),
            kind: crate::grid::maze::ItemKind::Carrot,
            collected: false,
        });
        state.maze = Some(maze);

        let flow = state
            .execute(&command(CommandKind::Move { steps: 5 }))
            .unwrap();
        assert_eq!(flow, Flow::Exited);
        assert_eq!(state.maze_score, 2);
        let maze = state.maze.as_ref().unwrap();
        assert_eq!(maze.turtle.position, Position::new(0, 2));
        assert!(maze.visited.contains(&Position::new(0, 2)));
    }

    #[test]
    fn test_pixel_writes_past_canvas_are_dropped() {
        let mut state = ProgramState::new(Mode::Pixel);
        state.begin_line(3);
        state.cursor.col = 15;
        state.execute(&command(CommandKind::Pixel(PixelOp::Paint(Color::Red)))).unwrap();
        state.execute(&command(CommandKind::Pixel(PixelOp::Paint(Color::Red)))).unwrap();
        assert_eq!(state.grid.lit_count(), 1);
        assert_eq!(state.grid.get(3, 15), Some(Color::Red));
    }
}
