// Constants for the grid interpreter

use crate::grid::Color;

/// Largest grid a TABLE/GRID program may declare, per side
pub const MAX_GRID_SIDE: usize = 16;

/// MATRIX grids are always 8×8
pub const MATRIX_SIZE: usize = 8;

/// MAZE and PIXEL grids are always 16×16
pub const CANVAS_SIZE: usize = 16;

/// Color a MATRIX row/column is switched to by `+`
pub const MATRIX_ON_COLOR: Color = Color::White;

/// Flattened PIXEL operations kept per line; anything past the 16 visible
/// columns has no effect, so expansion stops here
pub const PIXEL_OPS_PER_LINE: usize = 64;

/// Items placed in every generated maze
pub const MAZE_LEAVES: usize = 4;
pub const MAZE_CARROTS: usize = 2;
