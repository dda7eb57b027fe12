//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: program text with highlighting and the current line indicator
//! - [`grid`]: the board (grid or maze) and the goal grid
//! - [`status`]: status bar with keybindings, and the score/challenge info pane
//!
//! Each pane exports stateless `render_*` functions; the only state kept
//! between frames is the source pane's [`SourceScrollState`].

pub mod grid;
pub mod source;
pub mod status;

pub use grid::{render_grid_pane, render_maze_pane};
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_info_pane, render_status_bar};
