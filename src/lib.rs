//! # Introduction
//!
//! gridlab runs programs written in five tiny teaching languages that paint
//! a grid of colored cells, one source line per step, and scores the result
//! against a goal. A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) shows the program, the board and the
//! goal side by side.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Parser → Commands → Loader → Engine (step) → Scorer → TUI
//! ```
//!
//! 1. [`parser`] — turns each source line into [`parser::command::Command`]s;
//!    PIXEL lines go through a tokenizer and a recursive-descent parser.
//! 2. [`interpreter`] — the loader validates and flattens the command stream;
//!    the [`interpreter::engine::Engine`] executes it one source line at a
//!    time and the scorer compares the board with the goal.
//! 3. [`grid`] — the cell grid and the MAZE state (walls, items, turtle).
//! 4. [`generator`] — seeded maze carving and goal generation.
//! 5. [`challenge`] — timed challenge sessions.
//! 6. [`snapshot`] — read-only copies of the engine state and the JSON maze
//!    save document.
//! 7. [`config`] — command-line options.
//! 8. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Languages
//!
//! | Mode   | Example line        | Meaning                                      |
//! |--------|---------------------|----------------------------------------------|
//! | TABLE  | `3 R 0 0`           | 3 red cells from row 0, column 0             |
//! | GRID   | `2 G 1 0`           | 2 green cells, one column right of the last  |
//! | MAZE   | `ruota 1`, `muovi 3`| turn 90°, walk 3 cells                       |
//! | MATRIX | `+ 3`, `- C`        | light row 3, clear column C                  |
//! | PIXEL  | `2 * ( RG + OFF )`  | yellow, unlit, yellow, unlit                 |

pub mod challenge;
pub mod config;
pub mod generator;
pub mod grid;
pub mod interpreter;
pub mod parser;
pub mod snapshot;
pub mod ui;
