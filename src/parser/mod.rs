//! Line parser for the five teaching languages
//!
//! This module turns program text into typed commands:
//! - [`command`]: command model ([`command::Command`], [`command::Mode`])
//! - [`parser`]: per-mode line grammars and [`parser::ParseError`]
//! - [`lexer`]: tokenizer for PIXEL lines
//! - [`pixel`]: recursive-descent parser for PIXEL sequences and loops
//!
//! # Grammars
//!
//! | Mode   | Line                                   |
//! |--------|----------------------------------------|
//! | TABLE  | `rows#cols`, `count color row col`     |
//! | GRID   | `rows#cols`, `count color dx dy`       |
//! | MAZE   | `ruota {1,2,3}`, `muovi n`             |
//! | MATRIX | `+ 3`, `- C`                           |
//! | PIXEL  | `R + GB + OFF`, `4 * ( RG + 3 * (B) )` |
//!
//! Parsing is a pure function of (line text, line number, mode).

pub mod command;
pub mod lexer;
pub mod parser;
pub mod pixel;
