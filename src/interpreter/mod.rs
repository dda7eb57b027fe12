//! Grid interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`loader`]: whole-program parse, cross-line validation, silent replay
//! - [`engine`]: [`engine::Engine`], the stepped state machine
//! - [`commands`]: per-mode semantics of every command
//! - [`scoring`]: per-mode score formulas
//! - [`errors`]: load-time and runtime error types
//!
//! # Execution Model
//!
//! `step()` executes every command that came from the next source line as
//! one batch. Running is a flag only: the owner calls `step()` on its own
//! cadence until the program finishes or halts.

pub mod commands;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod scoring;
