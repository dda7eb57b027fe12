//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, play pacing, challenge clock
//! - **[`panes`]** — stateless render functions for each visible pane (source, board,
//!   goal, info, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Engine`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Engine`]: crate::interpreter::engine::Engine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
