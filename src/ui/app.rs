//! Main TUI application state and logic

use crate::challenge::{Challenge, Submission};
use crate::grid::Position;
use crate::interpreter::engine::{Completion, Engine};
use crate::parser::command::Mode;
use crate::snapshot::Snapshot;
use crate::ui::panes::{self, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const TICK: Duration = Duration::from_secs(1);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Board,
    Goal,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> board -> goal)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Board,
            FocusedPane::Board => FocusedPane::Goal,
            FocusedPane::Goal => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    pub engine: Engine,

    /// Running challenge, if the session is timed
    pub challenge: Option<Challenge>,

    pub focused_pane: FocusedPane,
    pub source_scroll: SourceScrollState,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Delay between steps while playing
    pub step_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last challenge clock tick
    pub last_tick: Instant,

    /// Where `w` writes the maze save
    pub save_path: PathBuf,
}

impl App {
    pub fn new(engine: Engine, step_interval: Duration, save_path: PathBuf) -> Self {
        let status_message = match &engine.state().error {
            Some(error) => error.clone(),
            None => String::from("Ready!"),
        };
        App {
            engine,
            challenge: None,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message,
            step_interval,
            last_play_time: Instant::now(),
            last_tick: Instant::now(),
            save_path,
        }
    }

    /// Switch to a timed session.
    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        self.status_message = format!("Challenge started: {} to go", challenge.clock());
        self.challenge = Some(challenge);
        self.last_tick = Instant::now();
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.advance_clock();

            if self.engine.state().running
                && self.last_play_time.elapsed() >= self.step_interval
            {
                self.engine.step();
                self.last_play_time = Instant::now();
                self.report_step();
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Feed elapsed whole seconds to the challenge clock.
    fn advance_clock(&mut self) {
        let Some(challenge) = self.challenge.as_mut() else {
            return;
        };
        while self.last_tick.elapsed() >= TICK {
            self.last_tick += TICK;
            if !challenge.tick() {
                self.engine.stop();
                self.status_message = match challenge.best_score {
                    Some(best) => format!("Time is up! Best score: {}", best),
                    None => "Time is up!".to_string(),
                };
                break;
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let snapshot = self.engine.snapshot();
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(main_chunks[0]);

        let current_line = snapshot.current_line.map_or(0, |line| line + 1);
        panes::render_source_pane(
            frame,
            columns[0],
            &format!("{} program", snapshot.mode),
            &self.engine.state().source,
            current_line,
            snapshot.completion == Completion::Failure,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let board_focused = self.focused_pane == FocusedPane::Board;
        if snapshot.mode == Mode::Maze {
            panes::render_maze_pane(frame, columns[1], snapshot.maze.as_ref(), board_focused);
        } else {
            panes::render_grid_pane(
                frame,
                columns[1],
                "Board",
                Some(&snapshot.grid),
                marker(&snapshot),
                board_focused,
            );
        }

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[2]);

        panes::render_grid_pane(
            frame,
            right_rows[0],
            "Goal",
            snapshot.target.as_ref(),
            None,
            self.focused_pane == FocusedPane::Goal,
        );
        panes::render_info_pane(frame, right_rows[1], &snapshot, self.challenge.as_ref());

        panes::render_status_bar(frame, main_chunks[1], &self.status_message, &snapshot);
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Right | KeyCode::Char('s') => {
                self.engine.stop();
                if self.engine.step() {
                    self.report_step();
                } else {
                    self.status_message = "Nothing left to run".to_string();
                }
            }
            KeyCode::Char(' ') => {
                if self.engine.state().running {
                    self.engine.stop();
                    self.status_message = "Paused".to_string();
                } else {
                    self.engine.run();
                    if self.engine.state().running {
                        // first step on the next loop iteration
                        self.last_play_time = Instant::now()
                            .checked_sub(self.step_interval)
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Nothing left to run".to_string();
                    }
                }
            }
            KeyCode::Char('r') => {
                self.engine.reset(false);
                self.status_message = "Reset".to_string();
            }
            KeyCode::Char('R') => {
                self.engine.reset(true);
                self.status_message = match self.engine.mode() {
                    Mode::Maze => "Reset with a new maze".to_string(),
                    _ => "Reset with a new goal".to_string(),
                };
            }
            KeyCode::Char('n') => self.new_goal(),
            KeyCode::Char('w') => self.save_maze(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up if self.focused_pane == FocusedPane::Source => {
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_add(1));
                }
            }
            KeyCode::Down if self.focused_pane == FocusedPane::Source => {
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    /// Describe the state after a step.
    fn report_step(&mut self) {
        let state = self.engine.state();
        self.status_message = match (&state.error, state.completion) {
            (Some(error), Completion::Failure) => format!("Halted: {}", error),
            (_, Completion::Success) => {
                format!("Out of the maze with {} points", state.maze_score)
            }
            _ if state.is_finished() => "Program finished".to_string(),
            _ => match state.current_line() {
                Some(line) => format!("Next: line {}", line + 1),
                None => "Stepped".to_string(),
            },
        };
    }

    fn new_goal(&mut self) {
        if self.challenge.is_some() {
            let challenge = self.engine.start_challenge();
            self.engine.reset(false);
            self.last_tick = Instant::now();
            self.status_message = format!("New challenge: {} to go", challenge.clock());
            self.challenge = Some(challenge);
            return;
        }
        self.engine.new_goal();
        self.engine.reset(false);
        self.status_message = "New goal".to_string();
    }

    fn save_maze(&mut self) {
        let Some(save) = self.engine.save_maze() else {
            self.status_message = "Only MAZE sessions can be saved".to_string();
            return;
        };
        match save.write_to(&self.save_path) {
            Ok(()) => {
                info!(path = %self.save_path.display(), "maze saved");
                self.status_message = format!("Saved to {}", self.save_path.display());
            }
            Err(e) => {
                warn!(error = %e, "maze save failed");
                self.status_message = e.to_string();
            }
        }
    }

    fn submit(&mut self) {
        let score = self.engine.score();
        let Some(challenge) = self.challenge.as_mut() else {
            self.status_message = format!("Score: {}", score);
            return;
        };
        self.status_message = match challenge.submit(score) {
            Submission::Accepted { score, best } => {
                format!("Submitted {} (best {})", score, best)
            }
            Submission::LockedOut(seconds) => {
                format!("Wait {}s before submitting again", seconds)
            }
            Submission::Expired => "The challenge is over".to_string(),
        };
    }
}

/// Last painted cell, TABLE/GRID only.
fn marker(snapshot: &Snapshot) -> Option<Position> {
    if snapshot.pc == 0 {
        return None;
    }
    match snapshot.mode {
        Mode::Table | Mode::Grid => Some(snapshot.last_position),
        _ => None,
    }
}
