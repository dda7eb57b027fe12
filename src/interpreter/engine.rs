// Execution engine for the grid interpreter

use crate::challenge::Challenge;
use crate::generator::maze::generate_maze;
use crate::generator::target::{challenge_goal, free_goal, Goal};
use crate::grid::maze::MazeState;
use crate::grid::{Grid, Position};
use crate::interpreter::constants::{CANVAS_SIZE, MATRIX_SIZE};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::loader::{derive_grid, load_program, silent_replay, Program};
use crate::interpreter::scoring;
use crate::parser::command::{Command, Mode};
use crate::snapshot::{MazeSave, SaveError, Snapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// How a run ended, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    #[default]
    Idle,
    Success,
    Failure,
}

/// Coarse engine phase, derived from [`ProgramState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing loaded yet
    Idle,
    /// Loaded and waiting for `step`/`run`
    Loaded,
    /// Run flag set; the caller is pacing `step` calls
    Running,
    Halted(Completion),
}

/// Outcome of executing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The turtle walked out through the exit
    Exited,
}

/// Everything the engine mutates while loading and running a program.
#[derive(Debug, Clone)]
pub struct ProgramState {
    pub mode: Mode,
    pub source: String,
    pub commands: Vec<Command>,
    /// Declared `rows#cols` of the loaded TABLE/GRID program
    pub dimensions: Option<(usize, usize)>,
    /// Index into `commands` of the next command to run
    pub pc: usize,
    pub grid: Grid,
    pub target: Option<Grid>,
    pub maze: Option<MazeState>,
    pub last_position: Position,
    pub total_movements: u64,
    pub maze_score: u32,
    /// PIXEL write cursor
    pub cursor: Position,
    pub error: Option<String>,
    pub completion: Completion,
    pub running: bool,
    pub loaded: bool,
}

impl ProgramState {
    pub fn new(mode: Mode) -> Self {
        ProgramState {
            mode,
            source: String::new(),
            commands: Vec::new(),
            dimensions: None,
            pc: 0,
            grid: Self::blank_grid(mode, None),
            target: None,
            maze: None,
            last_position: Position::default(),
            total_movements: 0,
            maze_score: 0,
            cursor: Position::default(),
            error: None,
            completion: Completion::Idle,
            running: false,
            loaded: false,
        }
    }

    /// Starting grid for `mode`; TABLE/GRID take their declared size.
    pub fn blank_grid(mode: Mode, dimensions: Option<(usize, usize)>) -> Grid {
        match mode {
            Mode::Table | Mode::Grid => dimensions
                .map(|(rows, cols)| Grid::new(rows, cols))
                .unwrap_or_else(Grid::empty),
            Mode::Matrix => Grid::new(MATRIX_SIZE, MATRIX_SIZE),
            Mode::Maze | Mode::Pixel => Grid::new(CANVAS_SIZE, CANVAS_SIZE),
        }
    }

    /// Take over a loaded program and rewind to its first command.
    pub fn install(&mut self, program: &Program) {
        self.commands = program.commands.clone();
        self.dimensions = program.dimensions;
        self.loaded = true;
        self.rewind();
    }

    /// Return to the initial-but-loaded state. The maze keeps its walls.
    pub fn rewind(&mut self) {
        self.pc = 0;
        self.grid = Self::blank_grid(self.mode, self.dimensions);
        self.last_position = Position::default();
        self.total_movements = 0;
        self.maze_score = 0;
        self.cursor = Position::default();
        self.error = None;
        self.completion = Completion::Idle;
        self.running = false;
        if let Some(maze) = self.maze.as_mut() {
            maze.rewind();
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.loaded {
            Phase::Idle
        } else if self.completion != Completion::Idle {
            Phase::Halted(self.completion)
        } else if self.running {
            Phase::Running
        } else {
            Phase::Loaded
        }
    }

    /// Whether every command has been executed.
    pub fn is_finished(&self) -> bool {
        self.pc >= self.commands.len()
    }

    /// 0-based source line of the next command, if any.
    pub fn current_line(&self) -> Option<usize> {
        self.commands.get(self.pc).map(|c| c.line)
    }

    /// Called before the first command of each source line.
    ///
    /// PIXEL forces the cursor to the start of the row matching the line.
    pub fn begin_line(&mut self, line: usize) {
        if self.mode == Mode::Pixel {
            self.cursor = Position::new(line, 0);
        }
    }

    /// Execute one command against the current state.
    ///
    /// Failures leave the state as it was before the command, except for
    /// MAZE moves, which keep the cells already walked.
    pub fn execute(&mut self, command: &Command) -> Result<Flow, RuntimeError> {
        self.execute_command(command)
    }
}

/// Requests the UI (or any other owner) can make of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Load { code: String, update_target: bool },
    Step,
    Run,
    Stop,
    Reset { force_regenerate: bool },
    NewGoal,
}

/// Single owner of a [`ProgramState`].
///
/// All randomness (maze carving, goal generation) comes from `rng`, so an
/// engine built with [`Engine::new`] and a fixed seed is fully reproducible.
pub struct Engine<R: Rng = ChaCha8Rng> {
    state: ProgramState,
    rng: R,
    solution: Option<String>,
}

impl Engine<ChaCha8Rng> {
    /// Create an engine seeded with `seed`.
    pub fn new(mode: Mode, seed: u64) -> Self {
        Engine::with_rng(mode, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(mode: Mode, rng: R) -> Self {
        let mut engine = Engine {
            state: ProgramState::new(mode),
            rng,
            solution: None,
        };
        if mode == Mode::Maze {
            engine.regenerate_maze();
        }
        engine
    }

    /// Read-only view of the live state.
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Deep copy of the state a renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.score())
    }

    pub fn score(&self) -> f64 {
        scoring::score(&self.state)
    }

    /// Solution code of the last generated goal (MATRIX/PIXEL).
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    /// Apply one [`Event`].
    pub fn dispatch(&mut self, event: Event) -> &ProgramState {
        match event {
            Event::Load {
                code,
                update_target,
            } => {
                if update_target {
                    self.load_with_target(&code);
                } else {
                    self.load(&code);
                }
            }
            Event::Step => {
                self.step();
            }
            Event::Run => self.run(),
            Event::Stop => self.stop(),
            Event::Reset { force_regenerate } => self.reset(force_regenerate),
            Event::NewGoal => {
                self.new_goal();
            }
        }
        &self.state
    }

    /// Load `code`. Returns `false` and records the error if it does not load;
    /// the previously loaded program is kept in that case.
    pub fn load(&mut self, code: &str) -> bool {
        self.load_program(code).is_some()
    }

    /// Load `code` and make the grid it paints the new goal.
    pub fn load_with_target(&mut self, code: &str) -> bool {
        let Some(program) = self.load_program(code) else {
            return false;
        };
        if self.state.mode != Mode::Maze {
            let mut scratch = ProgramState::new(self.state.mode);
            scratch.install(&program);
            silent_replay(&program, &mut scratch);
            self.state.target = Some(scratch.grid);
            self.solution = Some(code.to_string());
            info!("goal derived from program text");
        }
        true
    }

    fn load_program(&mut self, code: &str) -> Option<Program> {
        match load_program(code, self.state.mode) {
            Ok(program) => {
                self.state.source = code.to_string();
                self.state.install(&program);
                info!(
                    mode = %self.state.mode,
                    commands = program.commands.len(),
                    "program loaded"
                );
                Some(program)
            }
            Err(e) => {
                warn!(error = %e, "program rejected");
                self.reject(e.to_string());
                None
            }
        }
    }

    /// Execute every command of the next source line as one batch.
    ///
    /// Returns `false` when nothing was executed (not loaded, halted or
    /// finished). A failing command stops the batch; commands of the same
    /// line that already ran keep their effects.
    pub fn step(&mut self) -> bool {
        let state = &mut self.state;
        if !state.loaded || state.completion != Completion::Idle || state.is_finished() {
            state.running = false;
            return false;
        }

        let line = state.commands[state.pc].line;
        state.begin_line(line);
        debug!(line = line + 1, pc = state.pc, "step");

        while let Some(command) = state.commands.get(state.pc).filter(|c| c.line == line) {
            let command = command.clone();
            match state.execute(&command) {
                Ok(Flow::Continue) => state.pc += 1,
                Ok(Flow::Exited) => {
                    state.pc += 1;
                    state.completion = Completion::Success;
                    state.running = false;
                    info!(score = state.maze_score, "turtle reached the exit");
                    return true;
                }
                Err(e) => {
                    warn!(line = e.line(), error = %e, "run halted");
                    state.error = Some(e.to_string());
                    state.completion = Completion::Failure;
                    state.running = false;
                    return true;
                }
            }
        }

        if state.is_finished() {
            state.running = false;
        }
        true
    }

    /// Set the run flag. Pacing of `step` calls is up to the caller.
    pub fn run(&mut self) {
        let state = &mut self.state;
        state.running =
            state.loaded && state.completion == Completion::Idle && !state.is_finished();
    }

    pub fn stop(&mut self) {
        self.state.running = false;
    }

    /// Rewind the loaded program.
    ///
    /// With `force_regenerate`, MAZE carves a fresh maze and the other modes
    /// generate a fresh goal.
    pub fn reset(&mut self, force_regenerate: bool) {
        if force_regenerate {
            if self.state.mode == Mode::Maze {
                self.regenerate_maze();
            } else {
                self.new_goal();
            }
        }
        self.state.rewind();
        info!(force_regenerate, "reset");
    }

    /// Make the grid `code` paints the goal, leaving the loaded program alone.
    pub fn set_target_from(&mut self, code: &str) -> bool {
        match derive_grid(code, self.state.mode) {
            Ok(grid) => {
                self.state.target = Some(grid);
                self.solution = Some(code.to_string());
                info!("goal derived from program text");
                true
            }
            Err(e) => {
                warn!(error = %e, "goal program rejected");
                self.reject(e.to_string());
                false
            }
        }
    }

    /// Generate a free-play goal. MAZE gets a new maze instead.
    pub fn new_goal(&mut self) -> Option<Goal> {
        if self.state.mode == Mode::Maze {
            self.regenerate_maze();
            self.state.rewind();
            return None;
        }
        let goal = free_goal(self.state.mode, &mut self.rng)?;
        self.install_goal(&goal);
        Some(goal)
    }

    /// Generate a challenge goal and the timed session that goes with it.
    pub fn start_challenge(&mut self) -> Challenge {
        let mode = self.state.mode;
        if mode == Mode::Maze {
            self.regenerate_maze();
            self.state.rewind();
            return Challenge::new(mode, None, None, None);
        }
        let goal = challenge_goal(mode, &mut self.rng);
        if let Some(goal) = &goal {
            self.install_goal(goal);
        }
        match goal {
            Some(goal) => Challenge::new(mode, Some(goal.grid), goal.solution, goal.time_budget),
            None => Challenge::new(mode, None, None, None),
        }
    }

    fn install_goal(&mut self, goal: &Goal) {
        self.state.target = Some(goal.grid.clone());
        self.solution = goal.solution.clone();
        info!(mode = %self.state.mode, lit = goal.grid.lit_count(), "new goal");
    }

    fn regenerate_maze(&mut self) {
        let maze = generate_maze(CANVAS_SIZE, CANVAS_SIZE, &mut self.rng);
        info!(exit = ?maze.exit, "maze generated");
        self.state.maze = Some(maze);
    }

    /// Document that restores this maze session with [`Engine::restore_maze`].
    pub fn save_maze(&self) -> Option<MazeSave> {
        self.state.maze.as_ref().map(|maze| MazeSave {
            code: self.state.source.clone(),
            maze: maze.clone(),
        })
    }

    /// Restore a saved maze session: the program text is reloaded and the maze
    /// (walls, items, exit, visited cells, turtle) is put back exactly.
    ///
    /// The saved maze already shows the program's moves, so the restored
    /// program counts as finished: `step` does nothing until `reset`, which
    /// returns the turtle to the start and replays from the first line.
    pub fn restore_maze(&mut self, save: MazeSave) -> bool {
        if self.state.mode != Mode::Maze {
            self.reject("Maze saves can only be restored in MAZE mode".to_string());
            return false;
        }
        if let Err(e) = save.maze.validate() {
            warn!(error = %e, "maze save rejected");
            self.reject(SaveError::from(e).to_string());
            return false;
        }
        let program = match load_program(&save.code, Mode::Maze) {
            Ok(program) => program,
            Err(e) => {
                warn!(error = %e, "maze save rejected");
                self.reject(e.to_string());
                return false;
            }
        };
        self.state.source = save.code;
        self.state.install(&program);
        self.state.pc = self.state.commands.len();
        self.state.maze_score = save.maze.collected_value();
        self.state.maze = Some(save.maze);
        info!("maze session restored");
        true
    }

    /// Record an error that is not part of a run. The loaded program halts
    /// until the next successful load or `reset`.
    fn reject(&mut self, message: String) {
        self.state.error = Some(message);
        self.state.completion = Completion::Failure;
        self.state.running = false;
    }
}
