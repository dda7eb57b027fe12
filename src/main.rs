// gridlab: stepped interpreter for five grid-painting languages

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use gridlab::config::Cli;
use gridlab::interpreter::engine::Engine;
use gridlab::snapshot::MazeSave;
use gridlab::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mode = cli.resolve_mode();
    let seed = cli.seed();
    tracing::info!(%mode, seed, "starting");
    let mut engine = Engine::new(mode, seed);

    let challenge = if cli.challenge {
        Some(engine.start_challenge())
    } else {
        if let Some(path) = &cli.goal_from {
            let goal_source = read_program(path)?;
            if !engine.set_target_from(&goal_source) {
                let error = engine.state().error.clone().unwrap_or_default();
                eprintln!("Error: goal program '{}': {}", path.display(), error);
                std::process::exit(1);
            }
        } else if cli.restore.is_none() {
            engine.new_goal();
        }
        None
    };

    if let Some(path) = &cli.restore {
        let save = MazeSave::read_from(path)?;
        if !engine.restore_maze(save) {
            let error = engine.state().error.clone().unwrap_or_default();
            eprintln!("Error: cannot restore '{}': {}", path.display(), error);
            std::process::exit(1);
        }
    } else if let Some(path) = &cli.file {
        let source = read_program(path)?;
        // A program that does not load still opens the UI, with the error shown
        engine.load(&source);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, cli.step_interval(), cli.save_path.clone());
    if let Some(challenge) = challenge {
        app = app.with_challenge(challenge);
    }
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn read_program(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }
    Ok(fs::read_to_string(path)?)
}

/// Log to `path` only; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridlab=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}
