// Command-line configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::parser::command::Mode;

/// Stepped interpreter for five small grid-painting languages
#[derive(Parser, Debug, Clone)]
#[command(name = "gridlab", version, about, long_about = None)]
pub struct Cli {
    /// Program to load on start
    pub file: Option<PathBuf>,

    /// Language: table, grid, maze, matrix or pixel.
    /// Defaults to the file extension, then TABLE
    #[arg(long, short)]
    pub mode: Option<Mode>,

    /// Random seed for mazes and goals
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between steps while playing
    #[arg(long, default_value_t = 400)]
    pub interval_ms: u64,

    /// Start a timed challenge instead of free play
    #[arg(long)]
    pub challenge: bool,

    /// Derive the goal grid from this program
    #[arg(long, value_name = "FILE", conflicts_with = "challenge")]
    pub goal_from: Option<PathBuf>,

    /// Write logs here; nothing is logged without it
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Restore a saved MAZE session
    #[arg(long, value_name = "SAVE")]
    pub restore: Option<PathBuf>,

    /// Where `w` writes the maze save
    #[arg(long, value_name = "PATH", default_value = "maze-save.json")]
    pub save_path: PathBuf,
}

impl Cli {
    /// `--mode`, else the extension of the program file, else TABLE.
    /// A `--restore` always means MAZE.
    pub fn resolve_mode(&self) -> Mode {
        if self.restore.is_some() {
            return Mode::Maze;
        }
        self.mode
            .or_else(|| self.file.as_deref().and_then(mode_from_extension))
            .unwrap_or(Mode::Table)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

fn mode_from_extension(path: &Path) -> Option<Mode> {
    let extension = path.extension()?.to_str()?;
    Mode::ALL
        .into_iter()
        .find(|mode| mode.extension().eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flag_wins() {
        let cli = Cli::parse_from(["gridlab", "drawing.pixel", "--mode", "matrix"]);
        assert_eq!(cli.resolve_mode(), Mode::Matrix);
    }

    #[test]
    fn test_mode_from_extension() {
        let cli = Cli::parse_from(["gridlab", "walk.maze", "--seed", "3"]);
        assert_eq!(cli.resolve_mode(), Mode::Maze);
        assert_eq!(cli.seed(), 3);

        let cli = Cli::parse_from(["gridlab", "notes.txt"]);
        assert_eq!(cli.resolve_mode(), Mode::Table);
    }

    #[test]
    fn test_restore_forces_maze() {
        let cli = Cli::parse_from(["gridlab", "--mode", "pixel", "--restore", "s.json"]);
        assert_eq!(cli.resolve_mode(), Mode::Maze);
    }

    #[test]
    fn test_goal_from_conflicts_with_challenge() {
        let parsed = Cli::try_parse_from(["gridlab", "--challenge", "--goal-from", "g.table"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_bad_mode_is_rejected() {
        assert!(Cli::try_parse_from(["gridlab", "--mode", "turtle"]).is_err());
    }
}
