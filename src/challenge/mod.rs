//! Timed challenge sessions
//!
//! A [`Challenge`] is a pure countdown: the owner calls [`Challenge::tick`]
//! once per elapsed second and [`Challenge::submit`] with the current score.
//! Nothing in here reads a clock.

use crate::generator::target::challenge_seconds;
use crate::grid::Grid;
use crate::parser::command::Mode;
use tracing::info;

/// Seconds between two accepted submissions
pub const LOCKOUT_SECONDS: u32 = 30;

/// Result of [`Challenge::submit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submission {
    Accepted { score: f64, best: f64 },
    /// Rejected; this many seconds of lockout are left
    LockedOut(u32),
    Expired,
}

#[derive(Debug, Clone)]
pub struct Challenge {
    pub mode: Mode,
    /// Goal grid; `None` in MAZE, where the maze is the goal
    pub goal: Option<Grid>,
    pub solution: Option<String>,
    pub time_budget: u32,
    pub remaining: u32,
    pub lockout: u32,
    /// Scores of the accepted submissions, oldest first
    pub attempts: Vec<f64>,
    pub best_score: Option<f64>,
}

impl Challenge {
    /// Start a session. Without an explicit budget the per-mode default is
    /// used.
    pub fn new(
        mode: Mode,
        goal: Option<Grid>,
        solution: Option<String>,
        time_budget: Option<u32>,
    ) -> Self {
        let time_budget =
            time_budget.unwrap_or_else(|| default_budget(mode, goal.as_ref()));
        info!(%mode, time_budget, "challenge started");
        Challenge {
            mode,
            goal,
            solution,
            time_budget,
            remaining: time_budget,
            lockout: 0,
            attempts: Vec::new(),
            best_score: None,
        }
    }

    /// One second elapsed. Returns `false` once the session is over.
    pub fn tick(&mut self) -> bool {
        self.lockout = self.lockout.saturating_sub(1);
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                info!(
                    best = ?self.best_score,
                    attempts = self.attempts.len(),
                    "challenge expired"
                );
            }
        }
        !self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_locked_out(&self) -> bool {
        self.lockout > 0
    }

    /// Record `score` as an attempt and start the lockout.
    pub fn submit(&mut self, score: f64) -> Submission {
        if self.is_expired() {
            return Submission::Expired;
        }
        if self.is_locked_out() {
            return Submission::LockedOut(self.lockout);
        }

        self.attempts.push(score);
        let best = self.best_score.map_or(score, |best| best.max(score));
        self.best_score = Some(best);
        self.lockout = LOCKOUT_SECONDS;
        info!(score, best, attempt = self.attempts.len(), "challenge submission");
        Submission::Accepted { score, best }
    }

    /// Remaining time as `mm:ss`.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

fn default_budget(mode: Mode, goal: Option<&Grid>) -> u32 {
    let empty = Grid::empty();
    challenge_seconds(mode, goal.unwrap_or(&empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Color;

    #[test]
    fn test_default_budgets() {
        assert_eq!(Challenge::new(Mode::Maze, None, None, None).time_budget, 600);
        assert_eq!(Challenge::new(Mode::Pixel, None, None, None).time_budget, 900);

        let mut goal = Grid::new(4, 4);
        goal.set(0, 0, Some(Color::Red));
        goal.set(2, 1, Some(Color::Red));
        let challenge = Challenge::new(Mode::Table, Some(goal), None, None);
        assert_eq!(challenge.time_budget, 120);
    }

    #[test]
    fn test_tick_counts_down_to_expiry() {
        let mut challenge = Challenge::new(Mode::Matrix, None, None, Some(2));
        assert!(challenge.tick());
        assert_eq!(challenge.clock(), "00:01");
        assert!(!challenge.tick());
        assert!(challenge.is_expired());
        assert!(!challenge.tick());
        assert_eq!(challenge.remaining, 0);
        assert_eq!(challenge.submit(3.0), Submission::Expired);
    }

    #[test]
    fn test_lockout_between_submissions() {
        let mut challenge = Challenge::new(Mode::Matrix, None, None, Some(100));
        assert_eq!(
            challenge.submit(2.0),
            Submission::Accepted {
                score: 2.0,
                best: 2.0
            }
        );
        assert_eq!(challenge.submit(5.0), Submission::LockedOut(LOCKOUT_SECONDS));

        for _ in 0..LOCKOUT_SECONDS {
            challenge.tick();
        }
        assert_eq!(
            challenge.submit(1.0),
            Submission::Accepted {
                score: 1.0,
                best: 2.0
            }
        );
        assert_eq!(challenge.attempts, vec![2.0, 1.0]);
        assert_eq!(challenge.best_score, Some(2.0));
    }
}
