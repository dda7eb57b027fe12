//! Scoring: one pure formula per mode.
//!
//! | Mode        | Score                                                       |
//! |-------------|-------------------------------------------------------------|
//! | TABLE, GRID | non-empty goal rows reproduced exactly                       |
//! | MAZE        | value of the collected items                                |
//! | MATRIX      | +0.25 per correct lit cell, −0.25 per stray lit cell, ≥ 0  |
//! | PIXEL       | ⌊matches × 5 / 32⌋ / 4                                      |
//!
//! Without a goal grid every mode except MAZE scores 0.

use crate::grid::Grid;
use crate::interpreter::engine::ProgramState;
use crate::parser::command::Mode;

pub fn score(state: &ProgramState) -> f64 {
    match state.mode {
        Mode::Maze => maze_score(state.maze_score),
        mode => state
            .target
            .as_ref()
            .map_or(0.0, |target| grid_score(mode, target, &state.grid)),
    }
}

pub fn maze_score(collected: u32) -> f64 {
    f64::from(collected)
}

/// Score `current` against `target` under the formula of `mode`.
pub fn grid_score(mode: Mode, target: &Grid, current: &Grid) -> f64 {
    match mode {
        Mode::Table | Mode::Grid => table_score(target, current),
        Mode::Matrix => matrix_score(target, current),
        Mode::Pixel => pixel_score(target, current),
        Mode::Maze => 0.0,
    }
}

/// Rows that are lit in the goal and match the current grid cell for cell.
/// Rows entirely unlit in the goal are ignored.
pub fn table_score(target: &Grid, current: &Grid) -> f64 {
    target
        .iter_rows()
        .enumerate()
        .filter(|(_, row)| row.iter().any(Option::is_some))
        .filter(|(index, row)| *index < current.rows() && current.row(*index) == *row)
        .count() as f64
}

pub fn matrix_score(target: &Grid, current: &Grid) -> f64 {
    let mut score = 0.0;
    for row in 0..target.rows() {
        for col in 0..target.cols() {
            match (target.get(row, col).is_some(), current.get(row, col).is_some()) {
                (true, true) => score += 0.25,
                (false, true) => score -= 0.25,
                _ => {}
            }
        }
    }
    f64::max(score, 0.0)
}

pub fn pixel_score(target: &Grid, current: &Grid) -> f64 {
    let mut matches = 0usize;
    for row in 0..target.rows() {
        for col in 0..target.cols() {
            if target.get(row, col) == current.get(row, col) {
                matches += 1;
            }
        }
    }
    (matches * 5 / 32) as f64 / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Color;

    #[test]
    fn test_table_score_ignores_blank_goal_rows() {
        let mut target = Grid::new(3, 3);
        target.set(0, 0, Some(Color::Red));
        target.set(2, 1, Some(Color::Blue));
        let mut current = Grid::new(3, 3);
        current.set(0, 0, Some(Color::Red));
        assert_eq!(table_score(&target, &current), 1.0);

        current.set(2, 1, Some(Color::Blue));
        assert_eq!(table_score(&target, &current), 2.0);

        // a stray cell in a blank goal row changes nothing
        current.set(1, 1, Some(Color::Green));
        assert_eq!(table_score(&target, &current), 2.0);
    }

    #[test]
    fn test_table_score_with_smaller_current_grid() {
        let mut target = Grid::new(4, 3);
        target.set(3, 0, Some(Color::Red));
        let current = Grid::new(2, 3);
        assert_eq!(table_score(&target, &current), 0.0);
    }

    #[test]
    fn test_matrix_score_clamped() {
        let mut target = Grid::new(8, 8);
        target.fill_row(0, Some(Color::White));
        let mut current = Grid::new(8, 8);
        current.fill_row(0, Some(Color::White));
        assert_eq!(matrix_score(&target, &current), 2.0);

        current.fill_row(1, Some(Color::White));
        current.fill_row(2, Some(Color::White));
        assert_eq!(matrix_score(&target, &current), 0.0);

        current.fill_row(3, Some(Color::White));
        assert_eq!(matrix_score(&target, &current), 0.0);
    }

    #[test]
    fn test_pixel_score_quarter_points() {
        let target = Grid::new(16, 16);
        let current = Grid::new(16, 16);
        assert_eq!(pixel_score(&target, &current), 10.0);

        let mut current = Grid::new(16, 16);
        for col in 0..16 {
            current.set(0, col, Some(Color::Red));
        }
        // 240 matches -> floor(1200 / 32) = 37 -> 9.25
        assert_eq!(pixel_score(&target, &current), 9.25);
    }
}
