//! Maze generation using an iterative randomized depth-first carve
//!
//! 1. Start at the centre cell, mark it visited, push it.
//! 2. While the stack is not empty:
//!    - pick a random unvisited neighbour of the top cell, open the wall
//!      between them, mark it visited and push it;
//!    - with no unvisited neighbour left, pop (backtrack).
//! 3. Carve one exit at a random edge midpoint.
//! 4. Shuffle every cell except start and exit, then take the leaves and
//!    carrots off the end.
//!
//! Every cell is visited exactly once through a fresh passage, so the result
//! is a spanning tree: one path between any two cells, every item reachable.

use crate::grid::maze::{Heading, Item, ItemKind, MazeState};
use crate::grid::Position;
use crate::interpreter::constants::{MAZE_CARROTS, MAZE_LEAVES};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate a perfect `rows`×`cols` maze with one exit and its items.
pub fn generate_maze<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> MazeState {
    let mut maze = MazeState::closed(rows, cols);
    if rows == 0 || cols == 0 {
        return maze;
    }

    carve(&mut maze, rng);
    let exit = carve_exit(&mut maze, rng);
    place_items(&mut maze, exit, rng);
    maze
}

fn carve<R: Rng>(maze: &mut MazeState, rng: &mut R) {
    let cols = maze.cols();
    let mut visited = vec![false; maze.rows() * cols];
    let start = maze.start;
    visited[start.row * cols + start.col] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let options: Vec<(Heading, Position)> = Heading::ALL
            .iter()
            .filter_map(|&heading| {
                let next = maze.neighbor(current, heading)?;
                (!visited[next.row * cols + next.col]).then_some((heading, next))
            })
            .collect();

        match options.choose(rng) {
            Some(&(heading, next)) => {
                maze.open_between(current, heading);
                visited[next.row * cols + next.col] = true;
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Open the boundary wall of one of the four edge midpoints.
fn carve_exit<R: Rng>(maze: &mut MazeState, rng: &mut R) -> Position {
    let (rows, cols) = (maze.rows(), maze.cols());
    let candidates = [
        (Position::new(0, cols / 2), Heading::North),
        (Position::new(rows - 1, cols / 2), Heading::South),
        (Position::new(rows / 2, 0), Heading::West),
        (Position::new(rows / 2, cols - 1), Heading::East),
    ];
    let (exit, side) = candidates[rng.gen_range(0..candidates.len())];
    maze.open_between(exit, side);
    maze.exit = Some(exit);
    exit
}

fn place_items<R: Rng>(maze: &mut MazeState, exit: Position, rng: &mut R) {
    let start = maze.start;
    let mut cells: Vec<Position> = (0..maze.rows())
        .flat_map(|row| (0..maze.cols()).map(move |col| Position::new(row, col)))
        .filter(|&pos| pos != start && pos != exit)
        .collect();
    cells.shuffle(rng);

    let kinds = std::iter::repeat(ItemKind::Leaf)
        .take(MAZE_LEAVES)
        .chain(std::iter::repeat(ItemKind::Carrot).take(MAZE_CARROTS));
    for kind in kinds {
        let Some(position) = cells.pop() else {
            break;
        };
        maze.items.push(Item {
            position,
            kind,
            collected: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate_maze(16, 16, &mut ChaCha8Rng::seed_from_u64(7));
        let b = generate_maze(16, 16, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_spanning_tree_and_items() {
        let maze = generate_maze(16, 16, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(maze.passage_count(), 16 * 16 - 1);
        assert_eq!(maze.items.len(), MAZE_LEAVES + MAZE_CARROTS);
        let exit = maze.exit.unwrap();
        assert!(maze.items.iter().all(|i| i.position != exit && i.position != maze.start));
        assert_eq!(maze.start, Position::new(8, 8));
    }

    #[test]
    fn test_tiny_maze() {
        let maze = generate_maze(1, 2, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(maze.passage_count(), 1);
        assert!(maze.items.len() <= 1);
    }
}
