//! Maze state for MAZE mode
//!
//! Walls are kept per cell in a flat array with a row stride. Each interior
//! wall is therefore stored twice (once on each side); [`MazeState::open_between`]
//! keeps both copies in sync.

use super::Position;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Wall flags of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn get(&self, heading: Heading) -> bool {
        match heading {
            Heading::North => self.top,
            Heading::East => self.right,
            Heading::South => self.bottom,
            Heading::West => self.left,
        }
    }

    pub fn set(&mut self, heading: Heading, present: bool) {
        match heading {
            Heading::North => self.top = present,
            Heading::East => self.right = present,
            Heading::South => self.bottom = present,
            Heading::West => self.left = present,
        }
    }
}

/// Turtle heading. Degrees follow the math convention: 0 = East, 90 = North,
/// 180 = West, 270 = South.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn degrees(self) -> u16 {
        match self {
            Heading::East => 0,
            Heading::North => 90,
            Heading::West => 180,
            Heading::South => 270,
        }
    }

    /// Heading for a multiple of 90 degrees (taken modulo 360).
    pub fn from_degrees(degrees: u16) -> Heading {
        match (degrees / 90) % 4 {
            0 => Heading::East,
            1 => Heading::North,
            2 => Heading::West,
            _ => Heading::South,
        }
    }

    /// Add `degrees` to the heading, modulo 360.
    pub fn rotated(self, degrees: u16) -> Heading {
        Heading::from_degrees((self.degrees() + degrees % 360) % 360)
    }

    pub fn opposite(self) -> Heading {
        self.rotated(180)
    }

    /// `(d_row, d_col)` of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Heading::East => (0, 1),
            Heading::North => (-1, 0),
            Heading::West => (0, -1),
            Heading::South => (1, 0),
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Heading::East => '→',
            Heading::North => '↑',
            Heading::West => '←',
            Heading::South => '↓',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::East => "east",
            Heading::North => "north",
            Heading::West => "west",
            Heading::South => "south",
        };
        write!(f, "{}", name)
    }
}

/// The directional cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turtle {
    pub position: Position,
    pub heading: Heading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Leaf,
    Carrot,
}

impl ItemKind {
    pub fn value(self) -> u32 {
        match self {
            ItemKind::Leaf => 1,
            ItemKind::Carrot => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub position: Position,
    pub kind: ItemKind,
    pub collected: bool,
}

/// Why a deserialized [`MazeState`] cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("a {rows}x{cols} maze has {found} wall cells")]
    WallCount { rows: usize, cols: usize, found: usize },

    #[error("{what} at ({row}, {col}) is outside the {rows}x{cols} maze")]
    OutOfBounds {
        what: &'static str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Complete MAZE session state: walls, items, exit, visited cells and turtle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeState {
    rows: usize,
    cols: usize,
    walls: Vec<Walls>,
    pub items: Vec<Item>,
    pub exit: Option<Position>,
    pub start: Position,
    pub visited: FxHashSet<Position>,
    pub turtle: Turtle,
}

impl MazeState {
    /// A fully walled maze with the turtle at the centre facing East.
    pub fn closed(rows: usize, cols: usize) -> Self {
        let start = Position::new(rows / 2, cols / 2);
        let mut visited = FxHashSet::default();
        visited.insert(start);
        MazeState {
            rows,
            cols,
            walls: vec![Walls::CLOSED; rows * cols],
            items: Vec::new(),
            exit: None,
            start,
            visited,
            turtle: Turtle {
                position: start,
                heading: Heading::East,
            },
        }
    }

    /// Check that the wall array matches the dimensions and that every
    /// position (turtle, start, exit, items, visited cells) lies inside.
    ///
    /// Mazes built by [`MazeState::closed`] always pass; deserialized ones may not.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows.checked_mul(self.cols) != Some(self.walls.len()) {
            return Err(MazeError::WallCount {
                rows: self.rows,
                cols: self.cols,
                found: self.walls.len(),
            });
        }

        let inside = |what: &'static str, pos: Position| -> Result<(), MazeError> {
            if pos.row < self.rows && pos.col < self.cols {
                Ok(())
            } else {
                Err(MazeError::OutOfBounds {
                    what,
                    row: pos.row,
                    col: pos.col,
                    rows: self.rows,
                    cols: self.cols,
                })
            }
        };

        inside("turtle", self.turtle.position)?;
        inside("start", self.start)?;
        if let Some(exit) = self.exit {
            inside("exit", exit)?;
        }
        for item in &self.items {
            inside("item", item.position)?;
        }
        for &cell in &self.visited {
            inside("visited cell", cell)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn walls(&self, pos: Position) -> Walls {
        self.walls[pos.row * self.cols + pos.col]
    }

    fn walls_mut(&mut self, pos: Position) -> &mut Walls {
        &mut self.walls[pos.row * self.cols + pos.col]
    }

    pub fn has_wall(&self, pos: Position, heading: Heading) -> bool {
        self.walls(pos).get(heading)
    }

    /// The cell one step from `pos` in `heading`, or `None` past the boundary.
    pub fn neighbor(&self, pos: Position, heading: Heading) -> Option<Position> {
        let (dr, dc) = heading.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some(Position::new(row, col))
    }

    /// Remove the wall on `heading` side of `pos`, and the matching wall of the
    /// neighbouring cell if there is one.
    pub fn open_between(&mut self, pos: Position, heading: Heading) {
        self.walls_mut(pos).set(heading, false);
        if let Some(next) = self.neighbor(pos, heading) {
            self.walls_mut(next).set(heading.opposite(), false);
        }
    }

    /// Collect the uncollected item at `pos`, returning its value.
    pub fn collect_at(&mut self, pos: Position) -> Option<u32> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.position == pos && !item.collected)?;
        item.collected = true;
        Some(item.kind.value())
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.items.iter().find(|item| item.position == pos)
    }

    /// Sum of the values of all collected items.
    pub fn collected_value(&self) -> u32 {
        self.items
            .iter()
            .filter(|item| item.collected)
            .map(|item| item.kind.value())
            .sum()
    }

    /// Number of open interior passages (each counted once).
    pub fn passage_count(&self) -> usize {
        let mut count = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let walls = self.walls(Position::new(row, col));
                if col + 1 < self.cols && !walls.right {
                    count += 1;
                }
                if row + 1 < self.rows && !walls.bottom {
                    count += 1;
                }
            }
        }
        count
    }

    /// Put items back, clear the visited set and return the turtle to the start.
    pub fn rewind(&mut self) {
        for item in &mut self.items {
            item.collected = false;
        }
        self.visited.clear();
        self.visited.insert(self.start);
        self.turtle = Turtle {
            position: self.start,
            heading: Heading::East,
        };
    }
}
