//! Grid coordinates, movement directions, and distance helpers shared by every subsystem.

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// `None` when the step would leave the `i32` coordinate space.
    pub fn step(self, direction: MoveDirection) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        Some(Self { row: self.row.checked_add(d_row)?, col: self.col.checked_add(d_col)? })
    }

    /// Orthogonal neighbors in up, right, down, left order.
    pub fn neighbors(self) -> [Position; 4] {
        [
            Position { row: self.row - 1, col: self.col },
            Position { row: self.row, col: self.col + 1 },
            Position { row: self.row + 1, col: self.col },
            Position { row: self.row, col: self.col - 1 },
        ]
    }

    pub fn surrounding(self) -> [Position; 8] {
        [
            Position { row: self.row - 1, col: self.col - 1 },
            Position { row: self.row - 1, col: self.col },
            Position { row: self.row - 1, col: self.col + 1 },
            Position { row: self.row, col: self.col - 1 },
            Position { row: self.row, col: self.col + 1 },
            Position { row: self.row + 1, col: self.col - 1 },
            Position { row: self.row + 1, col: self.col },
            Position { row: self.row + 1, col: self.col + 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] =
        [MoveDirection::Up, MoveDirection::Right, MoveDirection::Down, MoveDirection::Left];

    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDirection::Up => (-1, 0),
            MoveDirection::Down => (1, 0),
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
        }
    }
}

pub fn manhattan(a: Position, b: Position) -> u32 {
    a.row.abs_diff(b.row).saturating_add(a.col.abs_diff(b.col))
}

pub fn within_radius(origin: Position, target: Position, radius: i32) -> bool {
    let d_row = i64::from(target.row) - i64::from(origin.row);
    let d_col = i64::from(target.col) - i64::from(origin.col);
    let radius = i64::from(radius);
    // The extra `radius` term rounds the circle out so axis-aligned edges are not clipped.
    d_row * d_row + d_col * d_col <= radius * radius + radius
}

pub fn in_bounds(width: usize, height: usize, pos: Position) -> bool {
    pos.row >= 0 && pos.col >= 0 && (pos.col as usize) < width && (pos.row as usize) < height
}
