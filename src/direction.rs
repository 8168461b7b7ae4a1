use core::fmt;
use core::str::FromStr;

use enum_map::Enum;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::Position;

/// The edge of the board the tiles are tilted toward.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Maps a position of the canonical frame onto the real board.
    ///
    /// The canonical frame is the board turned so that its row 0 lies along
    /// the edge `self` points at; sliding toward `self` is then always
    /// sliding toward row 0. `size` is the side length of the board.
    pub fn to_real(self, (row, col): Position, size: usize) -> Position {
        let last = size - 1;

        match self {
            Direction::Up => (row, col),
            Direction::Right => (col, last - row),
            Direction::Down => (last - row, col),
            Direction::Left => (last - col, row),
        }
    }

    /// Inverse of [`Direction::to_real`] for the same direction.
    pub fn to_canonical(self, (row, col): Position, size: usize) -> Position {
        let last = size - 1;

        match self {
            Direction::Up => (row, col),
            Direction::Right => (last - col, row),
            Direction::Down => (last - row, col),
            Direction::Left => (col, last - row),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts the direction names (any case) and the arrow glyphs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        let direction = match token {
            "\u{2191}" => Direction::Up,
            "\u{2193}" => Direction::Down,
            "\u{2190}" => Direction::Left,
            "\u{2192}" => Direction::Right,
            _ if token.eq_ignore_ascii_case("up") => Direction::Up,
            _ if token.eq_ignore_ascii_case("down") => Direction::Down,
            _ if token.eq_ignore_ascii_case("left") => Direction::Left,
            _ if token.eq_ignore_ascii_case("right") => Direction::Right,
            _ => return Err(GameError::InvalidDirection(token.to_string())),
        };

        Ok(direction)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };

        f.write_str(name)
    }
}
