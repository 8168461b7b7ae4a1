//! The 4x4 board and the tilt physics.
//!
//! Every tilt is computed in a canonical frame in which tiles slide toward
//! row 0. [`Direction::to_real`] maps that frame onto the board, so the
//! slide/merge pass below is written once for all four directions.

use std::fmt;

use log::debug;

use crate::direction::Direction;
use crate::error::{GameError, Result};
use crate::grid::{Grid, Position};

/// Side length of the board.
pub const SIZE: usize = 4;
/// Number of cells on the board.
pub const SQUARES: usize = SIZE * SIZE;
/// Largest tile a 4x4 board can reach. Tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 17;

/// A single tile displacement produced by a tilt, in real board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Moved {
        value: u32,
        from: Position,
        to: Position,
    },
    Merged {
        value: u32,
        merged: u32,
        from: Position,
        to: Position,
    },
}

/// Outcome of [`Board::tilt`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tilt {
    /// Whether any cell differs from the board before the tilt.
    pub changed: bool,
    /// Sum of the values created by merges.
    pub score: u32,
    pub slides: Vec<Slide>,
}

impl Tilt {
    pub fn merges(&self) -> usize {
        self.slides
            .iter()
            .filter(|slide| matches!(slide, Slide::Merged { .. }))
            .count()
    }
}

/// Grid of tile values, 0 for an empty cell, plus a live count of occupied cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Grid<u32>,
    count: usize,
}

fn is_tile_value(value: u32) -> bool {
    (2..=MAX_TILE).contains(&value) && value.is_power_of_two()
}

fn can_merge(value: u32) -> bool {
    value != 0 && value < MAX_TILE
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(SIZE, &mut |_, _| 0),
            count: 0,
        }
    }

    /// Builds a board from rows, row 0 at the top.
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Result<Self> {
        let mut board = Board::new();

        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_tile_value(value) {
                    return Err(GameError::InvalidTile(format!(
                        "{} at ({}, {}) is not a power of two up to {}",
                        value, row, col, MAX_TILE
                    )));
                }

                board.grid[(row, col)] = value;
                board.count += 1;
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> [[u32; SIZE]; SIZE] {
        let mut rows = [[0; SIZE]; SIZE];

        for (row, col, &value) in &self.grid {
            rows[row][col] = value;
        }

        rows
    }

    pub fn grid(&self) -> &Grid<u32> {
        &self.grid
    }

    /// Value at `(row, col)`, 0 when empty, `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.grid.get(row, col).copied()
    }

    pub fn tile_count(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count == SQUARES
    }

    pub fn clear(&mut self) {
        self.grid.fill(0);
        self.count = 0;
    }

    /// Puts `value` at `(row, col)`.
    ///
    /// Returns `Ok(false)` and leaves the board untouched if the cell is occupied.
    pub fn place(&mut self, value: u32, row: usize, col: usize) -> Result<bool> {
        if !is_tile_value(value) {
            return Err(GameError::InvalidTile(format!(
                "{} is not a power of two up to {}",
                value, MAX_TILE
            )));
        }

        let cell = self.grid.get_mut(row, col).ok_or_else(|| {
            GameError::InvalidTile(format!("({}, {}) is off the board", row, col))
        })?;

        if *cell != 0 {
            return Ok(false);
        }

        *cell = value;
        self.count += 1;
        debug_assert!(self.count <= SQUARES);

        Ok(true)
    }

    pub fn highest_tile(&self) -> u32 {
        self.grid.values().copied().max().unwrap_or(0)
    }

    pub fn sum(&self) -> u64 {
        self.grid.values().map(|&v| v as u64).sum()
    }

    /// Whether two horizontally or vertically adjacent tiles hold the same value.
    pub fn has_adjacent_pair(&self) -> bool {
        self.grid.iter().any(|(row, col, &value)| {
            can_merge(value)
                && [Direction::Right, Direction::Down]
                    .into_iter()
                    .any(|direction| self.grid.get_neighbor(row, col, direction) == Some(&value))
        })
    }

    /// Full and without an adjacent equal pair: no tilt can change the board.
    pub fn is_stuck(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }

    /// Slides and merges every tile toward `direction`.
    pub fn tilt(&mut self, direction: Direction) -> Tilt {
        let mut canonical = Grid::new(SIZE, &mut |row, col| {
            self.grid[direction.to_real((row, col), SIZE)]
        });
        let mut tilt = Tilt::default();

        for col in 0..SIZE {
            // rows holding the product of a merge in this pass
            let mut merged = [false; SIZE];

            for row in 0..SIZE {
                let value = canonical[(row, col)];

                if value == 0 {
                    continue;
                }

                let landing = landing_row(&canonical, row, col);
                let merge_row = landing
                    .checked_sub(1)
                    .filter(|&above| {
                        !merged[above] && can_merge(value) && canonical[(above, col)] == value
                    });

                let (dest, result) = match merge_row {
                    Some(above) => (above, value * 2),
                    None => (landing, value),
                };

                if dest == row {
                    continue;
                }

                canonical[(row, col)] = 0;
                canonical[(dest, col)] = result;

                let from = direction.to_real((row, col), SIZE);
                let to = direction.to_real((dest, col), SIZE);

                if merge_row.is_some() {
                    merged[dest] = true;
                    self.count -= 1;
                    tilt.score += result;
                    debug!("merge {} -> {} from {:?} to {:?}", value, result, from, to);
                    tilt.slides.push(Slide::Merged {
                        value,
                        merged: result,
                        from,
                        to,
                    });
                } else {
                    debug!("move {} from {:?} to {:?}", value, from, to);
                    tilt.slides.push(Slide::Moved { value, from, to });
                }
            }
        }

        let before = std::mem::replace(&mut self.grid, Grid::new(SIZE, &mut |_, _| 0));

        for (row, col, &value) in &canonical {
            self.grid[direction.to_real((row, col), SIZE)] = value;
        }

        tilt.changed = self.grid != before;
        tilt
    }
}

/// Row a tile at `(row, col)` comes to rest on if it does not merge.
fn landing_row(canonical: &Grid<u32>, row: usize, col: usize) -> usize {
    let mut landing = row;

    while landing > 0 && canonical[(landing - 1, col)] == 0 {
        landing -= 1;
    }

    landing
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Grid<u32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size() * 7 - 1);

        for row in 0..self.size() {
            if row > 0 {
                writeln!(f, "{}", rule)?;
            }

            let cells: Vec<String> = (0..self.size())
                .map(|col| match self[(row, col)] {
                    0 => format!("{:^6}", "."),
                    value => format!("{:^6}", value),
                })
                .collect();

            writeln!(f, "{}", cells.join("|"))?;
        }

        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.rows())
    }
}
