use enum_map::EnumMap;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Tilt, SIZE};
use crate::direction::Direction;
use crate::error::{GameError, Result};
use crate::source::{TileDrop, TileSource};

/// Score that wins a game unless configured otherwise.
pub const TARGET_SCORE: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::Playing
    }
}

/// The board plus everything that lives as long as a game: score, the best
/// score across games, and how often each direction changed the board.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    score: u32,
    max_score: u32,
    target: u32,
    moves: EnumMap<Direction, u32>,
}

impl GameSession {
    pub fn new(target: u32) -> Self {
        Self {
            board: Board::new(),
            score: 0,
            max_score: 0,
            target,
            moves: EnumMap::default(),
        }
    }

    /// A session resumed from an existing board, mostly useful in tests.
    pub fn with_board(board: Board, score: u32, target: u32) -> Self {
        Self {
            board,
            score,
            ..Self::new(target)
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn tile_count(&self) -> usize {
        self.board.tile_count()
    }

    pub fn moves(&self) -> &EnumMap<Direction, u32> {
        &self.moves
    }

    /// Empties the board and zeroes the score; the best score is kept.
    pub fn clear(&mut self) {
        self.board.clear();
        self.score = 0;
        self.moves = EnumMap::default();
    }

    /// Folds the current score into the best score.
    pub fn record_max(&mut self) {
        self.max_score = self.max_score.max(self.score);
    }

    pub fn state(&self) -> GameState {
        if self.score >= self.target {
            GameState::Won
        } else if self.board.is_stuck() {
            GameState::Lost
        } else {
            GameState::Playing
        }
    }

    /// Places the next tile from `tiles` that lands on an empty cell.
    ///
    /// Tiles aimed at occupied cells are discarded and another one is
    /// requested. Returns `Ok(None)` without asking when the board is full.
    pub fn place_random_tile(&mut self, tiles: &mut dyn TileSource) -> Result<Option<TileDrop>> {
        if self.board.is_full() {
            trace!("board full, no tile placed");
            return Ok(None);
        }

        loop {
            let tile = tiles.next_tile()?;

            if tile.value != 2 && tile.value != 4 {
                return Err(GameError::InvalidTile(format!(
                    "{} is neither 2 nor 4",
                    tile.value
                )));
            }
            if tile.row >= SIZE || tile.col >= SIZE {
                return Err(GameError::InvalidTile(format!(
                    "({}, {}) is off the board",
                    tile.row, tile.col
                )));
            }

            if self.board.place(tile.value, tile.row, tile.col)? {
                debug!("placed {}", tile);
                return Ok(Some(tile));
            }

            trace!("({}, {}) occupied, retrying", tile.row, tile.col);
        }
    }

    /// Tilts the board toward `direction` and adds the merge score.
    pub fn tilt(&mut self, direction: Direction) -> Tilt {
        let tilt = self.board.tilt(direction);

        self.score = self.score.saturating_add(tilt.score);

        if tilt.changed {
            self.moves[direction] += 1;
        }

        tilt
    }

    /// Logs a one-line summary of the finished game.
    pub fn log_summary(&self) {
        let moves: Vec<String> = self
            .moves
            .iter()
            .map(|(direction, count)| format!("{}={}", direction, count))
            .collect();

        info!(
            "Game ended with score {} (best {}), highest tile {}, moves: {}",
            self.score,
            self.max_score,
            self.board.highest_tile(),
            moves.join(" ")
        );
    }
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new(TARGET_SCORE)
    }
}
