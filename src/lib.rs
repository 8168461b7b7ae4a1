//! Core of the sliding-tile game 2048.
//!
//! - [`board::Board`] holds the 4x4 grid and implements the tilt physics.
//! - [`direction::Direction`] maps each tilt onto a single canonical frame.
//! - [`session::GameSession`] tracks score, best score and win/loss.
//! - [`game::Game`] runs the turn loop against a command/tile source and renderers.
//!
//! ```
//! use game_2048::{Board, Direction};
//!
//! let mut board = Board::from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
//! let tilt = board.tilt(Direction::Left);
//! assert_eq!(board.rows()[0], [4, 4, 0, 0]);
//! assert_eq!(tilt.score, 8);
//! ```

pub mod board;
pub mod command;
pub mod config;
pub mod direction;
pub mod error;
pub mod game;
pub mod grid;
pub mod render;
pub mod session;
pub mod source;

pub use board::{Board, Slide, Tilt, MAX_TILE, SIZE, SQUARES};
pub use command::Command;
pub use config::GameConfig;
pub use direction::Direction;
pub use error::{GameError, Result};
pub use game::Game;
pub use session::{GameSession, GameState, TARGET_SCORE};
