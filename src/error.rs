use std::fmt;
use std::io;

/// Errors surfaced by the game engine and its collaborators.
///
/// A full board is not an error: placement simply reports that nothing was
/// placed. Neighbor lookups past the board edge are `None`, never an error.
#[derive(Debug)]
pub enum GameError {
    /// A move token that names none of the four directions.
    InvalidDirection(String),
    /// A line that is neither a direction, `New Game` nor `Quit`.
    InvalidCommand(String),
    /// A tile whose value or coordinates the board cannot hold.
    InvalidTile(String),
    /// The command or tile source has nothing left to give.
    InputClosed,
    Io(io::Error),
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDirection(token) => write!(f, "invalid direction: {:?}", token),
            GameError::InvalidCommand(token) => write!(f, "invalid command: {:?}", token),
            GameError::InvalidTile(reason) => write!(f, "invalid tile: {}", reason),
            GameError::InputClosed => write!(f, "input closed"),
            GameError::Io(e) => write!(f, "i/o error: {}", e),
            GameError::Config(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}
