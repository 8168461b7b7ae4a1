use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::GameError;

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    NewGame,
    Quit,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        if token.eq_ignore_ascii_case("new game") || token.eq_ignore_ascii_case("newgame") {
            return Ok(Command::NewGame);
        }
        if token.eq_ignore_ascii_case("quit") {
            return Ok(Command::Quit);
        }

        token
            .parse::<Direction>()
            .map(Command::Move)
            .map_err(|_| GameError::InvalidCommand(token.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(direction) => fmt::Display::fmt(direction, f),
            Command::NewGame => f.write_str("New Game"),
            Command::Quit => f.write_str("Quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!("New Game".parse::<Command>().unwrap(), Command::NewGame);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "\u{2191}".parse::<Command>().unwrap(),
            Command::Move(Direction::Up)
        );
        assert_eq!(
            "Right".parse::<Command>().unwrap(),
            Command::Move(Direction::Right)
        );
    }

    #[test]
    fn display_parses_back() {
        for command in [
            Command::NewGame,
            Command::Quit,
            Command::Move(Direction::Left),
        ] {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn garbage_is_an_invalid_command() {
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(GameError::InvalidCommand(_))
        ));
    }
}
