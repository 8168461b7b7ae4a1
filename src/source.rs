//! Where commands and new tiles come from.
//!
//! In normal play commands are read from the keyboard and tiles drawn from a
//! seeded RNG. In testing mode both come from one script, one token per line:
//! commands as `Up`, `Left`, `New Game`, `Quit`, ..., tiles as `T <value> <row> <col>`.
//! [`Recorder`] writes the same format, so a recorded session replays.

use core::fmt;
use core::str::FromStr;
use std::io::{BufRead, Write};

use log::warn;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};

use crate::board::SIZE;
use crate::command::Command;
use crate::error::{GameError, Result};

/// A tile the random collaborator wants placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDrop {
    pub value: u32,
    pub row: usize,
    pub col: usize,
}

impl FromStr for TileDrop {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GameError::InvalidTile(s.trim().to_string());
        let mut parts = s.split_whitespace();

        if parts.next() != Some("T") {
            return Err(invalid());
        }

        let value = parse_next::<u32>(&mut parts).ok_or_else(invalid)?;
        let row = parse_next::<usize>(&mut parts).ok_or_else(invalid)?;
        let col = parse_next::<usize>(&mut parts).ok_or_else(invalid)?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(TileDrop { value, row, col })
    }
}

fn parse_next<'a, T: FromStr>(parts: &mut impl Iterator<Item = &'a str>) -> Option<T> {
    parts.next().and_then(|part| part.parse().ok())
}

impl fmt::Display for TileDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T {} {} {}", self.value, self.row, self.col)
    }
}

pub trait CommandSource {
    /// Blocks until the next command. `GameError::InputClosed` once exhausted.
    fn next_command(&mut self) -> Result<Command>;
}

pub trait TileSource {
    fn next_tile(&mut self) -> Result<TileDrop>;
}

/// Uniformly placed tiles: a 4 with probability `four_probability`, else a 2.
pub struct RandomTiles {
    rng: XorShiftRng,
    four_probability: f64,
}

impl RandomTiles {
    pub fn new(seed: u64, four_probability: f64) -> Self {
        Self {
            rng: XorShiftRng::seed_from_u64(seed),
            four_probability: four_probability.clamp(0.0, 1.0),
        }
    }
}

impl TileSource for RandomTiles {
    fn next_tile(&mut self) -> Result<TileDrop> {
        let value = if self.rng.gen_bool(self.four_probability) {
            4
        } else {
            2
        };

        Ok(TileDrop {
            value,
            row: self.rng.gen_range(0..SIZE),
            col: self.rng.gen_range(0..SIZE),
        })
    }
}

/// Reads commands line by line, skipping anything unrecognised.
pub struct Keyboard<R: BufRead> {
    reader: R,
}

impl<R: BufRead> Keyboard<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CommandSource for Keyboard<R> {
    fn next_command(&mut self) -> Result<Command> {
        let mut line = String::new();

        loop {
            line.clear();

            if self.reader.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => return Ok(command),
                Err(e) => warn!("{}", e),
            }
        }
    }
}

/// Scripted commands and tiles from a single reader.
///
/// Unrecognised command lines are skipped; a malformed tile line is an error.
pub struct Script<R: BufRead> {
    reader: R,
}

impl<R: BufRead> Script<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> Result<String> {
        let mut line = String::new();

        loop {
            line.clear();

            if self.reader.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }

            let token = line.trim();

            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }
}

impl<R: BufRead> CommandSource for Script<R> {
    fn next_command(&mut self) -> Result<Command> {
        loop {
            match self.next_line()?.parse::<Command>() {
                Ok(command) => return Ok(command),
                Err(e) => warn!("skipping script line: {}", e),
            }
        }
    }
}

impl<R: BufRead> TileSource for Script<R> {
    fn next_tile(&mut self) -> Result<TileDrop> {
        self.next_line()?.parse()
    }
}

/// Joins a command source and a tile source into one input.
pub struct Sources<C, T> {
    pub commands: C,
    pub tiles: T,
}

impl<C: CommandSource, T> CommandSource for Sources<C, T> {
    fn next_command(&mut self) -> Result<Command> {
        self.commands.next_command()
    }
}

impl<C, T: TileSource> TileSource for Sources<C, T> {
    fn next_tile(&mut self) -> Result<TileDrop> {
        self.tiles.next_tile()
    }
}

/// Passes everything through from `inner`, writing each item to `log` as a script line.
pub struct Recorder<S, W: Write> {
    inner: S,
    log: W,
}

impl<S, W: Write> Recorder<S, W> {
    pub fn new(inner: S, log: W) -> Self {
        Self { inner, log }
    }

    pub fn into_parts(self) -> (S, W) {
        (self.inner, self.log)
    }
}

impl<S: CommandSource, W: Write> CommandSource for Recorder<S, W> {
    fn next_command(&mut self) -> Result<Command> {
        let command = self.inner.next_command()?;

        writeln!(self.log, "{}", command)?;
        self.log.flush()?;

        Ok(command)
    }
}

impl<S: TileSource, W: Write> TileSource for Recorder<S, W> {
    fn next_tile(&mut self) -> Result<TileDrop> {
        let tile = self.inner.next_tile()?;

        writeln!(self.log, "{}", tile)?;
        self.log.flush()?;

        Ok(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use std::io::{self, Cursor};

    #[test]
    fn tile_lines_parse_and_print() {
        let tile: TileDrop = "T 4 2 3".parse().unwrap();

        assert_eq!(tile, TileDrop { value: 4, row: 2, col: 3 });
        assert_eq!(tile.to_string(), "T 4 2 3");
    }

    #[test]
    fn malformed_tile_lines_are_rejected() {
        for line in [
            "T 2 1",
            "2 1 1",
            "T 2 1 1 1",
            "T two 1 1",
            "Up",
            "T 4294967298 0 0",
            "T -2 0 0",
        ] {
            assert!(
                matches!(line.parse::<TileDrop>(), Err(GameError::InvalidTile(_))),
                "{}",
                line
            );
        }
    }

    #[test]
    fn random_tiles_stay_on_the_board_and_are_reproducible() {
        let mut a = RandomTiles::new(7, 0.1);
        let mut b = RandomTiles::new(7, 0.1);

        for _ in 0..200 {
            let tile = a.next_tile().unwrap();

            assert!(tile.value == 2 || tile.value == 4);
            assert!(tile.row < SIZE && tile.col < SIZE);
            assert_eq!(tile, b.next_tile().unwrap());
        }
    }

    #[test]
    fn keyboard_skips_noise_and_closes_at_eof() {
        let mut keyboard = Keyboard::new(Cursor::new("\nbogus\n\u{2190}\nQuit\n"));

        assert_eq!(
            keyboard.next_command().unwrap(),
            Command::Move(Direction::Left)
        );
        assert_eq!(keyboard.next_command().unwrap(), Command::Quit);
        assert!(matches!(
            keyboard.next_command(),
            Err(GameError::InputClosed)
        ));
    }

    #[test]
    fn script_interleaves_tiles_and_commands() {
        let mut script = Script::new(Cursor::new("T 2 0 0\n\nT 4 3 3\nDown\n"));

        assert_eq!(script.next_tile().unwrap().value, 2);
        assert_eq!(script.next_tile().unwrap().row, 3);
        assert_eq!(
            script.next_command().unwrap(),
            Command::Move(Direction::Down)
        );
        assert!(matches!(script.next_tile(), Err(GameError::InputClosed)));
    }

    #[test]
    fn script_skips_unknown_commands() {
        let mut script = Script::new(Cursor::new("Jump\nT 2 0 0\nLeft\n"));

        assert_eq!(
            script.next_command().unwrap(),
            Command::Move(Direction::Left)
        );
        assert!(matches!(script.next_command(), Err(GameError::InputClosed)));
    }

    #[test]
    fn script_rejects_a_command_where_a_tile_belongs() {
        let mut script = Script::new(Cursor::new("Left\n"));

        assert!(matches!(script.next_tile(), Err(GameError::InvalidTile(_))));
    }

    #[test]
    fn recorder_flushes_every_line() {
        let input = Script::new(Cursor::new("T 4 0 1\n"));
        let mut recorder = Recorder::new(input, io::BufWriter::new(Vec::new()));

        recorder.next_tile().unwrap();

        let (_, log) = recorder.into_parts();
        assert_eq!(log.buffer(), b"");
        assert_eq!(log.get_ref().as_slice(), b"T 4 0 1\n");
    }

    #[test]
    fn recorder_writes_a_replayable_script() {
        let input = Script::new(Cursor::new("T 2 1 1\nLeft\nNew Game\n"));
        let mut recorder = Recorder::new(input, Vec::new());

        recorder.next_tile().unwrap();
        recorder.next_command().unwrap();
        recorder.next_command().unwrap();

        let (_, log) = recorder.into_parts();
        let log = String::from_utf8(log).unwrap();
        assert_eq!(log, "T 2 1 1\nLeft\nNew Game\n");

        let mut replay = Script::new(Cursor::new(log));
        assert_eq!(replay.next_tile().unwrap(), TileDrop { value: 2, row: 1, col: 1 });
        assert_eq!(
            replay.next_command().unwrap(),
            Command::Move(Direction::Left)
        );
        assert_eq!(replay.next_command().unwrap(), Command::NewGame);
    }
}
