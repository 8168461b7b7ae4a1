use std::io::Write;

use super::{RenderEvent, Renderer};
use crate::board::SIZE;
use crate::error::Result;
use crate::grid::Grid;
use crate::session::GameState;

/// Text renderer that keeps its own copy of the board, rebuilt from events.
///
/// The board is drawn whenever a tile is added, which happens once per
/// accepted turn and at the start of a game.
pub struct TerminalRenderer<W: Write> {
    out: W,
    board: Grid<u32>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            board: Grid::new(SIZE, &mut |_, _| 0),
        }
    }

    pub fn board(&self) -> &Grid<u32> {
        &self.board
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self) -> Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", self.board)?;
        self.out.flush()?;

        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn handle_event(&mut self, event: &RenderEvent) -> Result<()> {
        match *event {
            RenderEvent::Cleared => {
                self.board.fill(0);
                writeln!(self.out, "New game")?;
            }
            RenderEvent::TileAdded { value, at } => {
                self.board[at] = value;
                self.draw()?;
            }
            RenderEvent::TileMoved { value, from, to } => {
                self.board[from] = 0;
                self.board[to] = value;
            }
            RenderEvent::TileMerged {
                merged, from, to, ..
            } => {
                self.board[from] = 0;
                self.board[to] = merged;
            }
            RenderEvent::Score { current, max } => {
                writeln!(self.out, "Score: {}  Best: {}", current, max)?;
            }
            RenderEvent::GameOver { state } => {
                self.draw()?;

                match state {
                    GameState::Won => writeln!(self.out, "You win! (New Game or Quit)")?,
                    _ => writeln!(self.out, "Game over. (New Game or Quit)")?,
                }
            }
        }

        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_the_board_from_events() {
        let mut renderer = TerminalRenderer::new(Vec::new());

        for event in [
            RenderEvent::Cleared,
            RenderEvent::TileAdded { value: 2, at: (0, 3) },
            RenderEvent::TileAdded { value: 2, at: (0, 0) },
            RenderEvent::TileMerged {
                value: 2,
                merged: 4,
                from: (0, 3),
                to: (0, 0),
            },
            RenderEvent::TileMoved {
                value: 4,
                from: (0, 0),
                to: (3, 0),
            },
            RenderEvent::Score { current: 4, max: 0 },
        ] {
            renderer.handle_event(&event).unwrap();
        }

        assert_eq!(renderer.board()[(3, 0)], 4);
        assert_eq!(renderer.board().values().filter(|&&v| v != 0).count(), 1);

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("New game"));
        assert!(text.contains("Score: 4  Best: 0"));
    }

    #[test]
    fn announces_the_end_of_the_game() {
        let mut renderer = TerminalRenderer::new(Vec::new());

        renderer
            .handle_event(&RenderEvent::GameOver {
                state: GameState::Lost,
            })
            .unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Game over"));
    }
}
