//! The turn loop tying a session to its input and its renderers.

use log::{debug, info, trace};

use crate::command::Command;
use crate::direction::Direction;
use crate::error::{GameError, Result};
use crate::render::{RenderEvent, Renderer};
use crate::session::{GameSession, GameState};
use crate::source::{CommandSource, TileSource};

pub struct Game<I> {
    session: GameSession,
    input: I,
    renderers: Vec<Box<dyn Renderer>>,
}

impl<I> Game<I>
where
    I: CommandSource + TileSource,
{
    pub fn new(session: GameSession, input: I) -> Self {
        Self {
            session,
            input,
            renderers: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_parts(self) -> (GameSession, I) {
        (self.session, self.input)
    }

    /// Plays games until the player quits or the input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.play() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(GameError::InputClosed) => {
                    debug!("input closed while placing a tile, quitting");
                    self.session.record_max();
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        for renderer in &mut self.renderers {
            renderer.finalize()?;
        }

        Ok(())
    }

    /// Plays one game. Returns `true` if another game should follow.
    pub fn play(&mut self) -> Result<bool> {
        self.clear()?;
        self.spawn()?;

        loop {
            self.spawn()?;

            let state = self.session.state();

            if state.is_over() {
                self.finish(state)?;
            }

            loop {
                let command = match self.input.next_command() {
                    Ok(command) => command,
                    Err(GameError::InputClosed) => {
                        debug!("input closed, quitting");
                        Command::Quit
                    }
                    Err(e) => return Err(e),
                };

                match command {
                    Command::Move(direction) => {
                        if state.is_over() {
                            trace!("ignoring {} after the game ended", direction);
                            continue;
                        }

                        if self.tilt(direction)? {
                            break;
                        }
                    }
                    Command::NewGame => {
                        self.session.record_max();
                        info!("New game requested");
                        return Ok(true);
                    }
                    Command::Quit => {
                        // a finished game was already reported by `finish`
                        if !state.is_over() {
                            self.session.record_max();
                            self.report_score()?;
                            self.session.log_summary();
                        }
                        return Ok(false);
                    }
                }
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.session.clear();
        info!("Starting a new game");

        self.emit(RenderEvent::Cleared)?;
        self.report_score()
    }

    fn spawn(&mut self) -> Result<()> {
        if let Some(tile) = self.session.place_random_tile(&mut self.input)? {
            self.emit(RenderEvent::TileAdded {
                value: tile.value,
                at: (tile.row, tile.col),
            })?;
        }

        Ok(())
    }

    /// Returns whether the board changed.
    fn tilt(&mut self, direction: Direction) -> Result<bool> {
        let tilt = self.session.tilt(direction);

        for slide in tilt.slides.iter().copied() {
            self.emit(slide.into())?;
        }

        self.report_score()?;

        if !tilt.changed {
            debug!("{} does not change the board", direction);
        }

        Ok(tilt.changed)
    }

    fn finish(&mut self, state: GameState) -> Result<()> {
        self.session.record_max();
        self.session.log_summary();
        self.report_score()?;
        self.emit(RenderEvent::GameOver { state })
    }

    fn report_score(&mut self) -> Result<()> {
        self.emit(RenderEvent::Score {
            current: self.session.score(),
            max: self.session.max_score(),
        })
    }

    fn emit(&mut self, event: RenderEvent) -> Result<()> {
        trace!("{:?}", event);

        for renderer in &mut self.renderers {
            renderer.handle_event(&event)?;
        }

        Ok(())
    }
}
