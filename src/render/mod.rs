pub mod events;
pub mod terminal;

pub use events::RenderEvent;
pub use terminal::TerminalRenderer;

use crate::error::Result;

/// Display side of the game: receives every change to the board and score.
pub trait Renderer {
    /// Handle a render event during play
    fn handle_event(&mut self, event: &RenderEvent) -> Result<()>;

    /// Called once when the player quits
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
