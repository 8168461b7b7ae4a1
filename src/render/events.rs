use crate::board::Slide;
use crate::grid::Position;
use crate::session::GameState;

/// Events emitted during play that renderers can handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    /// A new game started on an empty board
    Cleared,

    TileAdded { value: u32, at: Position },

    TileMoved {
        value: u32,
        from: Position,
        to: Position,
    },

    /// `value` at `from` merged into the equal tile at `to`, which now holds `merged`
    TileMerged {
        value: u32,
        merged: u32,
        from: Position,
        to: Position,
    },

    Score { current: u32, max: u32 },

    /// The game reached `Won` or `Lost`; only a new game or quit is accepted now
    GameOver { state: GameState },
}

impl From<Slide> for RenderEvent {
    fn from(slide: Slide) -> Self {
        match slide {
            Slide::Moved { value, from, to } => RenderEvent::TileMoved { value, from, to },
            Slide::Merged {
                value,
                merged,
                from,
                to,
            } => RenderEvent::TileMerged {
                value,
                merged,
                from,
                to,
            },
        }
    }
}
