use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Revealed(u8),
    Flagged,
}

/// Marker applied to a cell once the game ends. Kept apart from [`EngineCell`] so ending the game
/// never rewrites the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndMarker {
    /// The mine that ended the game.
    Triggered,
    /// An unflagged mine shown after a loss.
    Exposed,
    /// An unflagged mine auto-marked after a win.
    Confirmed,
    /// A flag placed on a safe cell.
    Misflagged,
}

/// What a renderer needs for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub cell: EngineCell,
    pub marker: Option<EndMarker>,
}

impl CellView {
    pub fn symbol(self) -> &'static str {
        const DIGITS: [&str; 9] = [" ", "1", "2", "3", "4", "5", "6", "7", "8"];

        match (self.marker, self.cell) {
            (Some(EndMarker::Triggered), _) => "*",
            (Some(EndMarker::Exposed), _) => "X",
            (Some(EndMarker::Confirmed), _) => "!",
            (Some(EndMarker::Misflagged), _) => "x",
            (None, EngineCell::Hidden) => ".",
            (None, EngineCell::Flagged) => "!",
            (None, EngineCell::Revealed(count)) => DIGITS.get(usize::from(count)).copied().unwrap_or("?"),
        }
    }
}

impl From<EngineCell> for CellView {
    fn from(cell: EngineCell) -> Self {
        Self { cell, marker: None }
    }
}
