use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer shows after a move, one string of cell symbols per row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub status: GameStatus,
    pub flags_remaining: CellCount,
    pub cells: Vec<String>,
}

impl EngineSnapshot {
    pub fn from_engine<G: MineLayoutGenerator>(engine: &GameEngine<G>) -> Self {
        let (rows, cols) = engine.size();
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| engine.view_at((row, col)).symbol())
                    .collect()
            })
            .collect();

        Self {
            rows,
            cols,
            status: engine.status(),
            flags_remaining: engine.flags_remaining(),
            cells,
        }
    }
}
