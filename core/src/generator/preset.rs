use serde::{Deserialize, Serialize};

use super::random::build_layout;
use super::*;

/// Replays a fixed layout. A mine sitting on the first revealed cell is moved to the first free
/// cell in row-major order, so the first move stays safe and the mine count is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetLayoutGenerator {
    layout: MineLayout,
}

impl PresetLayoutGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MineLayoutGenerator for PresetLayoutGenerator {
    fn generate(&self, _config: GameConfig, start: Coord2) -> MineLayout {
        if !self.layout.contains_mine(start) {
            return self.layout.clone();
        }

        let mut mines = self.layout.mine_mask().clone();
        mines[start.to_nd_index()] = false;
        let start_index = (usize::from(start.0), usize::from(start.1));
        let relocated = mines
            .indexed_iter_mut()
            .find(|(index, is_mine)| !**is_mine && *index != start_index);
        if let Some(((row, col), cell)) = relocated {
            *cell = true;
            log::warn!("Moved preset mine off first reveal {:?} to {:?}", start, (row, col));
        }

        build_layout(mines)
    }

    /// The layout fixes both the board shape and the mine count.
    fn check_config(&self, config: GameConfig) -> Result<()> {
        if self.layout.size() != config.size() || self.layout.mine_count() != config.mines() {
            let (rows, cols) = config.size();
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: config.mines(),
            });
        }
        Ok(())
    }
}
