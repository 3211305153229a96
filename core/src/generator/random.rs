use serde::{Deserialize, Serialize};

use super::*;

/// Places mines uniformly at random over every cell except the starting one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(&self, config: GameConfig, start: Coord2) -> MineLayout {
        use rand::prelude::*;

        let start_index = linear_index(start, config.size().1);
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        // a valid config keeps mines below the cell count, so this never reaches zero while placing
        let mut free_cells = config.total_cells() - 1;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..config.mines() {
            // pick the n-th free cell in row-major order, skipping the start and placed mines
            let mut place = rng.random_range(0..free_cells);
            for (index, cell) in mines.iter_mut().enumerate() {
                if index == start_index || *cell {
                    continue;
                }
                if place == 0 {
                    *cell = true;
                    break;
                }
                place -= 1;
            }
            free_cells -= 1;
        }

        log::debug!(
            "Generated {} mines on {:?} board avoiding {:?} (seed {})",
            config.mines(),
            config.size(),
            start,
            self.seed
        );
        build_layout(mines)
    }
}

/// Wraps a mask produced from a validated [`GameConfig`].
pub(super) fn build_layout(mines: Array2<bool>) -> MineLayout {
    match MineLayout::from_mine_mask(mines) {
        Ok(layout) => layout,
        // a validated config always has a 1x1..255x255 shape
        Err(err) => unreachable!("generated mask rejected: {err}"),
    }
}
