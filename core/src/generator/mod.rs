use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Decides where the mines go once the first cell to be revealed is known.
pub trait MineLayoutGenerator {
    /// Builds a layout for `config` that never has a mine at `start`.
    fn generate(&self, config: GameConfig, start: Coord2) -> MineLayout;

    /// Rejects a `config` this generator cannot fill.
    fn check_config(&self, _config: GameConfig) -> Result<()> {
        Ok(())
    }
}
