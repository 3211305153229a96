use alloc::collections::VecDeque;
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// The first reveal may go straight from `NotStarted` to `Won` when the cascade clears the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No mines placed yet
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from the first reveal to a win or a loss. Start over by building a new engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine<G = RandomLayoutGenerator> {
    config: GameConfig,
    generator: G,
    mine_layout: Option<MineLayout>,
    board: Array2<EngineCell>,
    markers: Array2<Option<EndMarker>>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GameEngine<RandomLayoutGenerator> {
    /// Fresh `rows` x `cols` game with `mines` mines placed from `seed` on the first reveal.
    pub fn new_game(rows: Coord, cols: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((rows, cols), mines)?;
        Ok(Self::new(config, seed))
    }

    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::build(config, RandomLayoutGenerator::new(seed))
    }
}

impl GameEngine<PresetLayoutGenerator> {
    /// Game that plays on a fixed layout.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config()?;
        Ok(Self::build(config, PresetLayoutGenerator::new(layout)))
    }
}

impl<G: MineLayoutGenerator> GameEngine<G> {
    /// Game on `config` using a custom generator, which must accept the config.
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        generator.check_config(config)?;
        Ok(Self::build(config, generator))
    }

    fn build(config: GameConfig, generator: G) -> Self {
        let shape = config.size().to_nd_index();
        Self {
            config,
            generator,
            mine_layout: None,
            board: Array2::default(shape),
            markers: Array2::default(shape),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::NotStarted,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    /// Mines minus placed flags, never negative.
    pub fn flags_remaining(&self) -> CellCount {
        self.config.mines() - self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        CellView {
            cell: self.board[coords.to_nd_index()],
            marker: self.markers[coords.to_nd_index()],
        }
    }

    /// `None` until mines have been placed.
    pub fn is_mine(&self, coords: Coord2) -> Option<bool> {
        self.mine_layout
            .as_ref()
            .map(|layout| layout.contains_mine(coords))
    }

    /// `None` until mines have been placed, or when `coords` holds a mine.
    pub fn adjacent_mines(&self, coords: Coord2) -> Option<u8> {
        let layout = self.mine_layout.as_ref()?;
        (!layout.contains_mine(coords)).then(|| layout.adjacent_mine_count(coords))
    }

    /// Whether revealing an already open number here would open its neighbors.
    pub fn can_bulk_reveal_at(&self, coords: Coord2) -> bool {
        if !matches!(self.status, GameStatus::InProgress) {
            return false;
        }

        match self.board[coords.to_nd_index()] {
            EngineCell::Revealed(count) if count > 0 => {
                count == self.count_flagged_neighbors(coords)
                    && self
                        .board
                        .iter_neighbors(coords)
                        .any(|pos| self.board[pos.to_nd_index()] == EngineCell::Hidden)
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::from_engine(self)
    }

    /// Primary action. Opens a hidden cell, or bulk-reveals around an open number whose flags
    /// add up. Mines are placed on the first call that opens a cell.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use EngineCell::*;

        let coords = self.config.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(match self.board[coords.to_nd_index()] {
            Flagged | Revealed(0) => RevealOutcome::NoChange,
            Revealed(count) => self.bulk_reveal(coords, count),
            Hidden => {
                if self.status.is_initial() {
                    self.place_mines(coords);
                }
                self.reveal_single_cell(coords)
            }
        })
    }

    /// Secondary action. Flags a hidden cell while flags remain, or removes an existing flag.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use EngineCell::*;

        let coords = self.config.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        Ok(match self.board[coords.to_nd_index()] {
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Hidden if self.flags_remaining() > 0 => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Hidden => {
                log::debug!("No flags left, ignoring flag at {:?}", coords);
                FlagOutcome::NoChange
            }
            Revealed(_) => FlagOutcome::NoChange,
        })
    }

    fn place_mines(&mut self, start: Coord2) {
        let layout = self.generator.generate(self.config, start);
        log::debug!(
            "Placed {} mines, first reveal at {:?}",
            layout.mine_count(),
            start
        );
        self.mine_layout = Some(layout);
        self.status = GameStatus::InProgress;
    }

    /// Opens every hidden neighbor when the flags around `coords` match its count exactly.
    fn bulk_reveal(&mut self, coords: Coord2, count: u8) -> RevealOutcome {
        let flagged = self.count_flagged_neighbors(coords);
        if flagged != count {
            log::debug!(
                "Bulk reveal at {:?} skipped, {} flags around a {}",
                coords,
                flagged,
                count
            );
            return RevealOutcome::NoChange;
        }

        let mut outcome = RevealOutcome::NoChange;
        for pos in self.board.iter_neighbors(coords) {
            if self.status.is_finished() {
                break;
            }
            outcome = outcome | self.reveal_single_cell(pos);
        }
        outcome
    }

    /// Opens `coords` if hidden, flood-filling zero regions with a worklist.
    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(layout) = self.mine_layout.as_ref() else {
            return RevealOutcome::NoChange;
        };
        if self.board[coords.to_nd_index()] != EngineCell::Hidden {
            return RevealOutcome::NoChange;
        }

        if layout.contains_mine(coords) {
            log::debug!("Hit mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            // the Hidden -> Revealed transition guards against visiting twice, and flags stay shut
            if self.board[visit_coords.to_nd_index()] != EngineCell::Hidden {
                continue;
            }

            let count = layout.adjacent_mine_count(visit_coords);
            self.board[visit_coords.to_nd_index()] = EngineCell::Revealed(count);
            self.revealed_count += 1;
            log::trace!("Opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                let board = &self.board;
                to_visit.extend(
                    board
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| board[pos.to_nd_index()] == EngineCell::Hidden),
                );
            }
        }

        if self.revealed_count == layout.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!("Game ended: {:?}", self.status);
        self.reveal_mines(!won);
    }

    /// Marks unflagged mines (exposed on a loss, confirmed on a win) and wrong flags. Only the
    /// marker overlay changes.
    fn reveal_mines(&mut self, loss: bool) {
        let Some(layout) = self.mine_layout.as_ref() else {
            return;
        };

        let mine_marker = if loss {
            EndMarker::Exposed
        } else {
            EndMarker::Confirmed
        };
        Zip::from(&mut self.markers)
            .and(&self.board)
            .and(layout.mine_mask())
            .for_each(|marker, &cell, &is_mine| {
                *marker = match (cell, is_mine) {
                    (EngineCell::Flagged, false) => Some(EndMarker::Misflagged),
                    (EngineCell::Flagged, true) => None,
                    (_, true) => Some(mine_marker),
                    (_, false) => None,
                };
            });

        if let Some(coords) = self.triggered_mine {
            self.markers[coords.to_nd_index()] = Some(EndMarker::Triggered);
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        let mut flagged = 0;
        for pos in self.board.iter_neighbors(coords) {
            if self.board[pos.to_nd_index()] == EngineCell::Flagged {
                flagged += 1;
            }
        }
        flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    fn preset(size: Coord2, mines: &[Coord2]) -> GameEngine<PresetLayoutGenerator> {
        GameEngine::from_layout(layout(size, mines)).unwrap()
    }

    fn revealed_cells<G: MineLayoutGenerator>(engine: &GameEngine<G>) -> Vec<Coord2> {
        let (rows, cols) = engine.size();
        let mut cells = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                if matches!(engine.cell_at((row, col)), EngineCell::Revealed(_)) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn new_game_starts_hidden_without_mines() {
        let engine = GameEngine::new_game(10, 10, 10, 1).unwrap();

        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert_eq!(engine.flags_remaining(), 10);
        assert!(engine.mine_layout().is_none());
        assert_eq!(engine.is_mine((0, 0)), None);
        assert!(engine.board.iter().all(|&cell| cell == EngineCell::Hidden));
    }

    #[test]
    fn new_game_rejects_bad_configuration() {
        assert!(matches!(
            GameEngine::new_game(10, 10, 100, 1),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert!(GameEngine::new_game(0, 10, 1, 1).is_err());
        assert!(GameEngine::new_game(10, 10, 0, 1).is_err());
    }

    #[test]
    fn custom_generator_must_fit_config() {
        let generator = PresetLayoutGenerator::new(layout((3, 3), &[(1, 1)]));
        let config = GameConfig::new((10, 10), 1).unwrap();

        assert_eq!(
            GameEngine::with_generator(config, generator.clone()),
            Err(GameError::InvalidConfiguration {
                rows: 10,
                cols: 10,
                mines: 1
            })
        );

        let config = GameConfig::new((3, 3), 1).unwrap();
        let mut engine = GameEngine::with_generator(config, generator).unwrap();
        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(engine.cell_at((0, 0)), EngineCell::Revealed(1));
    }

    #[test]
    fn random_generator_accepts_any_valid_config() {
        let config = GameConfig::new((2, 2), 3).unwrap();
        let mut engine = GameEngine::with_generator(config, RandomLayoutGenerator::new(5)).unwrap();

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.mine_layout().unwrap().mine_count(), 3);
        assert_eq!(engine.flags_remaining(), 3);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut engine = GameEngine::new_game(5, 4, 3, 1).unwrap();

        assert_eq!(engine.reveal((5, 0)), Err(GameError::OutOfBounds((5, 0))));
        assert_eq!(engine.toggle_flag((0, 4)), Err(GameError::OutOfBounds((0, 4))));
        assert_eq!(engine.status(), GameStatus::NotStarted);
    }

    #[test]
    fn first_reveal_is_never_a_mine() {
        for seed in 0..300 {
            let start = ((seed % 8) as Coord, (seed / 8 % 8) as Coord);
            let mut engine = GameEngine::new_game(8, 8, 60, seed).unwrap();

            let outcome = engine.reveal(start).unwrap();

            assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed}");
            assert_eq!(engine.is_mine(start), Some(false));
            let layout = engine.mine_layout().unwrap();
            assert_eq!(layout.mine_count(), 60);
        }
    }

    #[test]
    fn first_reveal_on_preset_mine_moves_it() {
        let mut engine = preset((3, 3), &[(0, 0)]);

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_ne!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.is_mine((0, 0)), Some(false));
        assert_eq!(engine.is_mine((0, 1)), Some(true));
    }

    #[test]
    fn adjacency_matches_layout_for_random_games() {
        for seed in 0..50 {
            let mut engine = GameEngine::new_game(12, 9, 25, seed).unwrap();
            engine.reveal((6, 4)).unwrap();
            let layout = engine.mine_layout().unwrap().clone();

            for row in 0..12 {
                for col in 0..9 {
                    let coords = (row, col);
                    if layout.contains_mine(coords) {
                        assert_eq!(engine.adjacent_mines(coords), None);
                        continue;
                    }
                    let expected = NeighborIter::new(coords, (12, 9))
                        .filter(|&pos| layout.contains_mine(pos))
                        .count() as u8;
                    assert_eq!(engine.adjacent_mines(coords), Some(expected));
                }
            }
        }
    }

    #[test]
    fn reveal_hits_mine_and_marks_board() {
        // mines at (0, 2) and (2, 2), flags on (0, 2) and the safe (1, 2)
        let mut engine = preset((3, 3), &[(0, 2), (2, 2)]);
        engine.reveal((0, 0)).unwrap();
        engine.toggle_flag((0, 2)).unwrap();
        engine.toggle_flag((1, 2)).unwrap();

        let outcome = engine.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.triggered_mine(), Some((2, 2)));
        assert_eq!(engine.view_at((2, 2)).marker, Some(EndMarker::Triggered));
        assert_eq!(engine.view_at((0, 2)).marker, None);
        assert_eq!(engine.view_at((1, 2)).marker, Some(EndMarker::Misflagged));
        assert_eq!(engine.view_at((1, 2)).cell, EngineCell::Flagged);
        assert_eq!(engine.is_mine((1, 2)), Some(false));
        assert_eq!(engine.cell_at((1, 1)), EngineCell::Revealed(2));
    }

    #[test]
    fn loss_exposes_unflagged_mines() {
        let mut engine = preset((1, 4), &[(0, 0), (0, 3)]);
        engine.reveal((0, 1)).unwrap();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(engine.view_at((0, 0)).symbol(), "*");
        assert_eq!(engine.view_at((0, 3)).marker, Some(EndMarker::Exposed));
        assert_eq!(engine.view_at((0, 3)).symbol(), "X");
    }

    #[test]
    fn finished_game_ignores_moves() {
        let mut engine = preset((1, 4), &[(0, 0), (0, 3)]);
        engine.reveal((0, 1)).unwrap();
        engine.reveal((0, 0)).unwrap();
        let before = engine.clone();

        assert_eq!(engine.reveal((0, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((0, 3)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn won_game_ignores_moves() {
        let mut engine = preset((1, 3), &[(0, 0)]);
        assert_eq!(engine.reveal((0, 2)).unwrap(), RevealOutcome::Won);
        let before = engine.clone();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((0, 0)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine, before);
    }

    #[test]
    fn flood_fill_clears_board_around_corner_mine() {
        // . . . . .
        // . . . . .
        // . . . . .
        // . . . . *
        let mut engine = preset((4, 5), &[(3, 4)]);

        let outcome = engine.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.revealed_count(), 19);
        assert_eq!(engine.cell_at((0, 0)), EngineCell::Revealed(0));
        assert_eq!(engine.cell_at((2, 3)), EngineCell::Revealed(1));
        assert_eq!(engine.cell_at((2, 4)), EngineCell::Revealed(1));
        assert_eq!(engine.cell_at((3, 3)), EngineCell::Revealed(1));
        assert_eq!(engine.cell_at((3, 4)), EngineCell::Hidden);
        assert_eq!(engine.view_at((3, 4)).marker, Some(EndMarker::Confirmed));
    }

    #[test]
    fn flood_fill_stops_at_numbers_and_flags() {
        // column 2 is a wall of mines
        let mut engine = preset((3, 5), &[(0, 2), (1, 2), (2, 2)]);
        engine.toggle_flag((1, 0)).unwrap();

        let outcome = engine.reveal((0, 4)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        let right_side: [Coord2; 6] = [(0, 3), (0, 4), (1, 3), (1, 4), (2, 3), (2, 4)];
        assert_eq!(revealed_cells(&engine), right_side);
        assert_eq!(engine.cell_at((1, 0)), EngineCell::Flagged);

        // the flagged cell survives a cascade on the left side too
        engine.reveal((0, 0)).unwrap();
        assert_eq!(engine.cell_at((1, 0)), EngineCell::Flagged);
        assert_eq!(engine.cell_at((0, 0)), EngineCell::Revealed(0));
        assert_eq!(engine.cell_at((0, 1)), EngineCell::Revealed(2));
        assert_eq!(engine.cell_at((2, 0)), EngineCell::Hidden);
        assert_eq!(engine.cell_at((2, 1)), EngineCell::Hidden);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn fixed_layout_cascade_matches_precomputed_region() {
        // 10x10, 10 mines, nothing around (0, 0)
        let mines = [
            (0, 5),
            (1, 8),
            (3, 2),
            (4, 6),
            (5, 0),
            (6, 4),
            (7, 8),
            (8, 1),
            (9, 5),
            (9, 9),
        ];
        let mut engine = preset((10, 10), &mines);

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        // zero cells reached from (0, 0) plus the numbered cells bordering them
        #[rustfmt::skip]
        let expected: [Coord2; 36] = [
            (0, 0), (0, 1), (0, 2), (0, 3), (0, 4),
            (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6), (1, 7),
            (2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7),
            (3, 0), (3, 1), (3, 3), (3, 4), (3, 5), (3, 6), (3, 7),
            (4, 0), (4, 1), (4, 3), (4, 4), (4, 5),
            (5, 3), (5, 4), (5, 5),
        ];
        assert_eq!(revealed_cells(&engine), expected);
        assert_eq!(engine.cell_at((0, 4)), EngineCell::Revealed(1));
        assert_eq!(engine.cell_at((1, 1)), EngineCell::Revealed(0));
        assert_eq!(engine.cell_at((2, 1)), EngineCell::Revealed(1));
        assert_eq!(engine.cell_at((5, 5)), EngineCell::Revealed(2));
        assert_eq!(engine.cell_at((3, 2)), EngineCell::Hidden);
        assert_eq!(engine.cell_at((2, 8)), EngineCell::Hidden);
        assert_eq!(engine.cell_at((4, 1)), EngineCell::Revealed(2));
    }

    #[test]
    fn toggle_flag_twice_restores_state() {
        let mut engine = GameEngine::new_game(5, 5, 3, 9).unwrap();

        assert_eq!(engine.toggle_flag((2, 2)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(engine.flags_remaining(), 2);
        assert_eq!(engine.cell_at((2, 2)), EngineCell::Flagged);

        assert_eq!(engine.toggle_flag((2, 2)).unwrap(), FlagOutcome::Unflagged);
        assert_eq!(engine.flags_remaining(), 3);
        assert_eq!(engine.cell_at((2, 2)), EngineCell::Hidden);
    }

    #[test]
    fn flagging_stops_when_no_flags_remain() {
        let mut engine = GameEngine::new_game(4, 4, 2, 3).unwrap();
        engine.toggle_flag((0, 0)).unwrap();
        engine.toggle_flag((0, 1)).unwrap();

        assert_eq!(engine.toggle_flag((0, 2)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine.flags_remaining(), 0);
        assert_eq!(engine.cell_at((0, 2)), EngineCell::Hidden);

        // removing a flag frees one up again
        engine.toggle_flag((0, 0)).unwrap();
        assert_eq!(engine.toggle_flag((0, 2)).unwrap(), FlagOutcome::Flagged);
    }

    #[test]
    fn flagged_cell_blocks_reveal() {
        let mut engine = preset((3, 3), &[(2, 2)]);
        engine.toggle_flag((0, 0)).unwrap();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert!(engine.mine_layout().is_none());
    }

    #[test]
    fn flags_on_revealed_cells_are_ignored() {
        let mut engine = preset((3, 3), &[(2, 2)]);
        engine.reveal((1, 1)).unwrap();

        assert_eq!(engine.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine.flags_remaining(), 1);
    }

    #[test]
    fn bulk_reveal_fires_when_flags_match() {
        // * . .
        // . . .
        // . . .
        let mut engine = preset((3, 3), &[(0, 0)]);
        engine.reveal((1, 1)).unwrap();
        assert_eq!(engine.cell_at((1, 1)), EngineCell::Revealed(1));
        engine.toggle_flag((0, 0)).unwrap();
        assert!(engine.can_bulk_reveal_at((1, 1)));

        let outcome = engine.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.cell_at((0, 0)), EngineCell::Flagged);
        assert_eq!(engine.cell_at((2, 2)), EngineCell::Revealed(0));
        assert_eq!(engine.cell_at((0, 1)), EngineCell::Revealed(1));
    }

    #[test]
    fn bulk_reveal_needs_exact_flag_count() {
        // * . *
        // . . .
        // . . .
        let mut engine = preset((3, 3), &[(0, 0), (0, 2)]);
        engine.reveal((1, 1)).unwrap();
        assert_eq!(engine.cell_at((1, 1)), EngineCell::Revealed(2));
        engine.toggle_flag((0, 0)).unwrap();
        let before = engine.clone();

        assert!(!engine.can_bulk_reveal_at((1, 1)));
        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn bulk_reveal_with_wrong_flag_hits_mine() {
        // * . .
        // . . .
        // . . .
        let mut engine = preset((3, 3), &[(0, 0)]);
        engine.reveal((1, 1)).unwrap();
        engine.toggle_flag((0, 1)).unwrap();

        let outcome = engine.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        assert_eq!(engine.view_at((0, 1)).marker, Some(EndMarker::Misflagged));
    }

    #[test]
    fn reveal_on_open_zero_is_a_no_op() {
        let mut engine = preset((4, 4), &[(3, 3)]);
        engine.toggle_flag((3, 2)).unwrap();
        engine.reveal((0, 0)).unwrap();
        let before = engine.clone();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn winning_confirms_remaining_mines() {
        let mut engine = preset((1, 3), &[(0, 0)]);

        assert_eq!(engine.reveal((0, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.status(), GameStatus::Won);
        assert!(engine.is_finished());
        assert_eq!(engine.triggered_mine(), None);
        assert_eq!(engine.view_at((0, 0)).marker, Some(EndMarker::Confirmed));
        assert_eq!(engine.view_at((0, 0)).symbol(), "!");
        assert_eq!(engine.cell_at((0, 0)), EngineCell::Hidden);
    }

    #[test]
    fn random_games_won_by_revealing_every_safe_cell() {
        for seed in 0..40 {
            let mut engine = GameEngine::new_game(8, 8, 10, seed).unwrap();
            engine.reveal((0, 0)).unwrap();
            let layout = engine.mine_layout().unwrap().clone();

            for row in 0..8 {
                for col in 0..8 {
                    if !layout.contains_mine((row, col)) {
                        assert_ne!(engine.reveal((row, col)).unwrap(), RevealOutcome::HitMine);
                    }
                }
            }

            assert_eq!(engine.status(), GameStatus::Won, "seed {seed}");
            assert_eq!(engine.revealed_count(), 54);
            for coords in layout.iter_mines() {
                assert_eq!(engine.view_at(coords).marker, Some(EndMarker::Confirmed));
            }
        }
    }
}
