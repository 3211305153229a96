use sweeper_core::*;
use web_time::{Duration, Instant};

/// The one engine the terminal plays on, plus the elapsed-time display the engine leaves out.
pub struct Session {
    config: GameConfig,
    base_seed: u64,
    games_started: u64,
    engine: GameEngine,
    started_at: Option<Instant>,
    final_time: Option<Duration>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            base_seed: seed,
            games_started: 0,
            engine: GameEngine::new(config, seed),
            started_at: None,
            final_time: None,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Drops the current game and deals a fresh one with the next seed.
    pub fn new_game(&mut self) {
        self.games_started += 1;
        let seed = self.base_seed.wrapping_add(self.games_started);
        log::debug!("New game with seed {}", seed);
        self.engine = GameEngine::new(self.config, seed);
        self.started_at = None;
        self.final_time = None;
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.engine.reveal(coords)?;
        self.tick_timer();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.engine.toggle_flag(coords)
    }

    /// Whole seconds since the first reveal, frozen once the game ends.
    pub fn elapsed_secs(&self) -> u64 {
        match (self.final_time, self.started_at) {
            (Some(final_time), _) => final_time.as_secs(),
            (None, Some(started_at)) => started_at.elapsed().as_secs(),
            (None, None) => 0,
        }
    }

    fn tick_timer(&mut self) {
        let status = self.engine.status();
        if status.is_initial() {
            return;
        }

        let started_at = *self.started_at.get_or_insert_with(Instant::now);
        if status.is_finished() && self.final_time.is_none() {
            self.final_time = Some(started_at.elapsed());
        }
    }
}
