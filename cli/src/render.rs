use std::fmt;

use sweeper_core::*;

pub fn face(status: GameStatus) -> &'static str {
    match status {
        GameStatus::NotStarted | GameStatus::InProgress => ":D",
        GameStatus::Won => "8)",
        GameStatus::Lost => "D:",
    }
}

fn digits(value: Coord) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// HUD line followed by the grid, rows and columns labelled with the indices commands expect.
/// Open numbers whose flags already add up are listed last.
pub struct BoardView<'a, G> {
    engine: &'a GameEngine<G>,
    elapsed_secs: u64,
}

impl<'a, G: MineLayoutGenerator> BoardView<'a, G> {
    pub fn new(engine: &'a GameEngine<G>, elapsed_secs: u64) -> Self {
        Self {
            engine,
            elapsed_secs,
        }
    }

    fn bulk_reveal_ready(&self) -> impl Iterator<Item = Coord2> + '_ {
        let (rows, cols) = self.engine.size();
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter(move |&coords| self.engine.can_bulk_reveal_at(coords))
    }
}

impl<G: MineLayoutGenerator> fmt::Display for BoardView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.engine;
        let (rows, cols) = engine.size();
        let row_width = digits(rows.saturating_sub(1));
        let col_width = digits(cols.saturating_sub(1));

        writeln!(
            f,
            "Mines: {}  {}  Time: {}s",
            engine.flags_remaining(),
            face(engine.status()),
            self.elapsed_secs
        )?;

        write!(f, "{:row_width$}", "")?;
        for col in 0..cols {
            write!(f, " {col:>col_width$}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>row_width$}")?;
            for col in 0..cols {
                let symbol = engine.view_at((row, col)).symbol();
                write!(f, " {symbol:>col_width$}")?;
            }
            writeln!(f)?;
        }

        let mut ready = self.bulk_reveal_ready().peekable();
        if ready.peek().is_some() {
            write!(f, "Ready to open around:")?;
            for (row, col) in ready {
                write!(f, " [{row} {col}]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
