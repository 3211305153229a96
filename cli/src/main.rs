use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use sweeper_core::{CellCount, Coord, GameConfig};
use web_time::{SystemTime, UNIX_EPOCH};

use command::{Command, HELP};
use session::Session;

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(long, default_value_t = 10)]
    rows: Coord,

    /// Number of columns
    #[arg(long, default_value_t = 10)]
    cols: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of one taken from the clock
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a JSON snapshot after every command instead of the text grid
    #[arg(long)]
    json: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

fn show(session: &Session, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let snapshot = session.engine().snapshot();
        serde_json::to_writer(&mut *out, &snapshot).context("serializing snapshot")?;
        writeln!(out)?;
    } else {
        let board = render::BoardView::new(session.engine(), session.elapsed_secs());
        write!(out, "{board}")?;
    }
    out.flush().context("flushing stdout")
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new((args.rows, args.cols), args.mines)
        .context("invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}", seed);

    let mut session = Session::new(config, seed);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    if !args.json {
        writeln!(stdout, "{HELP}")?;
    }
    show(&session, args.json, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let result = match command {
            Command::Reveal(coords) => session.reveal(coords).map(|outcome| outcome.has_update()),
            Command::Flag(coords) => session
                .toggle_flag(coords)
                .map(|outcome| outcome.has_update()),
            Command::NewGame => {
                session.new_game();
                Ok(true)
            }
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        };

        match result {
            Ok(updated) => {
                log::trace!("updated: {}", updated);
                show(&session, args.json, &mut stdout)?;
            }
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }

    Ok(())
}
