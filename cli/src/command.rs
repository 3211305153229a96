use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// A typed line of input, mapped onto the engine's primary and secondary actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("Expected `{0} <row> <col>`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" | "open" => Command::Reveal(parse_coords(&mut words, "reveal")?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words, "flag")?),
            "n" | "new" => Command::NewGame,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(verb.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(ParseCommandError::Unknown(extra.to_string()));
        }
        Ok(command)
    }
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<Coord2, ParseCommandError> {
    let (Some(row), Some(col)) = (words.next(), words.next()) else {
        return Err(ParseCommandError::MissingCoords(verb));
    };
    let parse = |word: &str| {
        word.parse::<Coord>()
            .map_err(|_| ParseCommandError::InvalidCoord(word.to_string()))
    };
    Ok((parse(row)?, parse(col)?))
}

pub const HELP: &str = "\
Commands:
  r <row> <col>   reveal a cell, or open around a number whose flags match
  f <row> <col>   place or remove a flag
  n               start a new game
  h               show this help
  q               quit";
