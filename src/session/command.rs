//! Player commands and line-based input.

use std::io::{BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::game::Delta;
use crate::session::{CommandSource, SessionError};

/// One player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move one row up.
    North,
    /// Move one row down.
    South,
    /// Move one column right.
    East,
    /// Move one column left.
    West,
    /// Stay put for a turn.
    Wait,
    /// Leave the game.
    Quit,
}

impl Command {
    /// Displacement for movement commands, `None` for the rest.
    #[must_use]
    pub const fn delta(self) -> Option<Delta> {
        match self {
            Command::North => Some(Delta::NORTH),
            Command::South => Some(Delta::SOUTH),
            Command::East => Some(Delta::EAST),
            Command::West => Some(Delta::WEST),
            Command::Wait | Command::Quit => None,
        }
    }
}

/// Accepted words. Any unambiguous prefix of one selects it.
const WORDS: [(&str, Command); 10] = [
    ("north", Command::North),
    ("up", Command::North),
    ("south", Command::South),
    ("down", Command::South),
    ("east", Command::East),
    ("right", Command::East),
    ("west", Command::West),
    ("left", Command::West),
    ("wait", Command::Wait),
    ("quit", Command::Quit),
];

/// Why a line did not parse as a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    /// Blank input.
    #[error("no command given")]
    Empty,
    /// Nothing starts with the input.
    #[error("unknown command '{0}'")]
    Unknown(String),
    /// The input is a prefix of words meaning different things.
    #[error("'{input}' is ambiguous: {}", candidates.join(", "))]
    Ambiguous {
        /// What was typed.
        input: String,
        /// Words it could mean.
        candidates: Vec<&'static str>,
    },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(ParseCommandError::Empty);
        }

        if let Some((_, command)) = WORDS.iter().find(|(word, _)| *word == input) {
            return Ok(*command);
        }

        let matches: Vec<(&'static str, Command)> = WORDS
            .iter()
            .filter(|(word, _)| word.starts_with(&input))
            .copied()
            .collect();

        match matches.first() {
            None => Err(ParseCommandError::Unknown(input)),
            Some((_, first)) if matches.iter().all(|(_, c)| c == first) => Ok(*first),
            Some(_) => Err(ParseCommandError::Ambiguous {
                input,
                candidates: matches.iter().map(|(word, _)| *word).collect(),
            }),
        }
    }
}

/// Reads one command per line, prompting on `output`.
///
/// Lines that do not parse are reported on `output` and skipped; they do
/// not cost a turn.
#[derive(Debug)]
pub struct LineSource<R, W> {
    input: R,
    output: W,
    prompt: bool,
}

impl<R: BufRead, W: Write> LineSource<R, W> {
    /// Create a source that prints `> ` before each read.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prompt: true,
        }
    }

    /// Create a source that reads silently (scripts, pipes).
    pub fn quiet(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prompt: false,
        }
    }
}

impl<R: BufRead, W: Write> CommandSource for LineSource<R, W> {
    fn next_command(&mut self) -> Result<Option<Command>, SessionError> {
        let mut line = Vec::new();
        loop {
            if self.prompt {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            // Raw bytes: a line that is not UTF-8 is an unknown command, not an IO failure
            line.clear();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }

            match String::from_utf8_lossy(&line).parse::<Command>() {
                Ok(command) => return Ok(Some(command)),
                Err(ParseCommandError::Empty) => {}
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}
