//! Interactive game loop.
//!
//! A [`Session`] pulls one [`Command`] per turn from a [`CommandSource`],
//! applies it to the [`GameState`] and hands each frame and turn report to
//! a [`Renderer`]. One command is fully resolved (movement, any fight,
//! enemy wandering) before the next is read.

mod command;
mod render;

pub use command::{Command, LineSource, ParseCommandError};
pub use render::{describe_turn, render_ascii, render_markers, FrameStyle, TextRenderer};

use log::info;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{GameState, GameStatus, TurnReport};

/// Errors that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The game could not be set up.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Supplies player commands.
pub trait CommandSource {
    /// Next command, or `None` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input fails.
    fn next_command(&mut self) -> Result<Option<Command>, SessionError>;
}

/// Presents the game.
pub trait Renderer {
    /// Draw the current board.
    ///
    /// # Errors
    ///
    /// Returns an error if the output fails.
    fn frame(&mut self, state: &GameState) -> Result<(), SessionError>;

    /// Report what happened in a turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the output fails.
    fn turn(&mut self, report: &TurnReport) -> Result<(), SessionError>;
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEnd {
    /// Every enemy was defeated.
    Cleared,
    /// The player lost a fight.
    PlayerDefeated,
    /// The player asked to quit.
    Quit,
    /// The command source ran dry.
    EndOfInput,
    /// The configured turn limit was reached.
    TurnLimit,
}

/// Final tally of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Why the session stopped.
    pub end: SessionEnd,
    /// Turns played.
    pub turns: u32,
    /// Enemies defeated.
    pub enemies_defeated: usize,
    /// Player health at the end.
    pub player_health: i32,
}

/// A game in progress together with its random source.
#[derive(Debug)]
pub struct Session<R> {
    state: GameState,
    rng: R,
    max_turns: u32,
    wander_attempts: u32,
}

impl<R: Rng> Session<R> {
    /// Start a new game from configuration, spawning with `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be set up.
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Self, SessionError> {
        let state = GameState::new(config, &mut rng)?;
        Ok(Self::from_state(state, rng, config))
    }

    /// Wrap an existing game state.
    #[must_use]
    pub fn from_state(state: GameState, rng: R, config: &GameConfig) -> Self {
        Self {
            state,
            rng,
            max_turns: config.max_turns,
            wander_attempts: config.wander_attempts,
        }
    }

    /// The game being played.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Play until the game ends, the player quits, input runs out or the
    /// turn limit is hit.
    ///
    /// # Errors
    ///
    /// Returns an error if reading commands or rendering fails.
    pub fn run(
        &mut self,
        source: &mut dyn CommandSource,
        renderer: &mut dyn Renderer,
    ) -> Result<SessionSummary, SessionError> {
        renderer.frame(&self.state)?;

        let end = loop {
            match self.state.status() {
                GameStatus::Cleared => break SessionEnd::Cleared,
                GameStatus::PlayerDefeated => break SessionEnd::PlayerDefeated,
                GameStatus::Running => {}
            }
            if self.state.turn() >= self.max_turns {
                break SessionEnd::TurnLimit;
            }

            let command = match source.next_command()? {
                None => break SessionEnd::EndOfInput,
                Some(Command::Quit) => break SessionEnd::Quit,
                Some(command) => command,
            };

            let report =
                self.state
                    .take_turn(command.delta(), &mut self.rng, self.wander_attempts);
            renderer.turn(&report)?;
            renderer.frame(&self.state)?;
        };

        let summary = SessionSummary {
            end,
            turns: self.state.turn(),
            enemies_defeated: self.state.enemies_defeated(),
            player_health: self.state.player().health(),
        };
        info!("session ended: {summary:?}");
        Ok(summary)
    }
}
