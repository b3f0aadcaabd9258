//! Plain-text rendering of the board.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use std::io::Write;

use crate::game::{EncounterOutcome, GameState, GameStatus, Grid, MoveOutcome, TurnReport};
use crate::session::{Renderer, SessionError};

/// Render the board as one glyph per cell plus a status line.
///
/// ```text
/// @ . . . .
/// . . E . .
/// . . . . .
/// HP 10  Enemies 1  Turn 0
/// ```
#[must_use]
pub fn render_ascii(state: &GameState) -> String {
    let mut output = String::new();

    for row in state.grid().rows() {
        let line: Vec<String> = row.iter().map(|m| m.glyph().to_string()).collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }

    output.push_str(&format!(
        "HP {}  Enemies {}  Turn {}\n",
        state.player().health(),
        state.enemies().len(),
        state.turn()
    ));

    output
}

/// Render the raw marker matrix, e.g. `[[1 0 0] [0 2 0]]`.
#[must_use]
pub fn render_markers(grid: &Grid) -> String {
    let rows: Vec<String> = grid
        .rows()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|m| m.value().to_string()).collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    format!("[{}]", rows.join(" "))
}

/// Describe a turn in one or more short lines.
#[must_use]
pub fn describe_turn(report: &TurnReport) -> String {
    let mut output = String::new();

    if report.player_move == Some(MoveOutcome::Blocked) {
        output.push_str("You can't go that way.\n");
    }

    for encounter in &report.encounters {
        match encounter.outcome {
            EncounterOutcome::PlayerWon => output.push_str(&format!(
                "You defeated {} in {} strikes ({} HP left).\n",
                encounter.enemy, encounter.strikes, encounter.player_health
            )),
            EncounterOutcome::EnemyWon => output.push_str(&format!(
                "{} defeated you in {} strikes.\n",
                encounter.enemy, encounter.strikes
            )),
        }
    }

    match report.status {
        GameStatus::Running => {}
        GameStatus::Cleared => output.push_str("All enemies defeated. You win!\n"),
        GameStatus::PlayerDefeated => output.push_str("Game over.\n"),
    }

    output
}

/// Board layout a [`TextRenderer`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStyle {
    /// Glyph grid with status line.
    #[default]
    Ascii,
    /// Raw marker matrix.
    Markers,
}

/// Writes frames and turn summaries to any [`Write`].
#[derive(Debug)]
pub struct TextRenderer<W> {
    output: W,
    style: FrameStyle,
}

impl<W: Write> TextRenderer<W> {
    /// Create a renderer.
    pub fn new(output: W, style: FrameStyle) -> Self {
        Self { output, style }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn frame(&mut self, state: &GameState) -> Result<(), SessionError> {
        match self.style {
            FrameStyle::Ascii => write!(self.output, "{}", render_ascii(state))?,
            FrameStyle::Markers => writeln!(self.output, "{}", render_markers(state.grid()))?,
        }
        self.output.flush()?;
        Ok(())
    }

    fn turn(&mut self, report: &TurnReport) -> Result<(), SessionError> {
        write!(self.output, "{}", describe_turn(report))?;
        Ok(())
    }
}
