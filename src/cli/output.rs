//! Output formatting utilities for CLI.

// Averages and rates over game counts
#![allow(clippy::cast_precision_loss)]

use gridcrawl::sim::{GameResult, Outcome};
use serde::Serialize;

/// Aggregated results of many headless games.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct SimulationStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games the player won.
    pub(super) player_wins: u64,
    /// Games the enemies won.
    pub(super) enemy_wins: u64,
    /// Games cut off by the turn limit.
    pub(super) turn_limits: u64,
    /// Games that failed to start.
    pub(super) errors: u64,
    /// Total turns across all games.
    total_turns: u64,
    /// Total enemies defeated across all games.
    total_defeated: u64,
}

impl SimulationStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);
        self.total_defeated += result.enemies_defeated as u64;

        match result.outcome {
            Outcome::PlayerWon => self.player_wins += 1,
            Outcome::EnemyWon => self.enemy_wins += 1,
            Outcome::TurnLimit => self.turn_limits += 1,
        }
    }

    /// Record a game that could not be played.
    pub(super) fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Merge stats gathered on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.player_wins += other.player_wins;
        self.enemy_wins += other.enemy_wins;
        self.turn_limits += other.turn_limits;
        self.errors += other.errors;
        self.total_turns += other.total_turns;
        self.total_defeated += other.total_defeated;
    }

    fn rate(&self, count: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        count as f64 / self.games_played as f64
    }

    /// Share of games the player won (0.0-1.0).
    pub(super) fn win_rate(&self) -> f64 {
        self.rate(self.player_wins)
    }

    /// Get average game length.
    pub(super) fn avg_turns(&self) -> f64 {
        self.rate(self.total_turns)
    }

    /// Get average enemies defeated per game.
    pub(super) fn avg_defeated(&self) -> f64 {
        self.rate(self.total_defeated)
    }
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// First seed; game `i` used `base_seed + i`.
    base_seed: u64,
    /// Total games played.
    games_played: u64,
    /// Games the player won.
    player_wins: u64,
    /// Games the enemies won.
    enemy_wins: u64,
    /// Games cut off by the turn limit.
    turn_limits: u64,
    /// Games that failed to start.
    errors: u64,
    /// Player win rate (0.0-1.0).
    win_rate: f64,
    /// Average game length in turns.
    avg_turns: f64,
    /// Average enemies defeated per game.
    avg_enemies_defeated: f64,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &SimulationStats, base_seed: u64) -> Self {
        Self {
            base_seed,
            games_played: stats.games_played,
            player_wins: stats.player_wins,
            enemy_wins: stats.enemy_wins,
            turn_limits: stats.turn_limits,
            errors: stats.errors,
            win_rate: stats.win_rate(),
            avg_turns: stats.avg_turns(),
            avg_enemies_defeated: stats.avg_defeated(),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(stats: &SimulationStats, base_seed: u64) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Simulation Results ({} games, base seed {base_seed})\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str(&format!(
        "  Player wins: {:.1}% ({})\n",
        stats.win_rate() * 100.0,
        stats.player_wins
    ));
    output.push_str(&format!(
        "  Enemy wins:  {:.1}% ({})\n",
        stats.rate(stats.enemy_wins) * 100.0,
        stats.enemy_wins
    ));
    output.push_str(&format!(
        "  Turn limit:  {:.1}% ({})\n",
        stats.rate(stats.turn_limits) * 100.0,
        stats.turn_limits
    ));
    if stats.errors > 0 {
        output.push_str(&format!("  Failed to start: {}\n", stats.errors));
    }

    output.push_str(&format!(
        "\nAverage Game Length: {:.0} turns\n",
        stats.avg_turns()
    ));
    output.push_str(&format!(
        "Average Enemies Defeated: {:.2}\n",
        stats.avg_defeated()
    ));

    output
}
