//! Game state and the per-turn resolver.
//!
//! [`GameState`] owns the grid, the player and the enemy registry, and is
//! the only writer of entity markers. Grid markers and entity positions are
//! two records of the same fact; every mutation here updates both in the
//! same call. [`check_invariants`](crate::game::check_invariants) verifies
//! they agree.
//!
//! Nothing here is synchronized. A `GameState` must not be driven from two
//! threads at once; `&mut self` on every mutating method enforces that.

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::{GameConfig, MAX_DIMENSION};
use crate::error::GameError;
use crate::game::{
    place, random_step, resolve_combat, try_move, CombatOutcome, Delta, EnemyRegistry, Entity,
    EntityKind, Grid, Marker, MoveOutcome, Position,
};

/// Where the player starts.
pub const PLAYER_START: Position = Position::new(0, 0);

/// Overall game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    /// Player alive, enemies remain.
    Running,
    /// Every enemy has been defeated.
    Cleared,
    /// The player lost a fight.
    PlayerDefeated,
}

/// Result of one fight between the player and an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EncounterOutcome {
    /// The enemy was defeated and removed.
    PlayerWon,
    /// The player was defeated.
    EnemyWon,
}

/// One fight triggered by a player move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encounter {
    /// Name of the enemy fought.
    pub enemy: String,
    /// Who won.
    pub outcome: EncounterOutcome,
    /// Strikes exchanged.
    pub strikes: u32,
    /// Player health after the fight.
    pub player_health: i32,
    /// Enemy health after the fight.
    pub enemy_health: i32,
}

/// Everything that happened in one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Turn number this report belongs to (1-based).
    pub turn: u32,
    /// Player move result, `None` if the player waited.
    pub player_move: Option<MoveOutcome>,
    /// Fights triggered by the move, in resolution order.
    pub encounters: Vec<Encounter>,
    /// Enemies that changed cell while wandering.
    pub enemies_moved: usize,
    /// Status after the turn.
    pub status: GameStatus,
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    player: Entity,
    enemies: EnemyRegistry,
    turn: u32,
    enemies_defeated: usize,
}

impl GameState {
    /// Set up a new game from configuration.
    ///
    /// The player starts at [`PLAYER_START`]; enemies are placed on distinct
    /// random empty cells drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are not positive or exceed
    /// [`MAX_DIMENSION`], if entity stats are invalid, or if the enemies do
    /// not fit on the grid.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, GameError> {
        if config.width > MAX_DIMENSION || config.height > MAX_DIMENSION {
            return Err(GameError::GridTooLarge {
                width: config.width,
                height: config.height,
                max: MAX_DIMENSION,
            });
        }
        let mut grid = Grid::new(config.width, config.height)?;
        let player = Entity::new("player", EntityKind::Player, PLAYER_START, config.player)?;
        place(&mut grid, &player)?;

        let free: Vec<Position> = grid
            .iter()
            .filter(|(_, marker)| *marker == Marker::Empty)
            .map(|(position, _)| position)
            .collect();
        if config.enemies > free.len() {
            return Err(GameError::TooManyEnemies {
                requested: config.enemies,
                free: free.len(),
            });
        }

        let mut enemies = EnemyRegistry::new();
        for (n, position) in free.choose_multiple(rng, config.enemies).enumerate() {
            let enemy = Entity::new(
                format!("enemy-{}", n + 1),
                EntityKind::Enemy,
                *position,
                config.enemy,
            )?;
            place(&mut grid, &enemy)?;
            enemies.push(enemy);
        }

        info!(
            "new {}x{} game with {} enemies",
            config.width,
            config.height,
            enemies.len()
        );

        Ok(Self {
            grid,
            player,
            enemies,
            turn: 0,
            enemies_defeated: 0,
        })
    }

    /// Set up a game with hand-placed entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid, an entity is off the
    /// grid, or two entities share a cell.
    pub fn with_layout(
        width: i32,
        height: i32,
        player: Entity,
        enemies: Vec<Entity>,
    ) -> Result<Self, GameError> {
        let mut grid = Grid::new(width, height)?;
        let mut registry = EnemyRegistry::new();

        for entity in std::iter::once(&player).chain(enemies.iter()) {
            let position = entity.position();
            if grid.at(position).is_some_and(|marker| marker != Marker::Empty) {
                return Err(GameError::Occupied {
                    row: position.row,
                    col: position.col,
                });
            }
            place(&mut grid, entity)?;
        }
        for enemy in enemies {
            registry.push(enemy);
        }

        Ok(Self {
            grid,
            player,
            enemies: registry,
            turn: 0,
            enemies_defeated: 0,
        })
    }

    /// The grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid for tests that corrupt the board on purpose.
    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Entity {
        &self.player
    }

    /// Live enemies.
    #[must_use]
    pub const fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    /// Turns completed so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Enemies defeated so far.
    #[must_use]
    pub const fn enemies_defeated(&self) -> usize {
        self.enemies_defeated
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.player.is_defeated() {
            GameStatus::PlayerDefeated
        } else if self.enemies.is_empty() {
            GameStatus::Cleared
        } else {
            GameStatus::Running
        }
    }

    /// Whether the game has reached a terminal status.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status() != GameStatus::Running
    }

    /// Move the player and resolve any fight at the destination.
    ///
    /// Returns the move outcome and the fights it triggered. A defeated
    /// player cannot move.
    pub fn move_player(&mut self, delta: Delta) -> (MoveOutcome, Vec<Encounter>) {
        if self.player.is_defeated() {
            warn!("ignoring move from defeated player");
            return (MoveOutcome::Blocked, Vec::new());
        }

        let outcome = try_move(&mut self.grid, &mut self.player, delta);
        let encounters = match outcome {
            MoveOutcome::Moved => self.resolve_collisions(),
            MoveOutcome::Blocked => Vec::new(),
        };
        (outcome, encounters)
    }

    /// Fight every enemy on the player's cell.
    ///
    /// Under single occupancy there is at most one. If there are several,
    /// they are fought in ascending registry index order and the sequence
    /// stops as soon as the player falls. Defeated enemies are swap-removed
    /// afterwards, highest index first, and the cell is left showing the
    /// winner's marker.
    fn resolve_collisions(&mut self) -> Vec<Encounter> {
        let position = self.player.position();
        let mut encounters = Vec::new();
        let mut defeated = Vec::new();

        for index in self.enemies.indices_at(position) {
            let Some(enemy) = self.enemies.get_mut(index) else {
                continue;
            };

            let report = resolve_combat(&mut self.player, enemy);
            let outcome = match report.outcome {
                CombatOutcome::AttackerWon => EncounterOutcome::PlayerWon,
                CombatOutcome::DefenderWon => EncounterOutcome::EnemyWon,
            };
            encounters.push(Encounter {
                enemy: enemy.name().to_owned(),
                outcome,
                strikes: report.strikes,
                player_health: report.attacker_health,
                enemy_health: report.defender_health,
            });

            match outcome {
                EncounterOutcome::PlayerWon => defeated.push(index),
                EncounterOutcome::EnemyWon => break,
            }
        }

        if encounters.is_empty() {
            return encounters;
        }

        for index in defeated.into_iter().rev() {
            if let Some(enemy) = self.enemies.swap_remove(index) {
                debug!("removed {} from registry", enemy.name());
                self.enemies_defeated += 1;
            }
        }

        let winner = if self.player.is_defeated() {
            Marker::Enemy
        } else {
            Marker::Player
        };
        if let Some(idx) = self.grid.index_of(position) {
            self.grid.cells_mut()[idx] = winner;
        }

        encounters
    }

    /// Let every enemy take one random step to a free neighbouring cell.
    ///
    /// Enemies never step onto an occupied cell, so wandering cannot start
    /// a fight. Returns how many enemies changed cell.
    pub fn wander_enemies<R: Rng + ?Sized>(&mut self, rng: &mut R, max_attempts: u32) -> usize {
        let mut moved = 0;
        for enemy in self.enemies.iter_mut() {
            let delta = random_step(rng, &self.grid, enemy, max_attempts);
            if delta != Delta::ZERO
                && try_move(&mut self.grid, enemy, delta) == MoveOutcome::Moved
            {
                moved += 1;
            }
        }
        moved
    }

    /// Play one full turn: the player's action, then enemy wandering.
    ///
    /// `None` means the player waits. Enemies only wander while the game is
    /// still running.
    pub fn take_turn<R: Rng + ?Sized>(
        &mut self,
        player_delta: Option<Delta>,
        rng: &mut R,
        max_attempts: u32,
    ) -> TurnReport {
        let (player_move, encounters) = match player_delta {
            Some(delta) => {
                let (outcome, encounters) = self.move_player(delta);
                (Some(outcome), encounters)
            }
            None => (None, Vec::new()),
        };

        let enemies_moved = if self.is_over() {
            0
        } else {
            self.wander_enemies(rng, max_attempts)
        };

        self.turn += 1;
        let status = self.status();
        if status != GameStatus::Running {
            info!("game over after {} turns: {status:?}", self.turn);
        }

        TurnReport {
            turn: self.turn,
            player_move,
            encounters,
            enemies_moved,
            status,
        }
    }
}
