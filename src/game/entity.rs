//! Player and enemy entities.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Marker, Position};

/// Starting health and per-strike damage of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    /// Starting health.
    pub health: i32,
    /// Damage dealt per strike.
    pub damage: i32,
}

impl EntityStats {
    /// Create a stats block.
    #[must_use]
    pub const fn new(health: i32, damage: i32) -> Self {
        Self { health, damage }
    }
}

impl Default for EntityStats {
    fn default() -> Self {
        Self::new(10, 5)
    }
}

/// Which side an entity fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    /// The player.
    Player,
    /// An enemy.
    Enemy,
}

impl EntityKind {
    /// Grid marker written for this kind.
    #[must_use]
    pub const fn marker(self) -> Marker {
        match self {
            EntityKind::Player => Marker::Player,
            EntityKind::Enemy => Marker::Enemy,
        }
    }
}

/// A player or enemy on the grid.
///
/// Position is only changed by the motion resolver, which writes the
/// matching grid cell in the same step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    kind: EntityKind,
    position: Position,
    health: i32,
    damage: i32,
    defeated: bool,
}

impl Entity {
    /// Create an entity.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidStats`] unless both health and damage are
    /// strictly positive. Positive damage is what guarantees combat ends.
    pub fn new(
        name: impl Into<String>,
        kind: EntityKind,
        position: Position,
        stats: EntityStats,
    ) -> Result<Self, GameError> {
        let name = name.into();
        if stats.health <= 0 || stats.damage <= 0 {
            return Err(GameError::InvalidStats {
                name,
                health: stats.health,
                damage: stats.damage,
            });
        }

        Ok(Self {
            name,
            kind,
            position,
            health: stats.health,
            damage: stats.damage,
            defeated: false,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which side this entity is on.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Grid marker for this entity.
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.kind.marker()
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current health. May be negative after the killing blow.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Damage dealt per strike.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Whether this entity has lost a fight.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Whether health is still above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract `amount` from health. No floor at zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Deal this entity's damage to `target`.
    pub fn strike(&self, target: &mut Entity) {
        target.take_damage(self.damage);
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn mark_defeated(&mut self) {
        self.defeated = true;
    }
}

/// Live enemies.
///
/// Enemies are kept in spawn order until the first removal. Removal is a
/// swap-remove: the last enemy moves into the vacated slot, so indices and
/// relative order are not stable across removals. Nothing holds enemy
/// indices across a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnemyRegistry {
    enemies: Vec<Entity>,
}

impl EnemyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enemy at the end.
    pub fn push(&mut self, enemy: Entity) {
        self.enemies.push(enemy);
    }

    /// Remove the enemy at `index` in O(1), moving the last enemy into its slot.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn swap_remove(&mut self, index: usize) -> Option<Entity> {
        if index < self.enemies.len() {
            Some(self.enemies.swap_remove(index))
        } else {
            None
        }
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether no enemies remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Enemy at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.enemies.get(index)
    }

    /// Mutable enemy at `index`.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.enemies.get_mut(index)
    }

    /// Iterate over enemies in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.enemies.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.enemies.iter_mut()
    }

    /// Indices of enemies standing on `position`, ascending.
    #[must_use]
    pub fn indices_at(&self, position: Position) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.position == position)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Enemies as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.enemies
    }
}
