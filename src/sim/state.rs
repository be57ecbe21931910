//! Game state and core simulation types
//!
//! `GameState` is the read-only snapshot the presentation layer draws from.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::{Command, InputKey};
use super::item::Item;
use crate::consts::*;

/// Current/max hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Heal, clamped to `[0, max]`
    pub fn heal(&mut self, amount: i32) {
        self.current = self.current.saturating_add(amount).clamp(0, self.max);
    }

    /// Unclamped: overkill drives `current` below zero
    pub fn damage(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing direction, never zero
    pub direction: Vec2,
    pub radius: f32,
    pub health: Health,
    /// Key -> bound item. One item per key.
    pub inventory: BTreeMap<InputKey, Item>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            velocity: Vec2::ZERO,
            direction: Vec2::X,
            radius: PLAYER_RADIUS,
            health: Health::full(PLAYER_MAX_HEALTH),
            inventory: BTreeMap::new(),
        }
    }
}

impl Player {
    pub fn is_bound(&self, key: InputKey) -> bool {
        self.inventory.contains_key(&key)
    }

    /// Key currently holding the given command, if any
    pub fn key_for_command(&self, command: Command) -> Option<InputKey> {
        self.inventory
            .iter()
            .find(|(_, item)| item.as_command() == Some(command))
            .map(|(key, _)| *key)
    }
}

/// Monster archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterKind {
    Dummy,
    Melee,
    Shooter,
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    /// Cleared once health drops to zero or below; never set again
    pub alive: bool,
    pub kind: MonsterKind,
    pub name: String,
    pub position: Vec2,
    /// No steering yet; stays zero unless something sets it
    pub velocity: Vec2,
    pub radius: f32,
    pub health: Health,
}

impl Monster {
    pub fn new(kind: MonsterKind, name: impl Into<String>, radius: f32, health: Health) -> Self {
        Self {
            alive: true,
            kind,
            name: name.into(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            health,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

/// A fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: i32,
    /// Seconds left; removed once this reaches zero
    pub ttl: f32,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

/// Where ordinary key presses are routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Keys pick up the nearest item or activate the bound one
    #[default]
    Pickup,
    /// Keys drop the bound item back into the world
    Drop,
}

/// Things that happened during a frame, drained by the host (sound cues etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemPickedUp { key: InputKey, name: String },
    ItemDropped { key: InputKey, name: String },
    ItemActivated { key: InputKey, name: String },
    /// Activation attempt on a cooling-down or exhausted item
    ActivationRefused { key: InputKey, name: String },
    /// A command cannot be dropped
    DropRefused { key: InputKey, command: Command },
    ProjectileFired,
    MonsterHit { index: usize, damage: i32 },
    MonsterKilled { index: usize, name: String },
    InputModeChanged(InputMode),
    QuitRequested,
}

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Accumulated simulation time in seconds
    pub wallclock: f32,
    pub running: bool,
    pub mode: InputMode,
    pub mouse_position: Vec2,
    pub player: Player,
    pub world_items: Vec<Item>,
    pub world_projectiles: Vec<Projectile>,
    pub world_monsters: Vec<Monster>,
    /// Nearest live world item touching the player (index into `world_items`).
    /// Recomputed every update, cleared whenever `world_items` changes.
    pub closest_item: Option<usize>,
    /// Nearest live world item under the cursor
    pub mouseover_item: Option<usize>,
    /// Nearest live monster under the cursor
    pub mouseover_monster: Option<usize>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            wallclock: 0.0,
            running: false,
            mode: InputMode::Pickup,
            mouse_position: Vec2::ZERO,
            player: Player::default(),
            world_items: Vec::new(),
            world_projectiles: Vec::new(),
            world_monsters: Vec::new(),
            closest_item: None,
            mouseover_item: None,
            mouseover_monster: None,
            events: Vec::new(),
        }
    }
}

impl GameState {
    pub fn is_drop_mode(&self) -> bool {
        self.mode == InputMode::Drop
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            self.mode = mode;
            self.events.push(GameEvent::InputModeChanged(mode));
        }
    }

    pub fn closest_item(&self) -> Option<&Item> {
        self.closest_item.and_then(|i| self.world_items.get(i))
    }

    pub fn mouseover_item(&self) -> Option<&Item> {
        self.mouseover_item.and_then(|i| self.world_items.get(i))
    }

    pub fn mouseover_monster(&self) -> Option<&Monster> {
        self.mouseover_monster.and_then(|i| self.world_monsters.get(i))
    }

    /// Drop every cached nearest/hover reference
    pub fn invalidate_references(&mut self) {
        self.closest_item = None;
        self.mouseover_item = None;
        self.mouseover_monster = None;
    }

    /// Re-aim the player at the cursor
    pub fn refresh_facing(&mut self) {
        self.player.direction = crate::facing(self.player.position, self.mouse_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_clamps_to_max() {
        let mut h = Health { current: 90, max: 100 };
        h.heal(25);
        assert_eq!(h.current, 100);
        let mut h = Health { current: -5, max: 100 };
        h.heal(2);
        assert_eq!(h.current, 0);
    }

    #[test]
    fn test_damage_can_overkill() {
        let mut h = Health::full(3);
        h.damage(2);
        assert!(!h.is_depleted());
        h.damage(2);
        assert_eq!(h.current, -1);
        assert!(h.is_depleted());
    }

    #[test]
    fn test_player_defaults() {
        let p = Player::default();
        assert_eq!(p.position, Vec2::new(200.0, 200.0));
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.direction, Vec2::X);
        assert_eq!(p.health, Health::full(100));
        assert!(p.inventory.is_empty());
    }

    #[test]
    fn test_facing_never_zero() {
        let mut state = GameState::default();
        state.mouse_position = state.player.position;
        state.refresh_facing();
        assert_eq!(state.player.direction, Vec2::X);

        state.mouse_position = state.player.position + Vec2::new(0.0, 10.0);
        state.refresh_facing();
        assert_eq!(state.player.direction, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_set_mode_emits_once() {
        let mut state = GameState::default();
        state.set_mode(InputMode::Drop);
        state.set_mode(InputMode::Drop);
        assert_eq!(state.events, vec![GameEvent::InputModeChanged(InputMode::Drop)]);
    }
}
