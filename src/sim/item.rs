//! Items: world pickups and key-bound inventory entries
//!
//! An item is one archetype payload ([`ItemKind`]) composed with optional
//! activation capabilities ([`Cooldown`], [`LimitedUses`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::Command;
use super::math::Color;

/// Archetype payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Built-in command (movement, menu, drop mode)
    Command(Command),
    /// Heals the player on use
    Health { healing_amount: i32 },
    /// Fires a projectile on use
    Gun { projectile_damage: i32 },
}

/// Cooldown capability. `remaining` always stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
    max: f32,
}

impl Cooldown {
    /// A ready cooldown that resets to `max` seconds on use
    pub fn new(max: f32) -> Self {
        Self {
            remaining: 0.0,
            max: max.max(0.0),
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn decay(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn reset(&mut self) {
        self.remaining = self.max;
    }
}

/// Limited-uses capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedUses {
    pub uses_left: i32,
}

impl LimitedUses {
    pub fn new(uses: i32) -> Self {
        Self { uses_left: uses }
    }

    pub fn is_exhausted(&self) -> bool {
        self.uses_left <= 0
    }

    fn consume(&mut self) {
        self.uses_left = (self.uses_left - 1).max(0);
    }
}

/// A pickup/usable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Cleared when the item leaves the world (picked up); purged on cleanup
    pub alive: bool,
    pub name: String,
    pub kind: ItemKind,
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub cooldown: Option<Cooldown>,
    pub limited_uses: Option<LimitedUses>,
    /// Presentation-only animation tag and its elapsed time
    #[serde(default)]
    pub animation: Option<String>,
    #[serde(default)]
    pub animation_time: f32,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            alive: true,
            name: name.into(),
            kind,
            position: Vec2::ZERO,
            radius: 5.0,
            color: Color::default(),
            cooldown: None,
            limited_uses: None,
            animation: None,
            animation_time: 0.0,
        }
    }

    /// Command item named after its token; no cooldown, no uses
    pub fn command(command: Command) -> Self {
        Self::new(command.as_str(), ItemKind::Command(command))
    }

    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown = Some(Cooldown::new(seconds));
        self
    }

    pub fn with_limited_uses(mut self, uses: i32) -> Self {
        self.limited_uses = Some(LimitedUses::new(uses));
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn is_command(&self) -> bool {
        matches!(self.kind, ItemKind::Command(_))
    }

    pub fn as_command(&self) -> Option<Command> {
        match self.kind {
            ItemKind::Command(cmd) => Some(cmd),
            _ => None,
        }
    }

    /// Seconds of cooldown left (0 for items without a cooldown)
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.map_or(0.0, |c| c.remaining())
    }

    /// Uses left, if the item has limited uses
    pub fn uses_left(&self) -> Option<i32> {
        self.limited_uses.map(|u| u.uses_left)
    }

    /// True unless cooling down or out of uses
    pub fn can_activate(&self) -> bool {
        let cooling = self.cooldown.is_some_and(|c| !c.is_ready());
        let exhausted = self.limited_uses.is_some_and(|u| u.is_exhausted());
        !cooling && !exhausted
    }

    /// Spend one activation: restart the cooldown and/or consume a use
    pub fn use_activation(&mut self) {
        if let Some(cooldown) = &mut self.cooldown {
            cooldown.reset();
        }
        if let Some(uses) = &mut self.limited_uses {
            uses.consume();
        }
    }

    /// Per-frame bookkeeping shared by world and inventory items
    pub fn tick(&mut self, dt: f32) {
        if let Some(cooldown) = &mut self.cooldown {
            cooldown.decay(dt);
        }
        self.animation_time += dt;
    }
}
