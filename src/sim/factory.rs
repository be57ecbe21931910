//! Randomized item and monster generation
//!
//! The factory rolls stats within archetype-specific ranges. It never places
//! entities; callers set the position.

use serde::{Deserialize, Serialize};

use super::error::FactoryError;
use super::input::Command;
use super::item::{Item, ItemKind};
use super::math::Color;
use super::random::Random;
use super::state::{Health, Monster, MonsterKind};
use crate::consts::COLOR_VARIANCE;

/// Item archetypes the factory can roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemArchetype {
    Health,
    Gun,
}

const GUN_COLOR: Color = Color::new(0.8, 0.6, 0.2, 1.0);
const HEALTH_COLOR: Color = Color::new(0.8, 0.2, 0.2, 1.0);

/// Builds randomized entities from registered archetypes
#[derive(Debug, Clone)]
pub struct EntityFactory {
    random: Random,
    item_types: Vec<ItemArchetype>,
    monster_types: Vec<MonsterKind>,
}

impl EntityFactory {
    /// Factory with every archetype registered
    pub fn new(random: Random) -> Self {
        Self::with_archetypes(
            random,
            vec![ItemArchetype::Health, ItemArchetype::Gun],
            vec![MonsterKind::Dummy, MonsterKind::Melee, MonsterKind::Shooter],
        )
    }

    pub fn with_archetypes(
        random: Random,
        item_types: Vec<ItemArchetype>,
        monster_types: Vec<MonsterKind>,
    ) -> Self {
        Self {
            random,
            item_types,
            monster_types,
        }
    }

    /// Command item for `command`. Deterministic.
    pub fn command(&self, command: Command) -> Item {
        Item::command(command)
    }

    /// Roll one item of the given archetype
    pub fn generate_item(&mut self, archetype: ItemArchetype) -> Item {
        let rng = &mut self.random;
        match archetype {
            ItemArchetype::Gun => {
                let color = rng.color_varying(GUN_COLOR, COLOR_VARIANCE);
                let damage = rng.int(1, 5);
                let cooldown = rng.int(1, 2);
                Item::new("Gun", ItemKind::Gun { projectile_damage: damage })
                    .with_radius(15.0)
                    .with_color(color)
                    .with_cooldown(cooldown as f32)
            }
            ItemArchetype::Health => {
                let color = rng.color_varying(HEALTH_COLOR, COLOR_VARIANCE);
                let healing = rng.int(5, 20);
                let cooldown = rng.int(3, 10);
                let item = Item::new("HealthKit", ItemKind::Health { healing_amount: healing })
                    .with_radius(20.0)
                    .with_color(color)
                    .with_cooldown(cooldown as f32);
                if rng.percent() <= 50 {
                    let uses = rng.int(3, 10);
                    item.with_limited_uses(uses)
                } else {
                    item
                }
            }
        }
    }

    /// Roll an item from a uniformly picked archetype
    pub fn generate_random_item(&mut self) -> Result<Item, FactoryError> {
        let archetype = *self
            .random
            .pick(&self.item_types)
            .ok_or(FactoryError::EmptyArchetypeList { kind: "item" })?;
        Ok(self.generate_item(archetype))
    }

    /// Roll one monster of the given archetype
    pub fn generate_monster(&mut self, kind: MonsterKind) -> Monster {
        match kind {
            MonsterKind::Dummy => Monster::new(kind, "Training Dummy", 50.0, Health::full(1000)),
            MonsterKind::Melee => {
                let hp = self.random.int(1, 10);
                Monster::new(kind, "Melee monster", 40.0, Health::full(hp))
            }
            MonsterKind::Shooter => {
                let hp = self.random.int(1, 5);
                Monster::new(kind, "Shooter monster", 30.0, Health::full(hp))
            }
        }
    }

    /// Roll a monster from a uniformly picked archetype
    pub fn generate_random_monster(&mut self) -> Result<Monster, FactoryError> {
        let kind = *self
            .random
            .pick(&self.monster_types)
            .ok_or(FactoryError::EmptyArchetypeList { kind: "monster" })?;
        Ok(self.generate_monster(kind))
    }
}
