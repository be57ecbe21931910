//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` the host passes in
//! - Seeded RNG only
//! - Stable iteration order (storage order breaks ties)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod factory;
pub mod game;
pub mod input;
pub mod item;
pub mod math;
pub mod random;
pub mod state;
pub mod tick;

pub use collision::{Nearest, circles_collide};
pub use error::{FactoryError, GameError};
pub use factory::{EntityFactory, ItemArchetype};
pub use game::Game;
pub use input::{Command, InputKey, input_name};
pub use item::{Cooldown, Item, ItemKind, LimitedUses};
pub use math::{Color, Rect};
pub use random::Random;
pub use state::{
    GameEvent, GameState, Health, InputMode, Monster, MonsterKind, Player, Projectile,
};
pub use tick::{remove_dead_entities, update};
