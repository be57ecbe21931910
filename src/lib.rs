//! Keybind Arena - a top-down arena where items are bound to keys
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, input state machine, per-frame tick)
//! - `settings`: Data-driven configuration (arena size, world population, key bindings)
//! - `ui`: Read-only HUD text model for whatever draws the game
//! - `audio`: Sound cue mapping for simulation events

pub mod audio;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{ArenaSettings, KeyBindings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (the playable area)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 768.0;

    /// World population on a fresh game
    pub const WORLD_ITEM_COUNT: usize = 15;
    pub const WORLD_MONSTER_COUNT: usize = 10;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Movement speed while a direction command is held (units/s)
    pub const PLAYER_SPEED: f32 = 400.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 800.0;
    pub const PROJECTILE_RADIUS: f32 = 20.0;
    pub const PROJECTILE_TTL: f32 = 2.0;

    /// The mouse cursor is treated as a circle of this radius for hover tests
    pub const CURSOR_RADIUS: f32 = 20.0;

    /// Max offset (each axis) applied to a dropped item around the player
    pub const DROP_JITTER: f32 = 20.0;

    /// Per-channel colour variance for generated items
    pub const COLOR_VARIANCE: f32 = 0.15;
}

/// Facing direction from `from` towards `to`.
///
/// Falls back to +X when the points coincide so callers can always normalize.
#[inline]
pub fn facing(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    if delta == Vec2::ZERO { Vec2::X } else { delta }
}
