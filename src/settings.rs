//! Game settings
//!
//! Persisted as JSON next to the binary (or wherever the host points). Any
//! missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::input::{Command, InputKey};

/// Errors loading or saving a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl ArenaSettings {
    /// Both extents positive and finite
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|extent| extent.is_finite() && *extent > 0.0)
    }
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Keys the built-in commands start on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: InputKey,
    pub down: InputKey,
    pub left: InputKey,
    pub right: InputKey,
    pub menu: InputKey,
    pub drop: InputKey,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: InputKey::W,
            down: InputKey::S,
            left: InputKey::A,
            right: InputKey::D,
            menu: InputKey::ESCAPE,
            drop: InputKey::TAB,
        }
    }
}

impl KeyBindings {
    /// Every (key, command) pair
    pub fn commands(&self) -> [(InputKey, Command); 6] {
        [
            (self.up, Command::Up),
            (self.down, Command::Down),
            (self.left, Command::Left),
            (self.right, Command::Right),
            (self.menu, Command::Menu),
            (self.drop, Command::Drop),
        ]
    }

    /// First key assigned to more than one command
    pub fn duplicate_key(&self) -> Option<InputKey> {
        let keys = self.commands().map(|(key, _)| key);
        keys.iter()
            .enumerate()
            .find(|&(i, key)| keys[i + 1..].contains(key))
            .map(|(_, key)| *key)
    }

    /// True when no key is assigned to two commands
    pub fn is_unique(&self) -> bool {
        self.duplicate_key().is_none()
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub arena: ArenaSettings,
    /// Items scattered on a new game
    pub world_items: usize,
    /// Monsters scattered on a new game
    pub world_monsters: usize,
    pub key_bindings: KeyBindings,
    /// Verbose diagnostics
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            arena: ArenaSettings::default(),
            world_items: WORLD_ITEM_COUNT,
            world_monsters: WORLD_MONSTER_COUNT,
            key_bindings: KeyBindings::default(),
            debug: true,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "keybind_arena_settings.json";

    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the game cannot start with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.arena.is_valid() {
            return Err(SettingsError::Invalid(format!(
                "arena must have a positive finite size, got {}x{}",
                self.arena.width, self.arena.height
            )));
        }
        if let Some(key) = self.key_bindings.duplicate_key() {
            return Err(SettingsError::Invalid(format!(
                "key {} is bound to more than one command",
                key.0
            )));
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Could not load {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
