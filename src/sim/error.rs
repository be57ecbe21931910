//! Host-misuse errors surfaced by the simulation
//!
//! Ordinary "nothing to do" cases (empty slot, item on cooldown) are not
//! errors; they are logged and the frame carries on.

use super::input::InputKey;

/// Errors from the entity factory
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("no {kind} archetypes registered")]
    EmptyArchetypeList { kind: &'static str },
}

/// Errors from game operations
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("arena must have a positive finite size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("key {} is already bound", .key.0)]
    KeyAlreadyBound { key: InputKey },

    #[error("no live world item at index {index}")]
    NoItemToPickUp { index: usize },

    #[error("entity generation failed: {0}")]
    Factory(#[from] FactoryError),
}
