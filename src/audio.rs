//! Sound cues for simulation events
//!
//! The simulation emits `GameEvent`s; this module decides which cue each one
//! plays and where the cue files live. Playback itself belongs to the host.
//! A missing sound library is tolerated: the game just runs silent.

use std::path::{Path, PathBuf};

use crate::sim::state::GameEvent;

/// Directories searched (in order) for the sound files
pub const SOUND_SEARCH_PATHS: [&str; 2] = ["../data/sounds/", "data/sounds/"];

/// Default master volume (0.0 - 1.0)
pub const MASTER_VOLUME: f32 = 0.1;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Something was refused (item not ready, command drop)
    Error,
    /// Inventory or mode changed
    MenuBeep,
    /// Item or menu activated
    MenuActivated,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::Error,
        SoundEffect::MenuBeep,
        SoundEffect::MenuActivated,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Error => "error.wav",
            SoundEffect::MenuBeep => "menu_beep.wav",
            SoundEffect::MenuActivated => "menu_beep2.wav",
        }
    }

    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ActivationRefused { .. } | GameEvent::DropRefused { .. } => {
                Some(SoundEffect::Error)
            }
            GameEvent::ItemPickedUp { .. }
            | GameEvent::ItemDropped { .. }
            | GameEvent::InputModeChanged(_) => Some(SoundEffect::MenuBeep),
            GameEvent::ItemActivated { .. } | GameEvent::QuitRequested => {
                Some(SoundEffect::MenuActivated)
            }
            GameEvent::ProjectileFired
            | GameEvent::MonsterHit { .. }
            | GameEvent::MonsterKilled { .. } => None,
        }
    }
}

/// First search directory under `root` that holds every cue file
pub fn locate_sound_library(root: &Path) -> Option<PathBuf> {
    SOUND_SEARCH_PATHS
        .iter()
        .map(|dir| root.join(dir))
        .find(|dir| SoundEffect::ALL.iter().all(|s| dir.join(s.file_name()).is_file()))
}

/// Resolves events to cue files for the host to play
#[derive(Debug, Clone)]
pub struct SoundBoard {
    library: Option<PathBuf>,
    master_volume: f32,
    muted: bool,
}

impl SoundBoard {
    pub fn new(root: &Path) -> Self {
        let library = locate_sound_library(root);
        match &library {
            Some(dir) => log::info!("Sound library: {}", dir.display()),
            None => log::warn!("No sound library under {} - audio disabled", root.display()),
        }
        Self {
            library,
            master_volume: MASTER_VOLUME,
            muted: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.library.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// File to play for `effect`, or `None` when silent
    pub fn cue(&self, effect: SoundEffect) -> Option<PathBuf> {
        if self.muted || self.master_volume <= 0.0 {
            return None;
        }
        self.library.as_ref().map(|dir| dir.join(effect.file_name()))
    }

    /// Cue files for a frame's worth of events
    pub fn cues_for(&self, events: &[GameEvent]) -> Vec<PathBuf> {
        events
            .iter()
            .filter_map(SoundEffect::for_event)
            .filter_map(|effect| self.cue(effect))
            .collect()
    }
}
