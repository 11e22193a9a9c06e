//! Core domain: shared resources for pausing gameplay.

use bevy::prelude::*;
use std::collections::HashSet;

/// Things that can hold gameplay paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseSource {
    /// The player opened the pause menu
    PauseMenu,
    /// A dialogue session is on screen
    Dialogue,
}

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<PauseSource>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn is_paused_by(&self, source: PauseSource) -> bool {
        self.sources.contains(&source)
    }

    pub fn pause(&mut self, source: PauseSource) {
        self.sources.insert(source);
    }

    pub fn unpause(&mut self, source: PauseSource) {
        self.sources.remove(&source);
    }

    /// Flip a single source. Returns true if that source is now pausing.
    pub fn toggle(&mut self, source: PauseSource) -> bool {
        if self.sources.remove(&source) {
            false
        } else {
            self.sources.insert(source);
            true
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// Run condition: true unless the pause menu is open.
/// Dialogue keeps running while it is the only thing pausing gameplay.
pub fn pause_menu_closed(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused_by(PauseSource::PauseMenu)
}
