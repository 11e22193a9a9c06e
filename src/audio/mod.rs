//! Audio domain: named sound cues and their playback.

mod library;
mod systems;

pub use library::{CueLibrary, CueManifest, CueManifestError, parse_cue_manifest};
pub use systems::{PlayCueEvent, cue_for_vitals_change};

use bevy::prelude::*;

use crate::audio::systems::{load_cue_library, play_combat_cues, play_cues};

/// Cue manifest, relative to the working directory
pub const CUE_MANIFEST: &str = "assets/audio/cues.json";

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueLibrary>()
            .add_message::<PlayCueEvent>()
            .add_systems(Startup, load_cue_library)
            .add_systems(Update, (play_combat_cues, play_cues).chain());
    }
}
