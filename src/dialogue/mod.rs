//! Dialogue domain: scripted conversations typed out one character at a time.

mod blips;
mod events;
mod reveal;
mod sequencer;
mod systems;
#[cfg(test)]
mod tests;
mod triggers;

pub use blips::{TextBlip, blip_for, char_hash, character_pitch};
pub use events::{
    DialogueAdvanceRequest, DialogueClosedEvent, DialogueDisplayEvent, DialoguePortraitEvent,
    StartDialogueEvent,
};
pub use reveal::RevealTimer;
pub use sequencer::{DialoguePhase, DialogueRejection, DialogueSequencer, DialogueSignal};
pub use systems::BlipRng;
pub use triggers::{DialogueTrigger, nearest_trigger};

use bevy::prelude::*;

use crate::core::pause_menu_closed;
use crate::dialogue::systems::{configure_sequencer, read_dialogue_input, update_dialogue};
use crate::dialogue::triggers::{spawn_npcs, start_dialogue_from_triggers};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueSequencer>()
            .init_resource::<BlipRng>()
            .add_message::<StartDialogueEvent>()
            .add_message::<DialogueAdvanceRequest>()
            .add_message::<DialogueDisplayEvent>()
            .add_message::<DialoguePortraitEvent>()
            .add_message::<DialogueClosedEvent>()
            .add_systems(Startup, (configure_sequencer, spawn_npcs))
            .add_systems(
                Update,
                (read_dialogue_input, start_dialogue_from_triggers, update_dialogue)
                    .chain()
                    .run_if(pause_menu_closed),
            );
    }
}
