//! Dialogue domain: systems feeding input and time into the sequencer.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::audio::PlayCueEvent;
use crate::content::{ContentRegistry, GameplayDefaults};
use crate::core::{GameplayPaused, PauseSource};
use crate::dialogue::events::{
    DialogueAdvanceRequest, DialogueClosedEvent, DialogueDisplayEvent, DialoguePortraitEvent,
    StartDialogueEvent,
};
use crate::dialogue::sequencer::{DialogueSequencer, DialogueSignal};

/// Seeded RNG for blip pitch and cue variation
#[derive(Resource, Debug)]
pub struct BlipRng(pub ChaCha8Rng);

impl Default for BlipRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(rand::rng().random()))
    }
}

/// Forward sequencer signals to the box, audio and pause gate.
fn forward_signals(
    sequencer: &DialogueSequencer,
    signals: Vec<DialogueSignal>,
    display: &mut MessageWriter<DialogueDisplayEvent>,
    portraits: &mut MessageWriter<DialoguePortraitEvent>,
    closed: &mut MessageWriter<DialogueClosedEvent>,
    cues: &mut MessageWriter<PlayCueEvent>,
    paused: &mut GameplayPaused,
) {
    for signal in signals {
        match signal {
            DialogueSignal::Opened { speaker } => {
                paused.pause(PauseSource::Dialogue);
                info!("Dialogue opened with {}", speaker);
            }
            DialogueSignal::LineStarted { index, portrait } => {
                debug!("Dialogue line {} started", index);
                portraits.write(DialoguePortraitEvent { portrait });
            }
            DialogueSignal::TextRevealed { text } => {
                display.write(DialogueDisplayEvent {
                    speaker: sequencer.speaker().to_string(),
                    text,
                    is_open: true,
                    has_more: sequencer.has_more(),
                });
            }
            DialogueSignal::Blip(blip) => {
                cues.write(PlayCueEvent {
                    cue: blip.cue.to_string(),
                    pitch: blip.pitch,
                    volume: blip.volume,
                });
            }
            DialogueSignal::LineCompleted => {
                debug!("Dialogue line complete, {} left", sequencer.pending_len());
            }
            DialogueSignal::Closed => {
                display.write(DialogueDisplayEvent {
                    speaker: sequencer.speaker().to_string(),
                    text: String::new(),
                    is_open: false,
                    has_more: false,
                });
                closed.write(DialogueClosedEvent);
                paused.unpause(PauseSource::Dialogue);
                info!("Dialogue closed");
            }
        }
    }
}

pub(crate) fn configure_sequencer(
    defaults: Res<GameplayDefaults>,
    mut sequencer: ResMut<DialogueSequencer>,
) {
    sequencer.set_tuning(defaults.dialogue.clone());
}

pub(crate) fn read_dialogue_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    sequencer: Res<DialogueSequencer>,
    mut advance_requests: MessageWriter<DialogueAdvanceRequest>,
) {
    if !sequencer.is_displaying() {
        return;
    }
    if keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::KeyE)
    {
        advance_requests.write(DialogueAdvanceRequest);
    }
}

/// Apply start and advance requests, then move the reveal clock forward.
pub(crate) fn update_dialogue(
    time: Res<Time>,
    registry: Res<ContentRegistry>,
    mut rng: ResMut<BlipRng>,
    mut sequencer: ResMut<DialogueSequencer>,
    mut paused: ResMut<GameplayPaused>,
    mut start_events: MessageReader<StartDialogueEvent>,
    mut advance_requests: MessageReader<DialogueAdvanceRequest>,
    mut display: MessageWriter<DialogueDisplayEvent>,
    mut portraits: MessageWriter<DialoguePortraitEvent>,
    mut closed: MessageWriter<DialogueClosedEvent>,
    mut cues: MessageWriter<PlayCueEvent>,
) {
    let mut batches = Vec::new();

    for event in start_events.read() {
        let Some(script) = registry.dialogue(&event.script_id) else {
            warn!("Dialogue '{}' not found in registry", event.script_id);
            continue;
        };
        batches.push(sequencer.start(script));
    }

    for _ in advance_requests.read() {
        match sequencer.request_advance() {
            Ok(signals) => batches.push(signals),
            Err(rejection) => debug!("Dialogue advance ignored: {}", rejection),
        }
    }

    batches.push(sequencer.tick(time.delta_secs(), &mut rng.0));

    for signals in batches {
        forward_signals(
            &sequencer,
            signals,
            &mut display,
            &mut portraits,
            &mut closed,
            &mut cues,
            &mut paused,
        );
    }
}
