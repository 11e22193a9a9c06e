//! Audio domain: cue requests and playback.

use bevy::audio::{PlaybackSettings, Volume};
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use std::path::Path;

use crate::audio::CUE_MANIFEST;
use crate::audio::library::{CueLibrary, read_cue_manifest};
use crate::combat::{CoinsCollectedEvent, VitalsChange, VitalsChangedEvent, WeaponFiredEvent};
use crate::movement::Player;

/// Play the named cue once
#[derive(Debug, Clone)]
pub struct PlayCueEvent {
    pub cue: String,
    /// Playback speed, which also shifts pitch
    pub pitch: f32,
    pub volume: f32,
}

impl PlayCueEvent {
    pub fn plain(cue: &str) -> Self {
        Self {
            cue: cue.to_string(),
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl Message for PlayCueEvent {}

/// Feedback cue for a vitals change on the player, if any.
pub fn cue_for_vitals_change(change: VitalsChange) -> Option<&'static str> {
    match change {
        VitalsChange::ShieldDamaged => Some("ShieldHit"),
        VitalsChange::HealthDamaged => Some("Hurt"),
        VitalsChange::Healed | VitalsChange::ShieldRestored => Some("Pickup"),
        VitalsChange::Revived => None,
    }
}

pub(crate) fn load_cue_library(asset_server: Res<AssetServer>, mut library: ResMut<CueLibrary>) {
    let manifest = match read_cue_manifest(Path::new(CUE_MANIFEST)) {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("Cue manifest error: {}", e);
            return;
        }
    };

    for (id, path) in manifest.cues {
        library.insert(id, asset_server.load(path));
    }
    info!("Loaded {} audio cues", library.len());
}

pub(crate) fn play_combat_cues(
    player_query: Query<(), With<Player>>,
    mut fired_events: MessageReader<WeaponFiredEvent>,
    mut vitals_events: MessageReader<VitalsChangedEvent>,
    mut coin_events: MessageReader<CoinsCollectedEvent>,
    mut cues: MessageWriter<PlayCueEvent>,
) {
    for _ in fired_events.read() {
        cues.write(PlayCueEvent::plain("Shoot"));
    }
    for _ in coin_events.read() {
        cues.write(PlayCueEvent::plain("Coin"));
    }

    for event in vitals_events.read() {
        if !player_query.contains(event.entity) {
            continue;
        }
        if let Some(cue) = cue_for_vitals_change(event.change) {
            cues.write(PlayCueEvent::plain(cue));
        }
    }
}

pub(crate) fn play_cues(
    mut commands: Commands,
    mut library: ResMut<CueLibrary>,
    mut requests: MessageReader<PlayCueEvent>,
) {
    for request in requests.read() {
        let Some(handle) = library.get(&request.cue).cloned() else {
            if library.note_missing(&request.cue) {
                warn!("Unknown audio cue '{}'", request.cue);
            }
            continue;
        };

        commands.spawn((
            AudioPlayer::new(handle),
            PlaybackSettings::DESPAWN
                .with_speed(request.pitch)
                .with_volume(Volume::Linear(request.volume)),
        ));
    }
}
