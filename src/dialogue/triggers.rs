//! Dialogue domain: characters the player can talk to.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::Incapacitated;
use crate::content::ContentRegistry;
use crate::dialogue::events::StartDialogueEvent;
use crate::dialogue::sequencer::DialogueSequencer;
use crate::movement::Player;

/// Starts a dialogue script when the player talks within `radius`
#[derive(Component, Debug, Clone)]
pub struct DialogueTrigger {
    pub script_id: String,
    pub radius: f32,
}

/// Pick the closest trigger within reach of `origin`, if any.
pub fn nearest_trigger<'a>(
    origin: Vec2,
    triggers: impl IntoIterator<Item = (Vec2, &'a DialogueTrigger)>,
) -> Option<&'a DialogueTrigger> {
    triggers
        .into_iter()
        .filter_map(|(position, trigger)| {
            let distance = position.distance(origin);
            (distance <= trigger.radius).then_some((distance, trigger))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, trigger)| trigger)
}

pub(crate) fn start_dialogue_from_triggers(
    keyboard: Res<ButtonInput<KeyCode>>,
    sequencer: Res<DialogueSequencer>,
    player_query: Query<&Transform, (With<Player>, Without<Incapacitated>)>,
    trigger_query: Query<(&Transform, &DialogueTrigger)>,
    mut start_events: MessageWriter<StartDialogueEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) || sequencer.is_displaying() {
        return;
    }
    let Ok(player) = player_query.single() else {
        return;
    };

    let origin = player.translation.truncate();
    let candidates = trigger_query
        .iter()
        .map(|(transform, trigger)| (transform.translation.truncate(), trigger));

    if let Some(trigger) = nearest_trigger(origin, candidates) {
        start_events.write(StartDialogueEvent {
            script_id: trigger.script_id.clone(),
        });
    }
}

pub(crate) fn spawn_npcs(mut commands: Commands, registry: Res<ContentRegistry>) {
    let npcs = [
        ("smith_intro", Vec2::new(-120.0, 0.0), Color::srgb(0.8, 0.7, 0.4)),
        ("scout_report", Vec2::new(0.0, 160.0), Color::srgb(0.5, 0.8, 0.7)),
    ];

    for (script_id, position, color) in npcs {
        if registry.dialogue(script_id).is_none() {
            warn!("No dialogue '{}' loaded, skipping its speaker", script_id);
            continue;
        }
        commands.spawn((
            DialogueTrigger {
                script_id: script_id.to_string(),
                radius: 64.0,
            },
            Sprite {
                color,
                custom_size: Some(Vec2::new(22.0, 30.0)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
        ));
    }
}
