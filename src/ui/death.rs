//! UI domain: death screen presentation and retry flow.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{DeathEvent, ReviveEvent, VitalsChange, VitalsChangedEvent};
use crate::movement::Player;

/// Marker for the death screen overlay
#[derive(Component)]
pub struct DeathScreenUI;

/// Marker for the retry button on death screen
#[derive(Component)]
pub struct RetryButton;

/// Resource to track if player has died (prevents multiple death screens)
#[derive(Resource, Default)]
pub struct PlayerDeathState {
    pub is_dead: bool,
}

pub(crate) fn detect_player_death(
    mut commands: Commands,
    player_query: Query<(), With<Player>>,
    mut death_events: MessageReader<DeathEvent>,
    mut death_state: ResMut<PlayerDeathState>,
    existing_death_screen: Query<(), With<DeathScreenUI>>,
) {
    let player_died = death_events
        .read()
        .fold(false, |found, event| found || player_query.contains(event.entity));
    if !player_died || death_state.is_dead {
        return;
    }

    death_state.is_dead = true;
    if existing_death_screen.is_empty() {
        spawn_death_screen(&mut commands);
    }
}

fn spawn_death_screen(commands: &mut Commands) {
    // Full screen dark overlay
    commands
        .spawn((
            DeathScreenUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU DIED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.15, 0.15)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    RetryButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("RETRY"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));

            parent.spawn((
                Text::new("Press [Enter] or click to retry"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

pub(crate) fn handle_retry_button(
    keyboard: Res<ButtonInput<KeyCode>>,
    button_query: Query<&Interaction, (With<RetryButton>, Changed<Interaction>)>,
    death_state: Res<PlayerDeathState>,
    player_query: Query<Entity, With<Player>>,
    mut revive_events: MessageWriter<ReviveEvent>,
) {
    if !death_state.is_dead {
        return;
    }

    let should_retry = keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || button_query
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);
    if !should_retry {
        return;
    }

    if let Ok(player) = player_query.single() {
        revive_events.write(ReviveEvent { entity: player });
    }
}

/// Close the death screen once the player is back, whatever revived them.
pub(crate) fn clear_death_screen(
    mut commands: Commands,
    player_query: Query<(), With<Player>>,
    mut vitals_events: MessageReader<VitalsChangedEvent>,
    mut death_state: ResMut<PlayerDeathState>,
    death_screen_query: Query<Entity, With<DeathScreenUI>>,
) {
    let revived = vitals_events.read().fold(false, |found, event| {
        found || (event.change == VitalsChange::Revived && player_query.contains(event.entity))
    });
    if !revived {
        return;
    }

    death_state.is_dead = false;
    for entity in &death_screen_query {
        commands.entity(entity).despawn();
    }
}
