//! UI domain: the pause menu overlay.

use bevy::prelude::*;

use crate::core::{GameplayPaused, PauseSource};
use crate::ui::death::PlayerDeathState;

/// Marker for the pause menu root
#[derive(Component)]
pub struct PauseMenuUI;

pub(crate) fn toggle_pause_menu(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    death_state: Res<PlayerDeathState>,
    mut paused: ResMut<GameplayPaused>,
    menu_query: Query<Entity, With<PauseMenuUI>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) || death_state.is_dead {
        return;
    }

    if paused.toggle(PauseSource::PauseMenu) {
        info!("Paused");
        if menu_query.is_empty() {
            spawn_pause_menu(&mut commands);
        }
    } else {
        info!("Resumed");
        for entity in &menu_query {
            commands.entity(entity).despawn();
        }
    }
}

fn spawn_pause_menu(commands: &mut Commands) {
    commands
        .spawn((
            PauseMenuUI,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.7)),
            ZIndex(200),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new("Press [Esc] to resume"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.7)),
            ));
        });
}
