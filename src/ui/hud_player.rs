//! UI domain: player HUD with health and shield bars and the ammo counter.

use bevy::prelude::*;

use crate::combat::{Health, VitalPool, Weapon};
use crate::content::GameplayDefaults;
use crate::movement::Player;

pub(crate) const PLAYER_BAR_WIDTH: f32 = 200.0;
pub(crate) const PLAYER_BAR_HEIGHT: f32 = 20.0;
pub(crate) const PLAYER_HUD_PADDING: f32 = 16.0;

/// Marker for the player's HUD root
#[derive(Component)]
pub struct PlayerHudUI;

/// Fill element of a vitals bar. `shown` trails the real value.
#[derive(Component, Debug)]
pub struct VitalBarFill {
    pub pool: VitalPool,
    pub shown: f32,
}

/// `current/max` readout over a vitals bar
#[derive(Component)]
pub struct VitalBarLabel {
    pub pool: VitalPool,
}

#[derive(Component)]
pub struct AmmoText;

/// Move `shown` towards `target` by `rate * dt` of the remaining gap.
pub fn approach_fill(shown: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    let next = shown + (target - shown) * t;
    if (target - next).abs() < 0.001 {
        target
    } else {
        next
    }
}

pub fn vital_label(current: f32, max: f32) -> String {
    format!("{:.0}/{:.0}", current.max(0.0), max)
}

pub fn ammo_label(weapon: &Weapon) -> String {
    format!("{}  {}/{}", weapon.name, weapon.ammo, weapon.magazine_size)
}

/// Green when healthy, through yellow, to red when low.
pub fn health_color(percent: f32) -> Color {
    if percent > 0.5 {
        let t = (percent - 0.5) * 2.0;
        Color::srgb(1.0 - t * 0.8, 0.8, 0.3 * (1.0 - t))
    } else {
        let t = percent * 2.0;
        Color::srgb(0.9, 0.2 + t * 0.6, 0.2)
    }
}

fn shield_color(broken: bool) -> Color {
    if broken {
        Color::srgb(0.25, 0.3, 0.4)
    } else {
        Color::srgb(0.3, 0.6, 0.95)
    }
}

fn spawn_bar(parent: &mut ChildSpawnerCommands, pool: VitalPool, color: Color) {
    parent
        .spawn((
            Node {
                width: Val::Px(PLAYER_BAR_WIDTH),
                height: Val::Px(PLAYER_BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                margin: UiRect::bottom(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_children(|bar| {
            bar.spawn((
                VitalBarFill { pool, shown: 1.0 },
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
            ));
            bar.spawn((
                VitalBarLabel { pool },
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(6.0),
                    ..default()
                },
            ));
        });
}

pub(crate) fn spawn_player_hud(mut commands: Commands) {
    // Root container positioned at top-left
    commands
        .spawn((
            PlayerHudUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PLAYER_HUD_PADDING),
                top: Val::Px(PLAYER_HUD_PADDING),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|parent| {
            spawn_bar(parent, VitalPool::Health, health_color(1.0));
            spawn_bar(parent, VitalPool::Shield, shield_color(false));

            parent.spawn((
                AmmoText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.75)),
            ));
        });
}

pub(crate) fn update_player_bars(
    time: Res<Time>,
    defaults: Res<GameplayDefaults>,
    player_query: Query<&Health, With<Player>>,
    mut fill_query: Query<(&mut VitalBarFill, &mut Node, &mut BackgroundColor)>,
    mut label_query: Query<(&VitalBarLabel, &mut Text)>,
) {
    let Ok(health) = player_query.single() else {
        return;
    };
    let dt = time.delta_secs();
    let rate = defaults.combat.bar_lerp_rate;

    for (mut fill, mut node, mut bg_color) in &mut fill_query {
        let target = match fill.pool {
            VitalPool::Health => health.percent(),
            VitalPool::Shield => health.shield_percent(),
        };
        fill.shown = approach_fill(fill.shown, target, rate, dt);
        node.width = Val::Percent(fill.shown * 100.0);

        bg_color.0 = match fill.pool {
            VitalPool::Health => health_color(fill.shown),
            VitalPool::Shield => shield_color(health.shield_broken),
        };
    }

    for (label, mut text) in &mut label_query {
        text.0 = match label.pool {
            VitalPool::Health => vital_label(health.current, health.max),
            VitalPool::Shield => vital_label(health.shield, health.max_shield),
        };
    }
}

pub(crate) fn update_ammo_text(
    player_query: Query<&Weapon, (With<Player>, Changed<Weapon>)>,
    mut text_query: Query<&mut Text, With<AmmoText>>,
) {
    let Ok(weapon) = player_query.single() else {
        return;
    };
    for mut text in &mut text_query {
        text.0 = ammo_label(weapon);
    }
}
