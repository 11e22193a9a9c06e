//! Movement domain: player bootstrap from gameplay defaults.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Combatant, Health, Team, Weapon};
use crate::content::GameplayDefaults;
use crate::movement::{GameLayer, MovementState, MovementTuning, Player};

/// Spawn the player with health, shield and weapon taken from gameplay defaults.
pub(crate) fn spawn_player(
    mut commands: Commands,
    defaults: Res<GameplayDefaults>,
    mut tuning: ResMut<MovementTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    tuning.max_speed = defaults.player.move_speed;

    let weapon = Weapon::equip(&defaults.weapon);
    info!(
        "Spawning player: health={}, shield={}, weapon='{}'",
        defaults.player.max_health, defaults.player.max_shield, weapon.name
    );

    commands.spawn((
        // Identity & Movement
        (Player, Combatant, Team::Player, MovementState::default()),
        // Combat
        (
            Health::new(defaults.player.max_health, defaults.player.max_shield),
            weapon,
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(24.0, 32.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(24.0, 32.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Wall, GameLayer::Enemy, GameLayer::Sensor],
            ),
        ),
    ));
}
