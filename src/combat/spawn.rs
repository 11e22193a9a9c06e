//! Combat domain: spawning targets and pickups for the arena.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::boss::BossEncounter;
use crate::combat::components::{Combatant, Health, Respawn, Team};
use crate::combat::pickups::{Pickup, PickupBundle};
use crate::content::GameplayDefaults;
use crate::movement::GameLayer;

/// Marks a target that exists to be shot at
#[derive(Component, Debug)]
pub struct TrainingDummy;

/// Bundle for a stationary target that gets back up after dying
#[derive(Bundle)]
pub struct TrainingDummyBundle {
    pub dummy: TrainingDummy,
    pub combatant: Combatant,
    pub team: Team,
    pub health: Health,
    pub respawn: Respawn,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
}

impl TrainingDummyBundle {
    /// Regular unshielded dummy
    pub fn new(position: Vec2, max_health: f32, respawn_delay: f32) -> Self {
        Self::sized(
            position,
            Health::unshielded(max_health),
            Vec2::new(28.0, 40.0),
            respawn_delay,
        )
    }

    pub fn sized(position: Vec2, health: Health, size: Vec2, respawn_delay: f32) -> Self {
        Self {
            dummy: TrainingDummy,
            combatant: Combatant,
            team: Team::Enemy,
            health,
            respawn: Respawn::after(respawn_delay),
            sprite: Sprite {
                color: Color::srgb(0.8, 0.3, 0.3),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Static,
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Player, GameLayer::PlayerProjectile],
            ),
        }
    }
}

pub(crate) fn spawn_arena(mut commands: Commands, defaults: Res<GameplayDefaults>) {
    let respawn_delay = defaults.combat.dummy_respawn_delay;

    commands.spawn(TrainingDummyBundle::new(
        Vec2::new(220.0, 60.0),
        6.0,
        respawn_delay,
    ));
    commands.spawn(TrainingDummyBundle::new(
        Vec2::new(260.0, -80.0),
        10.0,
        respawn_delay,
    ));

    // Shielded boss dummy in the far corner with its own health bar
    commands.spawn((
        TrainingDummyBundle::sized(
            Vec2::new(470.0, 200.0),
            Health::new(30.0, 10.0),
            Vec2::new(56.0, 72.0),
            respawn_delay * 2.0,
        ),
        BossEncounter::new("The Warden", 260.0),
    ));

    commands.spawn(PickupBundle::new(Pickup::Health(3.0), Vec2::new(-180.0, 120.0)));
    commands.spawn(PickupBundle::new(Pickup::Shield(2.0), Vec2::new(-180.0, -120.0)));
    for x in [-60.0, 0.0, 60.0] {
        commands.spawn(PickupBundle::new(Pickup::Coins(5), Vec2::new(x, 200.0)));
    }

    spawn_arena_walls(&mut commands);
}

const ARENA_HALF_SIZE: Vec2 = Vec2::new(600.0, 330.0);
const WALL_THICKNESS: f32 = 20.0;

/// Boundary walls so the player cannot leave the screen.
fn spawn_arena_walls(commands: &mut Commands) {
    let wall_color = Color::srgb(0.3, 0.28, 0.26);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let width = ARENA_HALF_SIZE.x * 2.0 + WALL_THICKNESS;
    let height = ARENA_HALF_SIZE.y * 2.0 + WALL_THICKNESS;

    let walls = [
        (Vec2::new(0.0, ARENA_HALF_SIZE.y), Vec2::new(width, WALL_THICKNESS)),
        (Vec2::new(0.0, -ARENA_HALF_SIZE.y), Vec2::new(width, WALL_THICKNESS)),
        (Vec2::new(-ARENA_HALF_SIZE.x, 0.0), Vec2::new(WALL_THICKNESS, height)),
        (Vec2::new(ARENA_HALF_SIZE.x, 0.0), Vec2::new(WALL_THICKNESS, height)),
    ];

    for (position, size) in walls {
        commands.spawn((
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }
}
