//! Combat domain: health, shield and coin pickups, and the player's wallet.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Health, VitalPool};
use crate::combat::events::{CoinsCollectedEvent, HealEvent, ShieldRestoreEvent};
use crate::movement::{GameLayer, Player};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Pickup {
    Health(f32),
    Shield(f32),
    Coins(u32),
}

impl Pickup {
    /// Vital pool this pickup refills, if any
    pub fn pool(&self) -> Option<VitalPool> {
        match self {
            Pickup::Health(_) => Some(VitalPool::Health),
            Pickup::Shield(_) => Some(VitalPool::Shield),
            Pickup::Coins(_) => None,
        }
    }

    fn color(&self) -> Color {
        match self {
            Pickup::Health(_) => Color::srgb(0.3, 0.9, 0.4),
            Pickup::Shield(_) => Color::srgb(0.3, 0.6, 1.0),
            Pickup::Coins(_) => Color::srgb(0.9, 0.75, 0.2),
        }
    }
}

/// Coins the player has picked up so far
#[derive(Resource, Debug, Default)]
pub struct PlayerWallet {
    pub coins: u32,
}

impl PlayerWallet {
    pub fn add(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }
}

/// Bundle for a pickup sensor lying in the world
#[derive(Bundle)]
pub struct PickupBundle {
    pub pickup: Pickup,
    pub sprite: Sprite,
    pub transform: Transform,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
}

impl PickupBundle {
    pub fn new(pickup: Pickup, position: Vec2) -> Self {
        Self {
            pickup,
            sprite: Sprite {
                color: pickup.color(),
                custom_size: Some(Vec2::splat(14.0)),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.5),
            collider: Collider::circle(8.0),
            sensor: Sensor,
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        }
    }
}

/// Consume pickups the player touches. Vital pickups stay put while the
/// matching pool is already full.
pub(crate) fn collect_pickups(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut heal_events: MessageWriter<HealEvent>,
    mut shield_events: MessageWriter<ShieldRestoreEvent>,
    mut coin_events: MessageWriter<CoinsCollectedEvent>,
    player_query: Query<&Health, With<Player>>,
    pickup_query: Query<&Pickup>,
) {
    let mut consumed: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player, pickup_entity) in pairs {
            let Ok(health) = player_query.get(player) else {
                continue;
            };
            let Ok(pickup) = pickup_query.get(pickup_entity) else {
                continue;
            };
            if consumed.contains(&pickup_entity) || health.is_dead() {
                continue;
            }
            if pickup.pool().is_some_and(|pool| health.is_full(pool)) {
                debug!("Pickup {:?} left in place, {:?} is full", pickup_entity, pickup);
                continue;
            }

            match *pickup {
                Pickup::Health(amount) => {
                    heal_events.write(HealEvent {
                        target: player,
                        amount,
                    });
                }
                Pickup::Shield(amount) => {
                    shield_events.write(ShieldRestoreEvent {
                        target: player,
                        amount,
                    });
                }
                Pickup::Coins(amount) => {
                    coin_events.write(CoinsCollectedEvent {
                        collector: player,
                        amount,
                    });
                }
            }

            consumed.push(pickup_entity);
            commands.entity(pickup_entity).try_despawn();
        }
    }
}

pub(crate) fn credit_coins(
    mut coin_events: MessageReader<CoinsCollectedEvent>,
    mut wallet: ResMut<PlayerWallet>,
) {
    for event in coin_events.read() {
        wallet.add(event.amount);
        info!("Picked up {} coins. Total: {}", event.amount, wallet.coins);
    }
}
