//! Combat domain: combat systems for input, damage resolution, death and revive.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::combat::components::{
    Combatant, DamageOutcome, Health, Incapacitated, Respawn, Team,
};
use crate::combat::events::{
    DamageEvent, DeathEvent, HealEvent, ReviveEvent, ShieldRestoreEvent, VitalsChange,
    VitalsChangedEvent, WeaponFiredEvent,
};
use crate::combat::resources::CombatInput;
use crate::combat::weapon::{Projectile, ProjectileLifetime, Weapon};
use crate::content::GameplayDefaults;
use crate::movement::{GameLayer, Player};

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    interactions: Query<&Interaction>,
    mut input: ResMut<CombatInput>,
) {
    // A click that lands on a button belongs to the UI
    let over_ui = interactions.iter().any(|i| *i != Interaction::None);
    input.fire = mouse.just_pressed(MouseButton::Left) && !over_ui;
    input.reload = keyboard.just_pressed(KeyCode::KeyR);

    input.aim = match (windows.single(), cameras.single()) {
        (Ok(window), Ok((camera, camera_transform))) => window
            .cursor_position()
            .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok()),
        _ => None,
    };

    // Debug keys for exercising health and shield without enemies
    if cfg!(feature = "dev-tools") {
        input.test_damage = keyboard.just_pressed(KeyCode::KeyL);
        input.test_heal = keyboard.just_pressed(KeyCode::KeyH);
        input.test_shield = keyboard.just_pressed(KeyCode::KeyJ);
        input.test_kill = keyboard.just_pressed(KeyCode::KeyK);
    }
}

pub(crate) fn handle_test_input(
    input: Res<CombatInput>,
    defaults: Res<GameplayDefaults>,
    player_query: Query<Entity, With<Player>>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut heal_events: MessageWriter<HealEvent>,
    mut shield_events: MessageWriter<ShieldRestoreEvent>,
    mut revive_events: MessageWriter<ReviveEvent>,
    mut health_query: Query<&mut Health>,
    mut death_events: MessageWriter<DeathEvent>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let amount = defaults.combat.test_damage_amount;

    if input.test_damage {
        damage_events.write(DamageEvent {
            source: None,
            target: player,
            amount,
        });
    }
    if input.test_heal {
        heal_events.write(HealEvent {
            target: player,
            amount,
        });
    }
    if input.test_shield {
        shield_events.write(ShieldRestoreEvent {
            target: player,
            amount,
        });
    }
    if input.test_kill {
        let Ok(mut health) = health_query.get_mut(player) else {
            return;
        };
        if health.is_dead() {
            revive_events.write(ReviveEvent { entity: player });
        } else {
            health.die();
            death_events.write(DeathEvent { entity: player });
        }
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut vitals_events: MessageWriter<VitalsChangedEvent>,
    mut query: Query<&mut Health>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };

        match health.apply_damage(event.amount) {
            Ok(outcome) => {
                let change = match outcome {
                    DamageOutcome::ShieldAbsorbed { .. } | DamageOutcome::ShieldBroken { .. } => {
                        VitalsChange::ShieldDamaged
                    }
                    DamageOutcome::HealthLost { .. } | DamageOutcome::Died { .. } => {
                        VitalsChange::HealthDamaged
                    }
                };
                vitals_events.write(VitalsChangedEvent {
                    entity: event.target,
                    change,
                });

                debug!(
                    "Damage {} on {:?} from {:?}: {:?} (health {}/{}, shield {}/{})",
                    event.amount,
                    event.target,
                    event.source,
                    outcome,
                    health.current,
                    health.max,
                    health.shield,
                    health.max_shield
                );

                if let DamageOutcome::ShieldBroken { .. } = outcome {
                    info!("Shield broken on {:?}", event.target);
                }
                if outcome.is_death() {
                    death_events.write(DeathEvent {
                        entity: event.target,
                    });
                }
            }
            Err(rejection) => {
                debug!("Ignored damage on {:?}: {}", event.target, rejection);
            }
        }
    }
}

pub(crate) fn apply_heals(
    mut heal_events: MessageReader<HealEvent>,
    mut vitals_events: MessageWriter<VitalsChangedEvent>,
    mut query: Query<&mut Health>,
) {
    for event in heal_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };
        match health.heal(event.amount) {
            Ok(healed) if healed > 0.0 => {
                vitals_events.write(VitalsChangedEvent {
                    entity: event.target,
                    change: VitalsChange::Healed,
                });
                debug!("Healed {:?} by {}", event.target, healed);
            }
            Ok(_) => debug!("Heal on {:?} had nothing to fill", event.target),
            Err(rejection) => debug!("Ignored heal on {:?}: {}", event.target, rejection),
        }
    }
}

pub(crate) fn apply_shield_restores(
    mut shield_events: MessageReader<ShieldRestoreEvent>,
    mut vitals_events: MessageWriter<VitalsChangedEvent>,
    mut query: Query<&mut Health>,
) {
    for event in shield_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };
        match health.restore_shield(event.amount) {
            Ok(restored) if restored > 0.0 => {
                vitals_events.write(VitalsChangedEvent {
                    entity: event.target,
                    change: VitalsChange::ShieldRestored,
                });
                debug!("Restored {} shield on {:?}", restored, event.target);
            }
            Ok(_) => debug!("Shield on {:?} already full", event.target),
            Err(rejection) => {
                debug!("Ignored shield restore on {:?}: {}", event.target, rejection)
            }
        }
    }
}

/// Take dead combatants out of play: hidden, no collisions, no control.
pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut query: Query<(Option<&mut Respawn>, Option<&mut LinearVelocity>)>,
) {
    for event in death_events.read() {
        let Ok((respawn, velocity)) = query.get_mut(event.entity) else {
            continue;
        };

        if let Some(mut velocity) = velocity {
            velocity.0 = Vec2::ZERO;
        }
        if let Some(mut respawn) = respawn {
            respawn.start();
        }

        commands
            .entity(event.entity)
            .insert((Incapacitated, ColliderDisabled, Visibility::Hidden));

        info!("{:?} died", event.entity);
    }
}

pub(crate) fn process_revives(
    mut commands: Commands,
    mut revive_events: MessageReader<ReviveEvent>,
    mut vitals_events: MessageWriter<VitalsChangedEvent>,
    mut query: Query<&mut Health>,
) {
    for event in revive_events.read() {
        let Ok(mut health) = query.get_mut(event.entity) else {
            continue;
        };
        health.revive();

        commands
            .entity(event.entity)
            .remove::<(Incapacitated, ColliderDisabled)>()
            .insert(Visibility::Inherited);

        vitals_events.write(VitalsChangedEvent {
            entity: event.entity,
            change: VitalsChange::Revived,
        });

        info!("{:?} revived", event.entity);
    }
}

pub(crate) fn tick_respawns(
    time: Res<Time>,
    mut revive_events: MessageWriter<ReviveEvent>,
    mut query: Query<(Entity, &mut Respawn)>,
) {
    let dt = time.delta_secs();
    for (entity, mut respawn) in &mut query {
        if respawn.tick(dt) {
            revive_events.write(ReviveEvent { entity });
        }
    }
}

pub(crate) fn update_weapon_timers(time: Res<Time>, mut query: Query<&mut Weapon>) {
    let dt = time.delta_secs();
    for mut weapon in &mut query {
        weapon.tick(dt);
    }
}

pub(crate) fn fire_weapon(
    mut commands: Commands,
    input: Res<CombatInput>,
    mut fired_events: MessageWriter<WeaponFiredEvent>,
    mut query: Query<(Entity, &Transform, &mut Weapon), (With<Player>, Without<Incapacitated>)>,
) {
    for (entity, transform, mut weapon) in &mut query {
        if input.reload {
            weapon.reload();
            debug!("Reloaded {} ({} rounds)", weapon.name, weapon.ammo);
            continue;
        }

        if !input.fire {
            continue;
        }

        let origin = transform.translation.truncate();
        let Some(aim) = input.aim else {
            continue;
        };
        let direction = (aim - origin).normalize_or_zero();
        let direction = if direction == Vec2::ZERO {
            Vec2::X
        } else {
            direction
        };

        let ammo_left = match weapon.try_fire() {
            Ok(ammo_left) => ammo_left,
            Err(rejection) => {
                debug!("{} did not fire: {}", weapon.name, rejection);
                continue;
            }
        };

        let spawn_pos = origin + direction * 20.0;
        commands.spawn((
            Projectile {
                damage: weapon.projectile_damage,
                owner: entity,
            },
            Team::Player,
            ProjectileLifetime(weapon.projectile_lifetime),
            Sprite {
                color: Color::srgb(1.0, 0.9, 0.4),
                custom_size: Some(Vec2::splat(6.0)),
                ..default()
            },
            Transform::from_xyz(spawn_pos.x, spawn_pos.y, 1.0),
            RigidBody::Kinematic,
            LinearVelocity(direction * weapon.projectile_speed),
            Collider::circle(3.0),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::PlayerProjectile, [GameLayer::Enemy]),
        ));

        fired_events.write(WeaponFiredEvent {
            shooter: entity,
            ammo_left,
        });
    }
}

pub(crate) fn detect_projectile_hits(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    projectile_query: Query<(&Projectile, &Team)>,
    target_query: Query<(&Team, &Health), With<Combatant>>,
) {
    let mut spent: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (projectile_entity, target) in pairs {
            let Ok((projectile, projectile_team)) = projectile_query.get(projectile_entity) else {
                continue;
            };
            let Ok((target_team, health)) = target_query.get(target) else {
                continue;
            };
            if spent.contains(&projectile_entity)
                || projectile_team == target_team
                || projectile.owner == target
                || health.is_dead()
            {
                continue;
            }

            damage_events.write(DamageEvent {
                source: Some(projectile.owner),
                target,
                amount: projectile.damage,
            });

            spent.push(projectile_entity);
            commands.entity(projectile_entity).try_despawn();
        }
    }
}

pub(crate) fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ProjectileLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}
