//! Combat domain: tests for the health/shield state machine and death flow.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::boss::{advance_boss_encounters, settle_boss_encounters};
use super::pickups::{collect_pickups, credit_coins};
use super::systems::{
    apply_damage, apply_heals, apply_shield_restores, detect_projectile_hits, expire_projectiles,
    process_deaths, process_revives, read_combat_input,
};
use super::{
    BOSS_INTRO_DURATION, BossEncounter, BossEncounterEvent, BossPhase, CoinsCollectedEvent,
    CombatInput, Combatant, DamageEvent, DamageOutcome, DamageRejection, DeathEvent,
    EncounterStep, HealEvent, Health, Incapacitated, Pickup, PlayerWallet, Projectile,
    ProjectileLifetime, Respawn, ReviveEvent, ShieldRestoreEvent, Team, VitalPool, VitalState,
    VitalsChange, VitalsChangedEvent, Weapon, WeaponRejection,
};
use crate::content::WeaponDefaults;
use crate::movement::Player;

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_new_health_starts_full() {
    let health = Health::new(10.0, 5.0);
    assert_eq!(health.current, 10.0);
    assert_eq!(health.shield, 5.0);
    assert!(!health.shield_broken);
    assert_eq!(health.state(), VitalState::ShieldUp);
}

#[test]
fn test_shield_then_health_scenario() {
    let mut health = Health::new(10.0, 5.0);

    let outcome = health.apply_damage(3.0).unwrap();
    assert_eq!(outcome, DamageOutcome::ShieldAbsorbed { absorbed: 3.0 });
    assert_eq!(health.shield, 2.0);
    assert_eq!(health.current, 10.0);

    // Overflow past the remaining shield is discarded
    let outcome = health.apply_damage(3.0).unwrap();
    assert_eq!(outcome, DamageOutcome::ShieldBroken { absorbed: 2.0 });
    assert_eq!(health.shield, 0.0);
    assert!(health.shield_broken);
    assert_eq!(health.current, 10.0);
    assert_eq!(health.state(), VitalState::ShieldBroken);

    let outcome = health.apply_damage(4.0).unwrap();
    assert_eq!(outcome, DamageOutcome::HealthLost { lost: 4.0 });
    assert_eq!(health.shield, 0.0);
    assert_eq!(health.current, 6.0);
}

#[test]
fn test_health_unchanged_while_shield_holds() {
    let mut health = Health::new(10.0, 100.0);
    for _ in 0..20 {
        health.apply_damage(4.5).unwrap();
        assert_eq!(health.current, 10.0);
    }
    assert!(!health.shield_broken);
}

#[test]
fn test_death_when_broken_health_runs_out() {
    let mut health = Health::new(10.0, 5.0);
    health.apply_damage(5.0).unwrap();
    assert!(health.shield_broken);

    assert!(!health.apply_damage(9.0).unwrap().is_death());
    assert!(health.alive);

    let outcome = health.apply_damage(1.0).unwrap();
    assert_eq!(outcome, DamageOutcome::Died { lost: 1.0 });
    assert!(health.is_dead());
    assert_eq!(health.state(), VitalState::Dead);
}

#[test]
fn test_overkill_clamps_to_zero() {
    let mut health = Health::unshielded(10.0);
    let outcome = health.apply_damage(250.0).unwrap();
    assert_eq!(outcome, DamageOutcome::Died { lost: 10.0 });
    assert_eq!(health.current, 0.0);
}

#[test]
fn test_pools_stay_in_bounds() {
    let mut health = Health::new(7.0, 3.0);
    let hits = [0.5, 2.0, 0.0, 9.0, -1.0, 1.0, 3.0, 100.0, 4.0];
    for amount in hits {
        let _ = health.apply_damage(amount);
        assert!(health.current >= 0.0 && health.current <= health.max);
        assert!(health.shield >= 0.0 && health.shield <= health.max_shield);
    }
}

#[test]
fn test_damage_rejections() {
    let mut health = Health::new(10.0, 5.0);
    assert_eq!(health.apply_damage(0.0), Err(DamageRejection::InvalidAmount));
    assert_eq!(health.apply_damage(-2.0), Err(DamageRejection::InvalidAmount));
    assert_eq!(
        health.apply_damage(f32::NAN),
        Err(DamageRejection::InvalidAmount)
    );
    assert_eq!(health, Health::new(10.0, 5.0));

    health.die();
    assert_eq!(health.apply_damage(1.0), Err(DamageRejection::AlreadyDead));
    assert_eq!(health.heal(1.0), Err(DamageRejection::AlreadyDead));
}

#[test]
fn test_unshielded_damage_goes_to_health() {
    let mut health = Health::unshielded(6.0);
    assert_eq!(health.state(), VitalState::ShieldBroken);
    assert_eq!(
        health.apply_damage(2.0),
        Ok(DamageOutcome::HealthLost { lost: 2.0 })
    );
    assert_eq!(health.current, 4.0);
}

#[test]
fn test_heal_caps_at_max() {
    let mut health = Health::unshielded(10.0);
    health.apply_damage(4.0).unwrap();

    assert_eq!(health.heal(3.0), Ok(3.0));
    assert_eq!(health.heal(3.0), Ok(1.0));
    assert_eq!(health.current, 10.0);
    assert!(health.is_full(VitalPool::Health));
    assert_eq!(health.heal(0.0), Err(DamageRejection::InvalidAmount));
}

#[test]
fn test_restore_shield_clears_broken() {
    let mut health = Health::new(10.0, 5.0);
    health.apply_damage(5.0).unwrap();
    assert!(health.shield_broken);

    assert_eq!(health.restore_shield(2.0), Ok(2.0));
    assert!(!health.shield_broken);
    assert_eq!(health.state(), VitalState::ShieldUp);

    // Next hit lands on the shield again
    health.apply_damage(1.0).unwrap();
    assert_eq!(health.current, 10.0);
    assert_eq!(health.shield, 1.0);

    assert_eq!(health.restore_shield(50.0), Ok(4.0));
    assert!(health.is_full(VitalPool::Shield));
}

#[test]
fn test_revive_restores_everything() {
    let mut health = Health::new(10.0, 5.0);
    health.apply_damage(5.0).unwrap();
    health.apply_damage(10.0).unwrap();
    assert!(health.is_dead());

    health.revive();
    assert_eq!(health, Health::new(10.0, 5.0));

    // Reviving a living, damaged combatant also resets it
    health.apply_damage(5.0).unwrap();
    health.apply_damage(2.0).unwrap();
    health.revive();
    assert_eq!(health.current, 10.0);
    assert_eq!(health.shield, 5.0);
    assert!(!health.shield_broken);
}

#[test]
fn test_percentages() {
    let mut health = Health::new(8.0, 4.0);
    health.apply_damage(1.0).unwrap();
    assert_eq!(health.shield_percent(), 0.75);
    assert_eq!(health.percent(), 1.0);
    assert_eq!(Health::unshielded(5.0).shield_percent(), 0.0);
}

// -----------------------------------------------------------------------------
// Respawn and weapon tests
// -----------------------------------------------------------------------------

#[test]
fn test_respawn_countdown() {
    let mut respawn = Respawn::after(1.0);
    assert!(!respawn.tick(5.0));

    respawn.start();
    assert!(!respawn.tick(0.6));
    assert!(respawn.tick(0.6));
    assert!(respawn.timer.is_none());
    assert!(!respawn.tick(0.6));
}

#[test]
fn test_weapon_fire_and_reload() {
    let defaults = WeaponDefaults {
        magazine_size: 2,
        fire_cooldown: 0.5,
        ..WeaponDefaults::default()
    };
    let mut weapon = Weapon::equip(&defaults);

    assert_eq!(weapon.try_fire(), Ok(1));
    assert_eq!(weapon.try_fire(), Err(WeaponRejection::CoolingDown));
    weapon.tick(0.5);
    assert_eq!(weapon.try_fire(), Ok(0));
    weapon.tick(0.5);
    assert_eq!(weapon.try_fire(), Err(WeaponRejection::Empty));

    weapon.reload();
    assert_eq!(weapon.ammo, 2);
}

// -----------------------------------------------------------------------------
// System tests
// -----------------------------------------------------------------------------

fn combat_app() -> App {
    let mut app = App::new();
    app.add_message::<DamageEvent>()
        .add_message::<DeathEvent>()
        .add_message::<ReviveEvent>()
        .add_message::<VitalsChangedEvent>()
        .add_systems(Update, (apply_damage, process_deaths, process_revives).chain());
    app
}

#[test]
fn test_lethal_damage_takes_entity_out_of_play() {
    let mut app = combat_app();
    let target = app
        .world_mut()
        .spawn((Health::unshielded(3.0), Visibility::default()))
        .id();

    app.world_mut().write_message(DamageEvent {
        source: None,
        target,
        amount: 5.0,
    });
    app.update();

    let entity = app.world().entity(target);
    assert!(entity.get::<Health>().is_some_and(|h| h.is_dead()));
    assert!(entity.contains::<Incapacitated>());
    assert_eq!(entity.get::<Visibility>(), Some(&Visibility::Hidden));
}

#[test]
fn test_revive_brings_entity_back() {
    let mut app = combat_app();
    let target = app
        .world_mut()
        .spawn((Health::new(3.0, 1.0), Visibility::default()))
        .id();

    app.world_mut().write_message(DamageEvent {
        source: None,
        target,
        amount: 1.0,
    });
    app.world_mut().write_message(DamageEvent {
        source: None,
        target,
        amount: 3.0,
    });
    app.update();
    assert!(app.world().entity(target).contains::<Incapacitated>());

    app.world_mut().write_message(ReviveEvent { entity: target });
    app.update();

    let entity = app.world().entity(target);
    assert_eq!(entity.get::<Health>(), Some(&Health::new(3.0, 1.0)));
    assert!(!entity.contains::<Incapacitated>());
    assert_eq!(entity.get::<Visibility>(), Some(&Visibility::Inherited));
}

// -----------------------------------------------------------------------------
// Message-level system tests
// -----------------------------------------------------------------------------

/// Everything the combat systems under test sent this run
#[derive(Resource, Default)]
struct MessageLog {
    damage: Vec<(Entity, f32)>,
    heals: Vec<(Entity, f32)>,
    shields: Vec<(Entity, f32)>,
    coins: Vec<u32>,
    vitals: Vec<(Entity, VitalsChange)>,
    encounters: Vec<BossEncounterEvent>,
}

fn record_messages(
    mut log: ResMut<MessageLog>,
    mut damage: MessageReader<DamageEvent>,
    mut heals: MessageReader<HealEvent>,
    mut shields: MessageReader<ShieldRestoreEvent>,
    mut coins: MessageReader<CoinsCollectedEvent>,
    mut vitals: MessageReader<VitalsChangedEvent>,
    mut encounters: MessageReader<BossEncounterEvent>,
) {
    log.damage.extend(damage.read().map(|e| (e.target, e.amount)));
    log.heals.extend(heals.read().map(|e| (e.target, e.amount)));
    log.shields.extend(shields.read().map(|e| (e.target, e.amount)));
    log.coins.extend(coins.read().map(|e| e.amount));
    log.vitals.extend(vitals.read().map(|e| (e.entity, e.change)));
    log.encounters.extend(encounters.read().cloned());
}

fn logged_app() -> App {
    let mut app = App::new();
    app.init_resource::<MessageLog>()
        .init_resource::<Time>()
        .init_resource::<PlayerWallet>()
        .add_message::<CollisionStart>()
        .add_message::<DamageEvent>()
        .add_message::<HealEvent>()
        .add_message::<ShieldRestoreEvent>()
        .add_message::<CoinsCollectedEvent>()
        .add_message::<DeathEvent>()
        .add_message::<ReviveEvent>()
        .add_message::<VitalsChangedEvent>()
        .add_message::<BossEncounterEvent>()
        .add_systems(PostUpdate, record_messages);
    app
}

fn touch(app: &mut App, collider1: Entity, collider2: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1,
        collider2,
        body1: Some(collider1),
        body2: Some(collider2),
    });
}

fn sent(app: &App) -> &MessageLog {
    app.world().resource::<MessageLog>()
}

fn is_despawned(app: &App, entity: Entity) -> bool {
    app.world().get_entity(entity).is_err()
}

#[test]
fn test_click_on_ui_does_not_fire() {
    let mut app = App::new();
    app.init_resource::<CombatInput>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .add_systems(Update, read_combat_input);
    let button = app.world_mut().spawn(Interaction::Pressed).id();

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    assert!(!app.world().resource::<CombatInput>().fire);

    // Same click with the cursor off every button
    *app.world_mut().get_mut::<Interaction>(button).unwrap() = Interaction::None;
    app.update();
    assert!(app.world().resource::<CombatInput>().fire);
}

#[test]
fn test_heal_at_full_health_is_silent() {
    let mut app = logged_app();
    app.add_systems(Update, (apply_heals, apply_shield_restores));
    let target = app.world_mut().spawn(Health::new(10.0, 5.0)).id();

    app.world_mut().write_message(HealEvent {
        target,
        amount: 3.0,
    });
    app.world_mut().write_message(ShieldRestoreEvent {
        target,
        amount: 3.0,
    });
    app.update();
    assert!(sent(&app).vitals.is_empty());

    app.world_mut().get_mut::<Health>(target).unwrap().current = 4.0;
    app.world_mut().write_message(HealEvent {
        target,
        amount: 3.0,
    });
    app.update();
    assert_eq!(sent(&app).vitals, vec![(target, VitalsChange::Healed)]);
}

fn spawn_enemy(app: &mut App, health: Health) -> Entity {
    app.world_mut()
        .spawn((Combatant, Team::Enemy, health))
        .id()
}

fn spawn_projectile(app: &mut App, owner: Entity, lifetime: f32) -> Entity {
    app.world_mut()
        .spawn((
            Projectile {
                damage: 2.0,
                owner,
            },
            Team::Player,
            ProjectileLifetime(lifetime),
        ))
        .id()
}

#[test]
fn test_projectile_hits_first_valid_target_once() {
    let mut app = logged_app();
    app.add_systems(Update, detect_projectile_hits);

    let owner = app
        .world_mut()
        .spawn((Player, Combatant, Team::Player, Health::new(10.0, 5.0)))
        .id();
    let ally = app
        .world_mut()
        .spawn((Combatant, Team::Player, Health::unshielded(5.0)))
        .id();
    let mut dead = Health::unshielded(5.0);
    dead.die();
    let corpse = spawn_enemy(&mut app, dead);
    let first = spawn_enemy(&mut app, Health::unshielded(5.0));
    let second = spawn_enemy(&mut app, Health::unshielded(5.0));
    let projectile = spawn_projectile(&mut app, owner, 1.0);

    touch(&mut app, projectile, owner);
    touch(&mut app, ally, projectile);
    touch(&mut app, projectile, corpse);
    touch(&mut app, first, projectile);
    touch(&mut app, projectile, second);
    app.update();

    assert_eq!(sent(&app).damage, vec![(first, 2.0)]);
    assert!(is_despawned(&app, projectile));
}

#[test]
fn test_projectile_expiring_on_impact_frame() {
    let mut app = logged_app();
    app.add_systems(Update, (detect_projectile_hits, expire_projectiles).chain());

    let owner = app.world_mut().spawn((Player, Team::Player)).id();
    let target = spawn_enemy(&mut app, Health::unshielded(5.0));
    let projectile = spawn_projectile(&mut app, owner, 0.0);

    touch(&mut app, projectile, target);
    app.update();

    assert_eq!(sent(&app).damage, vec![(target, 2.0)]);
    assert!(is_despawned(&app, projectile));
}

#[test]
fn test_pickups_skip_full_pools() {
    let mut app = logged_app();
    app.add_systems(Update, (collect_pickups, credit_coins).chain());

    let player = app
        .world_mut()
        .spawn((Player, Health::new(10.0, 5.0)))
        .id();
    let medkit = app.world_mut().spawn(Pickup::Health(3.0)).id();
    let coins = app.world_mut().spawn(Pickup::Coins(5)).id();

    touch(&mut app, player, medkit);
    touch(&mut app, coins, player);
    app.update();

    // Health is full so the medkit stays, coins are always taken
    assert!(sent(&app).heals.is_empty());
    assert!(!is_despawned(&app, medkit));
    assert!(is_despawned(&app, coins));
    assert_eq!(sent(&app).coins, vec![5]);
    assert_eq!(app.world().resource::<PlayerWallet>().coins, 5);

    app.world_mut().get_mut::<Health>(player).unwrap().current = 6.0;
    touch(&mut app, medkit, player);
    touch(&mut app, player, medkit);
    app.update();

    assert_eq!(sent(&app).heals, vec![(player, 3.0)]);
    assert!(is_despawned(&app, medkit));
}

#[test]
fn test_dead_player_collects_nothing() {
    let mut app = logged_app();
    app.add_systems(Update, collect_pickups);

    let mut health = Health::new(10.0, 5.0);
    health.die();
    let player = app.world_mut().spawn((Player, health)).id();
    let shield_cell = app.world_mut().spawn(Pickup::Shield(2.0)).id();

    touch(&mut app, player, shield_cell);
    app.update();

    assert!(sent(&app).shields.is_empty());
    assert!(!is_despawned(&app, shield_cell));
}

// -----------------------------------------------------------------------------
// Boss encounter tests
// -----------------------------------------------------------------------------

#[test]
fn test_boss_encounter_steps() {
    let mut encounter = BossEncounter::new("Warden", 100.0);

    assert_eq!(encounter.advance(None, 0.1), None);
    assert_eq!(encounter.advance(Some(150.0), 0.1), None);
    assert_eq!(encounter.advance(Some(90.0), 0.1), Some(EncounterStep::Intro));

    // Walking away does not cancel the intro
    assert_eq!(encounter.advance(Some(500.0), BOSS_INTRO_DURATION / 2.0), None);
    assert_eq!(
        encounter.advance(Some(500.0), BOSS_INTRO_DURATION / 2.0),
        Some(EncounterStep::Start)
    );
    assert_eq!(encounter.phase, BossPhase::Active);
    assert_eq!(encounter.advance(Some(0.0), 1.0), None);

    encounter.defeat();
    assert_eq!(encounter.advance(Some(0.0), 1.0), None);
    encounter.reset();
    assert_eq!(encounter.advance(Some(0.0), 1.0), Some(EncounterStep::Intro));
}

#[test]
fn test_boss_encounter_messages() {
    let mut app = logged_app();
    app.add_systems(
        Update,
        (advance_boss_encounters, settle_boss_encounters).chain(),
    );

    app.world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.0, 0.0)));
    let boss = app
        .world_mut()
        .spawn((
            BossEncounter::new("Warden", 150.0),
            Transform::from_xyz(100.0, 0.0, 0.0),
        ))
        .id();

    app.update();
    assert_eq!(
        sent(&app).encounters,
        vec![BossEncounterEvent::Intro {
            boss,
            name: "Warden".to_string()
        }]
    );

    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(BOSS_INTRO_DURATION + 0.5));
    app.update();
    assert_eq!(
        sent(&app).encounters.last(),
        Some(&BossEncounterEvent::Start { boss })
    );

    app.world_mut().write_message(DeathEvent { entity: boss });
    app.update();
    let phase = app.world().get::<BossEncounter>(boss).map(|e| e.phase);
    assert_eq!(phase, Some(BossPhase::Defeated));

    app.world_mut().write_message(ReviveEvent { entity: boss });
    app.update();
    // Player is still in range, so the intro plays again on the next frame
    app.update();
    assert_eq!(sent(&app).encounters.len(), 3);
}
