//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct HealEvent {
    pub target: Entity,
    pub amount: f32,
}

impl Message for HealEvent {}

#[derive(Debug)]
pub struct ShieldRestoreEvent {
    pub target: Entity,
    pub amount: f32,
}

impl Message for ShieldRestoreEvent {}

/// Event emitted when a combatant's health reaches zero
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Request to bring a dead combatant back at full health and shield
#[derive(Debug)]
pub struct ReviveEvent {
    pub entity: Entity,
}

impl Message for ReviveEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalsChange {
    ShieldDamaged,
    HealthDamaged,
    Healed,
    ShieldRestored,
    Revived,
}

/// Event emitted after a combatant's health or shield changed, for feedback
#[derive(Debug)]
pub struct VitalsChangedEvent {
    pub entity: Entity,
    pub change: VitalsChange,
}

impl Message for VitalsChangedEvent {}

/// Event emitted when a weapon fires a shot
#[derive(Debug)]
pub struct WeaponFiredEvent {
    pub shooter: Entity,
    pub ammo_left: u32,
}

impl Message for WeaponFiredEvent {}

/// Coins picked up from the arena floor
#[derive(Debug)]
pub struct CoinsCollectedEvent {
    pub collector: Entity,
    pub amount: u32,
}

impl Message for CoinsCollectedEvent {}

/// Beats of a boss encounter, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum BossEncounterEvent {
    /// Player came close: show the name card
    Intro { boss: Entity, name: String },
    /// Name card is done and the fight is on
    Start { boss: Entity },
}

impl Message for BossEncounterEvent {}
