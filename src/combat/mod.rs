//! Combat domain: health and shield resolution, death and revive, pickups and the weapon.

mod boss;
mod components;
mod events;
mod pickups;
mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;
mod weapon;

pub use components::{
    Combatant, DamageOutcome, DamageRejection, Health, Incapacitated, Respawn, Team, VitalPool,
    VitalState,
};
pub use boss::{BOSS_INTRO_DURATION, BossEncounter, BossPhase, EncounterStep};
pub use events::{
    BossEncounterEvent, CoinsCollectedEvent, DamageEvent, DeathEvent, HealEvent, ReviveEvent,
    ShieldRestoreEvent, VitalsChange, VitalsChangedEvent, WeaponFiredEvent,
};
pub use pickups::{Pickup, PickupBundle, PlayerWallet};
pub use resources::CombatInput;
pub use spawn::{TrainingDummy, TrainingDummyBundle};
pub use weapon::{Projectile, ProjectileLifetime, Weapon, WeaponRejection};

use bevy::prelude::*;

use crate::combat::boss::{advance_boss_encounters, settle_boss_encounters};
use crate::combat::pickups::{collect_pickups, credit_coins};
use crate::combat::spawn::spawn_arena;
use crate::combat::systems::{
    apply_damage, apply_heals, apply_shield_restores, detect_projectile_hits, expire_projectiles,
    fire_weapon, handle_test_input, process_deaths, process_revives, read_combat_input,
    tick_respawns, update_weapon_timers,
};
use crate::core::gameplay_active;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatInput>()
            .init_resource::<PlayerWallet>()
            .add_message::<DamageEvent>()
            .add_message::<HealEvent>()
            .add_message::<ShieldRestoreEvent>()
            .add_message::<DeathEvent>()
            .add_message::<ReviveEvent>()
            .add_message::<VitalsChangedEvent>()
            .add_message::<WeaponFiredEvent>()
            .add_message::<CoinsCollectedEvent>()
            .add_message::<BossEncounterEvent>()
            .add_systems(Startup, spawn_arena)
            .add_systems(
                Update,
                (
                    read_combat_input,
                    (
                        update_weapon_timers,
                        fire_weapon,
                        detect_projectile_hits,
                        expire_projectiles,
                        collect_pickups,
                        tick_respawns,
                        advance_boss_encounters,
                    )
                        .chain()
                        .run_if(gameplay_active),
                    handle_test_input,
                    apply_damage,
                    apply_heals,
                    apply_shield_restores,
                    process_deaths,
                    process_revives,
                    settle_boss_encounters,
                    credit_coins,
                )
                    .chain(),
            );
    }
}
